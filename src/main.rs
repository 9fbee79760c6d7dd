//! confgen's main application entry point.
//! Parses arguments, sets up logging and runs one generation.

use confgen::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::generate,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Builds the configuration from defaults, project file and arguments
/// 2. Regenerates the output tree
fn run(args: Args) -> Result<()> {
    let config = args.to_config()?;
    let report = generate(&config)?;

    println!(
        "Generated {} file(s) from {} template(s) and {} filter(s) in {}.",
        report.generated.len(),
        report.templates.len(),
        report.filters.len(),
        config.output_base_path.display()
    );
    Ok(())
}
