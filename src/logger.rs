/// Installs `env_logger` as the `log` backend.
///
/// `RUST_LOG` still takes precedence over the level picked from `verbose`.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();
}
