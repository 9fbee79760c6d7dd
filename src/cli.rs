//! Command-line interface implementation for confgen.
//! Provides argument parsing using clap and turns the arguments into a
//! [`GenerationConfig`].

use clap::Parser;
use std::path::PathBuf;

use crate::config::{load_config_file, GenerationConfig};
use crate::error::Result;

/// Command-line arguments structure for confgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "confgen: generate per-environment configuration from templates and filters", long_about = None)]
pub struct Args {
    /// Project directory that default paths and confgen.{json,yml,yaml} are resolved against
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Templates directory [default: <project>/src/config/templates]
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Filters directory [default: <project>/src/config/filters]
    #[arg(short, long, value_name = "DIR")]
    pub filters: Option<PathBuf>,

    /// Output directory, deleted and regenerated on every run [default: <project>/target/generated-config]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Template sub-directory whose files go directly into each environment directory [default: deploy]
    #[arg(short, long, value_name = "NAME")]
    pub deploy_dir: Option<String>,

    /// Encoding for templates, filters and outputs [default: UTF-8]
    #[arg(short, long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Template file or directory to skip (repeatable)
    #[arg(long, value_name = "PATH")]
    pub ignore_template: Vec<String>,

    /// Filter file or directory to skip (repeatable)
    #[arg(long, value_name = "PATH")]
    pub ignore_filter: Vec<String>,

    /// Log the content of every generated file
    #[arg(long)]
    pub log_output: bool,

    /// Fail when the templates or filters directory does not exist
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the run configuration: project defaults, then the project file,
    /// then anything given on the command line.
    pub fn to_config(&self) -> Result<GenerationConfig> {
        let project_dir = self.project_dir.as_path();
        let mut config = GenerationConfig::for_project(project_dir);
        if let Some(file) = load_config_file(project_dir)? {
            config = config.merge_file(file, project_dir);
        }
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: GenerationConfig) -> GenerationConfig {
        if let Some(path) = &self.templates {
            config.templates_base_path = path.clone();
        }
        if let Some(path) = &self.filters {
            config.filters_base_path = path.clone();
        }
        if let Some(path) = &self.output {
            config.output_base_path = path.clone();
        }
        if let Some(deploy) = &self.deploy_dir {
            config.deploy_templates_directory = deploy.clone();
        }
        if let Some(encoding) = &self.encoding {
            config.encoding = encoding.clone();
        }
        if !self.ignore_template.is_empty() {
            config.templates_to_ignore = self.ignore_template.clone();
        }
        if !self.ignore_filter.is_empty() {
            config.filters_to_ignore = self.ignore_filter.clone();
        }
        config.log_output |= self.log_output;
        config.strict |= self.strict;
        config
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}

