//! Common constants used throughout confgen.

/// Supported project configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["confgen.json", "confgen.yml", "confgen.yaml"];

/// Encoding used when none is configured
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Template sub-directory whose outputs land directly in each filter's directory
pub const DEFAULT_DEPLOY_DIR: &str = "deploy";

/// Default scan roots and output root, relative to the project directory
pub const DEFAULT_TEMPLATES_PATH: &str = "src/config/templates";
pub const DEFAULT_FILTERS_PATH: &str = "src/config/filters";
pub const DEFAULT_OUTPUT_PATH: &str = "target/generated-config";

/// Synthesized key identifying the filter a value set was loaded from
pub const FILTER_SOURCE_KEY: &str = "filter.source";
