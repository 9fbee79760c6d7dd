//! confgen generates environment-specific configuration files.
//! Every template is rendered once per filter (a set of `key=value` substitutions
//! describing one environment) into an output tree laid out by filter name.

/// Recursive scanning of filter and template directories
pub mod catalog;

/// Command-line interface module for the confgen application
pub mod cli;

/// Generation settings: defaults, confgen.json / confgen.yml / confgen.yaml, overrides
pub mod config;

pub mod constants;

/// Text encodings for inputs and outputs
pub mod encoding;

/// Error types and handling for the confgen application
pub mod error;

/// Loading filter files into substitution values
pub mod filter;

pub mod logger;

/// Separator-independent path normalization
pub mod paths;

/// Output locations per (template, filter) pair
pub mod planner;

/// Core generation orchestration
/// Combines all components to generate the final output
pub mod processor;

/// Properties-file parsing
pub mod properties;

/// `${key}` placeholder substitution and output writing
pub mod renderer;
