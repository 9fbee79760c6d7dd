//! Error handling for confgen.
//! Defines the error kinds raised while scanning, loading filters,
//! planning output paths and rendering templates.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Every variant that wraps an underlying failure keeps it as its `source`,
/// so the cause chain survives up to the host.
#[derive(Error, Debug)]
pub enum Error {
    /// A scan root does not exist (strict scanning only).
    #[error("Directory not found: '{}'.", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Walking a scan root failed part way through.
    #[error("Failed to scan '{}'.", path.display())]
    ScanError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The filter file could not be read.
    #[error("Failed to load filter '{}'.", path.display())]
    FilterLoadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The filter file was read but is not a valid properties file.
    #[error("Failed to parse filter '{}' at line {line}: {message}.", path.display())]
    FilterParseError { path: PathBuf, line: usize, message: String },

    /// An output directory could not be created.
    #[error("Failed to create output directory '{}'.", path.display())]
    OutputDirectoryError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The previous output tree could not be removed.
    #[error("Failed to clean output directory '{}'.", path.display())]
    CleanOutputError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read template '{}'.", path.display())]
    TemplateReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}'.", path.display())]
    TemplateWriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two (template, filter) pairs plan the same output file.
    #[error("Output '{}' would be written by both {first} and {second}.", path.display())]
    OutputCollision {
        path: PathBuf,
        first: String,
        second: String,
    },

    /// The configured encoding label is not recognised.
    #[error("Unknown encoding: '{0}'.")]
    UnknownEncoding(String),

    /// Text could not be decoded from, or encoded to, the configured encoding.
    #[error("Text in '{}' is not representable as {encoding}.", path.display())]
    EncodingError { path: PathBuf, encoding: String },

    /// Represents errors in the project configuration file or options
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur during file system operations
    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message and each underlying cause to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(1);
}
