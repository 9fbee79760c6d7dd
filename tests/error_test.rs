use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use confgen::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::DirectoryNotFound {
        path: PathBuf::from("/missing"),
    };
    assert_eq!(err.to_string(), "Directory not found: '/missing'.");

    let err = Error::UnknownEncoding("klingon".to_string());
    assert_eq!(err.to_string(), "Unknown encoding: 'klingon'.");

    let err = Error::OutputCollision {
        path: PathBuf::from("/out/env/t.txt"),
        first: "filter 'env.filter' with template 't.txt'".to_string(),
        second: "filter 'env.properties' with template 't.txt'".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Output '/out/env/t.txt' would be written by both filter 'env.filter' with template 't.txt' and filter 'env.properties' with template 't.txt'."
    );
}

#[test]
fn test_io_error_is_transparent() {
    let err: Error = io::Error::new(io::ErrorKind::NotFound, "file not found").into();
    assert_eq!(err.to_string(), "file not found");
}

#[test]
fn test_cause_is_chained() {
    let err = Error::TemplateWriteError {
        path: PathBuf::from("/out/env/app.properties"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
    };
    assert_eq!(
        err.to_string(),
        "Failed to write '/out/env/app.properties'."
    );
    let source = err.source().expect("source is kept");
    assert_eq!(source.to_string(), "permission denied");
}
