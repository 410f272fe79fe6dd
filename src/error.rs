use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for the xmldoc library.
///
/// The comment engine itself never fails: unrecognized input degrades to a
/// summary-only block. These errors only come from the edges that touch the
/// file system or read settings.
///
/// # Examples
///
/// ```
/// use xmldoc::Error;
/// use std::path::PathBuf;
///
/// // Create an IO error
/// let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
/// let error = Error::Io(io_err);
/// assert!(matches!(error, Error::Io(_)));
///
/// // Create a path not found error
/// let error = Error::PathNotFound(PathBuf::from("missing.cs"));
/// assert!(matches!(error, Error::PathNotFound(_)));
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Settings file could not be parsed
    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// File or directory not found error
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for xmldoc operations.
///
/// # Examples
///
/// ```
/// use xmldoc::{Result, Error};
/// use std::path::PathBuf;
///
/// fn example_operation() -> Result<String> {
///     Err(Error::PathNotFound(PathBuf::from("missing.cs")))
/// }
///
/// match example_operation() {
///     Ok(content) => println!("Success: {}", content),
///     Err(e) => println!("Operation failed: {}", e),
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;
