//! Error types for Logbook core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Logbook operations.
pub type Result<T> = std::result::Result<T, LogbookError>;

/// Core error type for Logbook operations.
#[derive(Debug, Error)]
pub enum LogbookError {
    /// Encryption or decryption error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// The passphrase did not decrypt the journal
    #[error("Incorrect passphrase")]
    IncorrectPassphrase,

    /// Reading or writing the journal (or an export) failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Journal text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration key required by the operation is not set
    #[error("Configuration missing: `{0}` is not set")]
    ConfigurationMissing(String),

    /// The user cancelled an interactive step
    #[error("Aborted: {0}")]
    Aborted(String),
}

impl From<std::io::Error> for LogbookError {
    fn from(err: std::io::Error) -> Self {
        LogbookError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LogbookError {
    fn from(err: serde_json::Error) -> Self {
        LogbookError::Storage(format!("JSON serialization failed: {}", err))
    }
}
