//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;
use std::path::Path;

use logbook_core::LogbookError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (journal name, journal file)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// A configuration key the command needs is not set
    ConfigurationMissing { key: String, hint: String },

    /// The user cancelled; nothing was written
    Cancelled(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::ConfigurationMissing { key, hint } => {
                write!(f, "`{}` is not set in your configuration.\n{}", key, hint)
            }
            CliError::Cancelled(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and optional hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Missing config key, pointing at the file to edit.
    pub fn config_missing(key: impl Into<String>, config_path: &Path) -> Self {
        let key = key.into();
        CliError::ConfigurationMissing {
            hint: format!(
                "Hint: Set `{}` in {} and try again.",
                key,
                config_path.display()
            ),
            key,
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        CliError::Cancelled(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::ConfigurationMissing { .. } => exit_codes::INVALID_INPUT,
            CliError::Cancelled(_) => exit_codes::CANCELLED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        match self {
            CliError::Cancelled(message) => eprintln!("{}", message),
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(self.exit_code())
    }
}

/// Exit code for a core error that reached the top level unmapped.
pub fn core_exit_code(err: &LogbookError) -> i32 {
    match err {
        LogbookError::IncorrectPassphrase => exit_codes::AUTH_FAILED,
        LogbookError::InvalidInput(_) | LogbookError::ConfigurationMissing(_) => {
            exit_codes::INVALID_INPUT
        }
        LogbookError::Aborted(_) => exit_codes::CANCELLED,
        _ => exit_codes::FAILURE,
    }
}

/// Exit code for any error returned by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(core_err) = err.downcast_ref::<LogbookError>() {
        return core_exit_code(core_err);
    }
    exit_codes::FAILURE
}
