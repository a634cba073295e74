//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success, including "nothing to write"
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells and clap)
/// - 3+: Application-specific errors
/// - 130: Cancelled by the user (128 + SIGINT)
pub mod exit_codes {
    /// Unhandled failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (journal name, journal file).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, arguments or missing configuration.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// The user cancelled an interactive step.
    pub const CANCELLED: i32 = 130;
}

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "LOGBOOK_CONFIG";

/// Environment variable holding the journal passphrase.
pub const PASSPHRASE_ENV: &str = "LOGBOOK_PASSPHRASE";

/// Keychain service name; the account is the journal name.
pub const KEYCHAIN_SERVICE: &str = "logbook";

/// Passphrase prompt attempts before giving up.
pub const MAX_PASSPHRASE_ATTEMPTS: u32 = 3;
