//! Rules for the passphrase chosen when a journal is encrypted.
//!
//! Only new passphrases are checked. Opening a journal takes whatever
//! passphrase it was sealed with.

use std::fmt;

use crate::error::{LogbookError, Result};

/// Shortest passphrase accepted, counted in characters.
pub const MIN_PASSPHRASE_CHARS: usize = 8;

/// Why a proposed passphrase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weakness {
    Blank,
    TooShort(usize),
}

impl fmt::Display for Weakness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weakness::Blank => f.write_str("Passphrase cannot be empty"),
            Weakness::TooShort(got) => write!(
                f,
                "Passphrase must be at least {} characters (got {})",
                MIN_PASSPHRASE_CHARS, got
            ),
        }
    }
}

/// The first rule `passphrase` breaks, if any.
pub fn weakness(passphrase: &str) -> Option<Weakness> {
    if passphrase.trim().is_empty() {
        return Some(Weakness::Blank);
    }
    match passphrase.chars().count() {
        n if n < MIN_PASSPHRASE_CHARS => Some(Weakness::TooShort(n)),
        _ => None,
    }
}

/// Accept or refuse a new journal passphrase.
///
/// ```
/// use logbook_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("garden diary 2024").is_ok());
/// assert!(validate_passphrase("diary").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    match weakness(passphrase) {
        Some(weak) => Err(LogbookError::InvalidInput(weak.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_passphrase_is_accepted() {
        assert_eq!(weakness("morning pages, every day"), None);
        assert!(validate_passphrase("morning pages, every day").is_ok());
    }

    #[test]
    fn test_blank_is_refused_before_length() {
        assert_eq!(weakness(""), Some(Weakness::Blank));
        // Long enough, but nothing to derive a key from
        assert_eq!(weakness("          "), Some(Weakness::Blank));
    }

    #[test]
    fn test_short_passphrase_reports_its_length() {
        assert_eq!(weakness("diary"), Some(Weakness::TooShort(5)));
        let err = validate_passphrase("diary").unwrap_err();
        assert!(matches!(err, LogbookError::InvalidInput(_)));
        assert!(err.to_string().contains("at least 8 characters (got 5)"));
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        // Eight bytes, four characters
        assert_eq!(weakness("日記日記"), Some(Weakness::TooShort(4)));
        assert_eq!(weakness("日記日記日記日記"), None);
    }

    #[test]
    fn test_surrounding_spaces_count_toward_length() {
        assert_eq!(weakness("  diary  "), None);
    }
}
