//! Encryption transition.
//!
//! Re-encodes a whole journal under another codec. Entry content is
//! copied verbatim; only the bytes on disk change. Updating the `encrypt`
//! flag in the configuration is left to the caller, which knows where the
//! configuration lives.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::storage::{Codec, Journal};

/// Where a transition wrote and what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReport {
    pub destination: PathBuf,
    /// The journal's own file was replaced
    pub in_place: bool,
    /// The written file is encrypted
    pub encrypted: bool,
}

impl TransitionReport {
    pub fn message(&self) -> String {
        let verb = if self.encrypted {
            "encrypted"
        } else {
            "decrypted"
        };
        format!("Journal {} to {}.", verb, self.destination.display())
    }
}

/// Write every entry of `journal` through `codec`, to `output` or in place.
///
/// The journal passed in is not modified. If encoding or writing fails
/// the destination keeps its previous contents.
pub fn transition(
    journal: &Journal,
    codec: Box<dyn Codec>,
    output: Option<&Path>,
) -> Result<TransitionReport> {
    let encrypted = codec.is_encrypted();
    let target = journal.reencoded(codec);
    let destination = target.persist(output)?;
    let in_place = output.is_none();

    tracing::debug!(
        journal = %journal.settings().name,
        entries = target.len(),
        encrypted,
        in_place,
        path = %destination.display(),
        "journal transitioned"
    );

    Ok(TransitionReport {
        destination,
        in_place,
        encrypted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AgeCodec, JournalSettings, PlainCodec};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    const PASSPHRASE: &str = "test-passphrase-secure-123";

    fn journal_at(path: &Path) -> Journal {
        let settings = JournalSettings::new("default", path);
        let mut journal = Journal::from_entries(settings, Box::new(PlainCodec), Vec::new());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        journal.new_entry("Morning pages. Slept well @sleep", date);
        journal
    }

    #[test]
    fn test_encrypt_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.txt");
        let journal = journal_at(&path);
        journal.persist(None).unwrap();

        let report = transition(&journal, Box::new(AgeCodec::new(PASSPHRASE)), None).unwrap();

        assert!(report.in_place);
        assert!(report.encrypted);
        assert_eq!(report.destination, path);
        assert_eq!(
            report.message(),
            format!("Journal encrypted to {}.", path.display())
        );
        let raw = std::fs::read(&path).unwrap();
        assert!(crate::storage::encryption::looks_encrypted(&raw));
    }

    #[test]
    fn test_decrypt_to_alternate_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.age");
        let plain_copy = dir.path().join("plain.txt");
        let journal = journal_at(&path).reencoded(Box::new(AgeCodec::new(PASSPHRASE)));
        journal.persist(None).unwrap();
        let before = std::fs::read(&path).unwrap();

        let report = transition(&journal, Box::new(PlainCodec), Some(&plain_copy)).unwrap();

        assert!(!report.in_place);
        assert!(!report.encrypted);
        assert_eq!(report.message(), format!("Journal decrypted to {}.", plain_copy.display()));
        assert_eq!(std::fs::read(&path).unwrap(), before);
        let text = std::fs::read_to_string(&plain_copy).unwrap();
        assert!(text.starts_with("[2024-03-01 08:30] Morning pages."));
    }
}
