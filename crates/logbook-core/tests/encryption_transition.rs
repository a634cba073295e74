//! Whole-journal encryption and decryption against real files.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use logbook_core::storage::encryption::looks_encrypted;
use logbook_core::transition::transition;
use logbook_core::{AgeCodec, Codec, Journal, JournalSettings, LogbookError, PlainCodec};
use tempfile::tempdir;
use zeroize::Zeroizing;

const PASSPHRASE: &str = "correct horse battery staple";

/// Codec whose encode always fails, to simulate a crash mid-transition.
#[derive(Debug)]
struct FailingCodec;

impl Codec for FailingCodec {
    fn encode(&self, _text: &str) -> logbook_core::Result<Vec<u8>> {
        Err(LogbookError::Crypto("encoder exploded".to_string()))
    }

    fn decode(&self, _raw: &[u8]) -> logbook_core::Result<Zeroizing<String>> {
        Err(LogbookError::Crypto("decoder exploded".to_string()))
    }

    fn is_encrypted(&self) -> bool {
        true
    }
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn seeded(path: &Path) -> Journal {
    let settings = JournalSettings::new("default", path);
    let mut journal = Journal::open(settings, Box::new(PlainCodec)).unwrap();
    journal.new_entry("Started the garden. Tomatoes and basil @garden", at(1, 8));
    journal.new_entry("Rain all day *", at(2, 18));
    journal.new_entry("Standup\n- shipped export\n- fixed tests @work", at(3, 9));
    journal.persist(None).unwrap();
    journal
}

#[test]
fn test_encrypt_then_decrypt_restores_identical_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.txt");
    let journal = seeded(&path);
    let original = fs::read(&path).unwrap();

    transition(&journal, Box::new(AgeCodec::new(PASSPHRASE)), None).unwrap();
    let encrypted_bytes = fs::read(&path).unwrap();
    assert!(looks_encrypted(&encrypted_bytes));

    let settings = JournalSettings::new("default", &path).with_encrypt(true);
    let encrypted = Journal::open(settings, Box::new(AgeCodec::new(PASSPHRASE))).unwrap();
    assert_eq!(encrypted.entries(), journal.entries());

    transition(&encrypted, Box::new(PlainCodec), None).unwrap();
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_wrong_passphrase_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.txt");
    let journal = seeded(&path);
    transition(&journal, Box::new(AgeCodec::new(PASSPHRASE)), None).unwrap();

    let settings = JournalSettings::new("default", &path).with_encrypt(true);
    let result = Journal::open(settings, Box::new(AgeCodec::new("not the passphrase")));
    assert!(matches!(result, Err(LogbookError::IncorrectPassphrase)));
}

#[test]
fn test_failed_encode_leaves_original_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.txt");
    let journal = seeded(&path);
    let original = fs::read(&path).unwrap();

    let result = transition(&journal, Box::new(FailingCodec), None);

    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), original);
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "unexpected files: {:?}", leftovers);
}

#[test]
fn test_transition_to_alternate_path_keeps_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.txt");
    let copy = dir.path().join("backup").join("journal.age");
    let journal = seeded(&path);
    let original = fs::read(&path).unwrap();

    let report = transition(&journal, Box::new(AgeCodec::new(PASSPHRASE)), Some(&copy)).unwrap();

    assert!(!report.in_place);
    assert_eq!(fs::read(&path).unwrap(), original);
    assert!(looks_encrypted(&fs::read(&copy).unwrap()));
}

#[cfg(unix)]
#[test]
fn test_failed_write_leaves_original_untouched() {
    let dir = tempdir().unwrap();
    // Valid on its own, but the sibling temp name exceeds the 255-byte limit
    let path = dir.path().join(format!("{}.txt", "j".repeat(240)));
    fs::write(
        &path,
        "[2024-05-01 08:00] Started the garden.\nTomatoes and basil @garden\n",
    )
    .unwrap();
    let original = fs::read(&path).unwrap();
    let settings = JournalSettings::new("default", &path);
    let journal = Journal::open(settings, Box::new(PlainCodec)).unwrap();

    let result = transition(&journal, Box::new(AgeCodec::new(PASSPHRASE)), None);

    assert!(matches!(result, Err(LogbookError::Storage(_))));
    assert_eq!(fs::read(&path).unwrap(), original);
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "unexpected files: {:?}", leftovers);
}
