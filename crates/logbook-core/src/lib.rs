//! # Logbook Core
//!
//! Core library for Logbook - a personal, plain-text (optionally encrypted)
//! command-line journal.
//!
//! This crate provides the entry model, the journal store and its codecs,
//! filtering, and the procedures that reconcile interactive edits and
//! deletions back into the full journal. It never touches the terminal;
//! the CLI layer injects editors, selectors and passphrases.
//!
//! ## Architecture
//!
//! - **entry**: Entry model, title/body split, editable rendering
//! - **tags**: Tag extraction from entry text
//! - **storage**: Journal store, editable text format, plain and age codecs
//! - **filter**: Filter criteria and the filter engine
//! - **mode**: Resolves what an invocation wants to do from its flags
//! - **reconcile**: Edit and delete reconciliation against the full journal
//! - **transition**: Encrypting or decrypting a whole journal
//! - **export**: Export formats (JSON, text, Markdown, tag counts)
//! - **crypto**: Passphrase policy for newly encrypted journals
//! - **fs**: Atomic whole-file replacement

pub mod crypto;
pub mod entry;
pub mod error;
pub mod export;
pub mod filter;
pub mod fs;
pub mod mode;
pub mod reconcile;
pub mod storage;
pub mod tags;
pub mod transition;

pub use entry::Entry;
pub use error::{LogbookError, Result};
pub use filter::FilterCriteria;
pub use mode::{ExportAction, Intent, Mode, Target};
pub use storage::{AgeCodec, Codec, Journal, JournalSettings, PlainCodec};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
