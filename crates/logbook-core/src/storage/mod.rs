//! Journal storage.
//!
//! A journal is a single flat file holding every entry in its editable
//! text form. The bytes on disk pass through a [`Codec`]: plain UTF-8 for
//! unencrypted journals, Age passphrase encryption otherwise.
//!
//! ## Guarantees
//!
//! - The whole journal is written in one go, through a temp file and a
//!   rename, so a crash never leaves a truncated journal behind
//! - A failed encode or write leaves the previous file untouched
//! - Entries are kept in file order; [`Journal::sort`] restores
//!   chronological order without reordering equal timestamps

pub mod codec;
pub mod encryption;
pub mod format;
pub mod journal;

pub use codec::{AgeCodec, Codec, PlainCodec};
pub use journal::{Journal, JournalSettings};
