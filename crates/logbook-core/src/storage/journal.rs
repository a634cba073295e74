//! The journal store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::codec::Codec;
use super::format::{parse_entries, render_entries};
use crate::entry::{Entry, DEFAULT_TIME_FORMAT};
use crate::error::{LogbookError, Result};
use crate::fs::write_atomic;
use crate::tags::DEFAULT_TAG_SYMBOLS;

/// Immutable snapshot of the configuration a journal runs with.
///
/// The CLI resolves global and per-journal configuration into one of
/// these; core procedures only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSettings {
    /// Journal name as configured (e.g. "default", "work")
    pub name: String,

    /// Path of the journal file
    pub path: PathBuf,

    /// Editor command line, if one is configured
    pub editor: Option<String>,

    /// Template used to seed new entries in the editor
    pub template: Option<PathBuf>,

    /// Whether the journal is stored encrypted
    pub encrypt: bool,

    /// Characters that start a tag
    pub tag_symbols: String,

    /// chrono format string for entry timestamps
    pub time_format: String,

    /// Highlight tags when printing to a terminal
    pub highlight: bool,
}

impl JournalSettings {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            editor: None,
            template: None,
            encrypt: false,
            tag_symbols: DEFAULT_TAG_SYMBOLS.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            highlight: true,
        }
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    pub fn with_encrypt(mut self, encrypt: bool) -> Self {
        self.encrypt = encrypt;
        self
    }

    pub fn with_tag_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.tag_symbols = symbols.into();
        self
    }
}

/// An in-memory journal backed by one file.
#[derive(Debug)]
pub struct Journal {
    settings: JournalSettings,
    codec: Box<dyn Codec>,
    entries: Vec<Entry>,
}

impl Journal {
    /// Open the journal at `settings.path`.
    ///
    /// A missing file is an empty journal; it is created on the first
    /// [`persist`](Self::persist).
    ///
    /// # Errors
    ///
    /// Returns `LogbookError::IncorrectPassphrase` when the codec cannot
    /// decrypt the file, and `LogbookError::Parse` for malformed text.
    pub fn open(settings: JournalSettings, codec: Box<dyn Codec>) -> Result<Self> {
        let raw = match fs::read(&settings.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %settings.path.display(), "journal file missing, starting empty");
                Vec::new()
            }
            Err(err) => {
                return Err(LogbookError::Storage(format!(
                    "Failed to read journal {}: {}",
                    settings.path.display(),
                    err
                )))
            }
        };

        let entries = if raw.is_empty() {
            Vec::new()
        } else {
            let text = codec.decode(&raw)?;
            parse_entries(&text, &settings.time_format, &settings.tag_symbols)?
        };
        tracing::debug!(
            journal = %settings.name,
            entries = entries.len(),
            encrypted = codec.is_encrypted(),
            "opened journal"
        );

        Ok(Self {
            settings,
            codec,
            entries,
        })
    }

    /// Build a journal from entries already in memory.
    pub fn from_entries(
        settings: JournalSettings,
        codec: Box<dyn Codec>,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            settings,
            codec,
            entries,
        }
    }

    pub fn settings(&self) -> &JournalSettings {
        &self.settings
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the whole entry sequence.
    pub fn set_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
    }

    /// Append an entry at the end.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Build an entry from raw text and append it.
    pub fn new_entry(&mut self, text: &str, date: NaiveDateTime) -> &Entry {
        let entry = Entry::new(date, text, &self.settings.tag_symbols);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Stable sort by timestamp.
    pub fn sort(&mut self) {
        self.entries.sort_by_key(|entry| entry.date);
    }

    /// Render entries in the editable text format.
    pub fn serialize_editable(&self, entries: &[Entry]) -> String {
        render_entries(entries, &self.settings.time_format)
    }

    /// Parse editable text using this journal's time format and tag symbols.
    pub fn parse_editable(&self, text: &str) -> Result<Vec<Entry>> {
        parse_entries(text, &self.settings.time_format, &self.settings.tag_symbols)
    }

    /// Encode and write the whole journal to `path` (or its own path).
    ///
    /// Returns the path written to.
    pub fn persist(&self, path: Option<&Path>) -> Result<PathBuf> {
        let destination = path.unwrap_or(self.settings.path.as_path());
        let text = self.serialize_editable(&self.entries);
        let bytes = self.codec.encode(&text)?;
        write_atomic(destination, &bytes)?;
        tracing::debug!(
            path = %destination.display(),
            entries = self.entries.len(),
            encrypted = self.codec.is_encrypted(),
            "persisted journal"
        );
        Ok(destination.to_path_buf())
    }

    /// Copy of this journal under another codec, entries copied verbatim.
    pub fn reencoded(&self, codec: Box<dyn Codec>) -> Journal {
        let settings = self.settings.clone().with_encrypt(codec.is_encrypted());
        Journal::from_entries(settings, codec, self.entries.clone())
    }
}
