//! The entry model.
//!
//! An entry is a timestamped note. Its text is split into a title (the
//! first sentence of the first line) and a body (everything after it).
//! A first line ending in `*` marks the entry as starred.

use chrono::NaiveDateTime;

use crate::tags::extract_tags;

/// Default timestamp format for rendering and parsing entries.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const STAR: char = '*';

/// A single journal entry.
///
/// Equality is content equality: timestamp, title, body and star. The
/// derived tags and the transient `modified` flag do not take part.
#[derive(Debug, Clone)]
pub struct Entry {
    /// When the entry was written
    pub date: NaiveDateTime,

    /// First sentence of the entry
    pub title: String,

    /// Remaining text (may be empty)
    pub body: String,

    /// Whether the entry is starred
    pub starred: bool,

    /// Tags found in title and body, lowercased and sorted
    pub tags: Vec<String>,

    /// Set by edit reconciliation when the rendered entry changed
    pub modified: bool,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.title.trim() == other.title.trim()
            && self.body.trim_end() == other.body.trim_end()
            && self.starred == other.starred
    }
}

impl Eq for Entry {}

impl Entry {
    /// Build an entry from raw text, as typed by the user.
    pub fn new(date: NaiveDateTime, text: &str, tag_symbols: &str) -> Self {
        let (first_line, rest) = match text.trim().split_once('\n') {
            Some((first, rest)) => (first.trim_end(), rest),
            None => (text.trim(), ""),
        };

        let (first_line, starred) = match first_line.strip_suffix(STAR) {
            Some(stripped) => (stripped.trim_end(), true),
            None => (first_line, false),
        };

        let (title, inline_body) = split_title(first_line);
        let body = match (inline_body.is_empty(), rest.trim().is_empty()) {
            (true, _) => normalize_body(rest),
            (false, true) => normalize_body(inline_body),
            (false, false) => normalize_body(&format!("{}\n{}", inline_body, rest)),
        };

        Self::from_parts(date, title, &body, starred, tag_symbols)
    }

    /// Build an entry from an already separated title and body.
    pub fn from_parts(
        date: NaiveDateTime,
        title: &str,
        body: &str,
        starred: bool,
        tag_symbols: &str,
    ) -> Self {
        let mut entry = Self {
            date,
            title: title.trim().to_string(),
            body: normalize_body(body),
            starred,
            tags: Vec::new(),
            modified: false,
        };
        entry.refresh_tags(tag_symbols);
        entry
    }

    /// Recompute the derived tags from title and body.
    pub fn refresh_tags(&mut self, tag_symbols: &str) {
        let text = format!("{}\n{}", self.title, self.body);
        self.tags = extract_tags(&text, tag_symbols);
    }

    /// Whether the entry carries `tag` (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| *t == tag)
    }

    /// Full text used for substring search.
    pub fn text(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.body)
        }
    }

    /// Header line: `[timestamp] title`, with a trailing ` *` when starred.
    pub fn header(&self, time_format: &str) -> String {
        let star = if self.starred { " *" } else { "" };
        format!("[{}] {}{}", self.date.format(time_format), self.title, star)
    }

    /// Editable rendering: header line, then the body on following lines.
    pub fn render(&self, time_format: &str) -> String {
        if self.body.is_empty() {
            format!("{}\n", self.header(time_format))
        } else {
            format!("{}\n{}\n", self.header(time_format), self.body)
        }
    }

    /// One-line summary: timestamp and title.
    pub fn short(&self, time_format: &str) -> String {
        format!("{} {}", self.date.format(time_format), self.title)
    }
}

/// Split a line at the end of its first sentence.
///
/// A sentence ends at a run of `.`, `?` or `!` followed by whitespace.
fn split_title(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if matches!(bytes[idx], b'.' | b'?' | b'!') {
            let mut end = idx;
            while end + 1 < bytes.len() && matches!(bytes[end + 1], b'.' | b'?' | b'!') {
                end += 1;
            }
            if end + 1 < bytes.len() && bytes[end + 1].is_ascii_whitespace() {
                return (line[..=end].trim(), line[end + 1..].trim());
            }
            idx = end;
        }
        idx += 1;
    }
    (line.trim(), "")
}

/// Drop leading blank lines and trailing whitespace, keep inner layout.
fn normalize_body(body: &str) -> String {
    let trimmed = body.trim_end();
    let mut lines = trimmed.lines().skip_while(|line| line.trim().is_empty());
    let mut out = String::new();
    if let Some(first) = lines.next() {
        out.push_str(first);
        for line in lines {
            out.push('\n');
            out.push_str(line);
        }
    }
    out
}
