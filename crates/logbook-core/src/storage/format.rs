//! Editable text format.
//!
//! ```text
//! [2024-03-01 09:30] Title of the entry. *
//! Body lines follow the header
//! until the next header line.
//!
//! [2024-03-02 18:00] Another entry
//! ```
//!
//! A header is a line starting with `[`, followed by a timestamp in the
//! configured format and `]`. Any other line belongs to the entry above
//! it. The same format is used for the journal file and for the text
//! handed to the editor.

use chrono::{NaiveDate, NaiveDateTime};

use crate::entry::Entry;
use crate::error::{LogbookError, Result};

/// Render entries into editable text.
pub fn render_entries(entries: &[Entry], time_format: &str) -> String {
    entries
        .iter()
        .map(|entry| entry.render(time_format))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse editable text back into entries, in text order.
///
/// Non-blank text before the first header is rejected rather than
/// silently dropped.
pub fn parse_entries(text: &str, time_format: &str, tag_symbols: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut current: Option<(NaiveDateTime, String)> = None;

    for (line_no, line) in text.lines().enumerate() {
        if let Some((date, rest)) = parse_header(line, time_format) {
            if let Some((date, raw)) = current.take() {
                entries.push(Entry::new(date, &raw, tag_symbols));
            }
            current = Some((date, rest.to_string()));
            continue;
        }

        match current.as_mut() {
            Some((_, raw)) => {
                raw.push('\n');
                raw.push_str(line);
            }
            None if line.trim().is_empty() => {}
            None => {
                return Err(LogbookError::Parse(format!(
                    "line {}: text before the first `[{}]` timestamp line",
                    line_no + 1,
                    time_format
                )));
            }
        }
    }

    if let Some((date, raw)) = current {
        entries.push(Entry::new(date, &raw, tag_symbols));
    }

    Ok(entries)
}

fn parse_header<'a>(line: &'a str, time_format: &str) -> Option<(NaiveDateTime, &'a str)> {
    let inner = line.strip_prefix('[')?;
    let close = inner.find(']')?;
    let date = parse_timestamp(&inner[..close], time_format)?;
    let rest = &inner[close + 1..];
    Some((date, rest.strip_prefix(' ').unwrap_or(rest)))
}

/// Parse a timestamp in `time_format`, accepting date-only formats as midnight.
pub fn parse_timestamp(value: &str, time_format: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, time_format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, time_format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
