//! Output formatting for the CLI.
//!
//! Entries go to stdout; status lines go to stderr via `eprintln!`.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

use logbook_core::tags::is_tag_word;
use logbook_core::{Entry, JournalSettings};

/// Whether to color output for this journal.
pub fn use_color(settings: &JournalSettings) -> bool {
    settings.highlight && std::io::stdout().is_terminal()
}

/// Wrap tag words in color, leaving whitespace and other words as is.
pub fn highlight_tags(text: &str, tag_symbols: &str) -> String {
    text.split_inclusive(char::is_whitespace)
        .map(|chunk| {
            let word = chunk.trim_end();
            if is_tag_word(word, tag_symbols) {
                let trailing = &chunk[word.len()..];
                format!("{}{}", word.cyan().bold(), trailing)
            } else {
                chunk.to_string()
            }
        })
        .collect()
}

/// Full rendering of one entry for reading.
pub fn format_entry(entry: &Entry, settings: &JournalSettings, color: bool) -> String {
    let rendered = entry.render(&settings.time_format);
    let rendered = rendered.trim_end();
    if !color {
        return rendered.to_string();
    }

    let (header, body) = match rendered.split_once('\n') {
        Some((header, body)) => (header, Some(body)),
        None => (rendered, None),
    };
    let timestamp = format!("[{}]", entry.date.format(&settings.time_format));
    let title = header
        .strip_prefix(timestamp.as_str())
        .unwrap_or(header)
        .trim_start();
    let mut out = format!(
        "{} {}",
        timestamp.dimmed(),
        highlight_tags(title, &settings.tag_symbols).bold()
    );
    if let Some(body) = body {
        out.push('\n');
        out.push_str(&highlight_tags(body, &settings.tag_symbols));
    }
    out
}

/// Print entries separated by blank lines.
pub fn print_entries(entries: &[Entry], settings: &JournalSettings) {
    let color = use_color(settings);
    let blocks: Vec<String> = entries
        .iter()
        .map(|entry| format_entry(entry, settings, color))
        .collect();
    if !blocks.is_empty() {
        println!("{}", blocks.join("\n\n"));
    }
}
