//! Tag extraction.
//!
//! A tag is a word that starts with one of the configured tag symbols
//! (`@` by default) and follows whitespace or the start of the text.
//! Tags are compared case-insensitively, so they are stored lowercased.

use std::collections::BTreeSet;

use regex::Regex;

/// Default tag symbols used when the configuration does not name any.
pub const DEFAULT_TAG_SYMBOLS: &str = "@";

fn tag_pattern(symbols: &str) -> Option<Regex> {
    if symbols.is_empty() {
        return None;
    }
    let class: String = symbols
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    Regex::new(&format!(r"(?:^|\s)([{}][-+*#/&=\w]+)", class)).ok()
}

/// Extract the sorted, deduplicated, lowercased tags found in `text`.
pub fn extract_tags(text: &str, symbols: &str) -> Vec<String> {
    let Some(pattern) = tag_pattern(symbols) else {
        return Vec::new();
    };
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether `word` begins with one of the tag symbols.
pub fn is_tag_word(word: &str, symbols: &str) -> bool {
    word.chars().next().is_some_and(|c| symbols.contains(c))
}

/// Normalize a user-supplied tag for comparison.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
