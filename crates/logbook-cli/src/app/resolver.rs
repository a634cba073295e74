//! Path and journal resolution.

use std::path::PathBuf;

use crate::config::{default_config_path, LogbookConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking LOGBOOK_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Pick the journal to use and strip its name from the positional text.
///
/// The first token selects a journal when it names one in the config;
/// otherwise the configured default journal is used and the text is
/// left alone.
pub fn select_journal(config: &LogbookConfig, text: &[String]) -> (String, Vec<String>) {
    match text.split_first() {
        Some((first, rest)) if config.has_journal(first) => (first.clone(), rest.to_vec()),
        _ => (config.default_journal.clone(), text.to_vec()),
    }
}
