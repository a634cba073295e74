use std::path::Path;

use crate::config::{expand_path, LogbookConfig};

/// Print configured journals with their paths.
pub fn handle_list(config: &LogbookConfig, config_path: &Path) {
    println!("Journals defined in config ({})", config_path.display());
    let width = config.journals.keys().map(|name| name.len()).max().unwrap_or(0);
    for (name, journal) in &config.journals {
        let marker = if *name == config.default_journal { "*" } else { " " };
        println!(
            "{} {:<width$} -> {}",
            marker,
            name,
            expand_path(journal.path()).display(),
            width = width
        );
    }
}
