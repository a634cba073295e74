//! Configuration file.
//!
//! ```toml
//! editor = "vim"
//! encrypt = false
//! tagsymbols = "@"
//! timeformat = "%Y-%m-%d %H:%M"
//! highlight = true
//! default_journal = "default"
//!
//! [journals]
//! default = "~/.local/share/logbook/journal.txt"
//!
//! [journals.work]
//! journal = "~/work.txt"
//! encrypt = true
//! ```
//!
//! Global keys apply to every journal; a journal given as a table
//! overrides them for that journal only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use logbook_core::entry::DEFAULT_TIME_FORMAT;
use logbook_core::fs::write_atomic;
use logbook_core::tags::DEFAULT_TAG_SYMBOLS;
use logbook_core::JournalSettings;

use crate::errors::CliError;

pub const DEFAULT_JOURNAL: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogbookConfig {
    #[serde(default)]
    pub editor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default)]
    pub encrypt: bool,
    #[serde(default = "default_tag_symbols")]
    pub tagsymbols: String,
    #[serde(default = "default_time_format")]
    pub timeformat: String,
    #[serde(default = "default_true")]
    pub highlight: bool,
    #[serde(default = "default_journal_name")]
    pub default_journal: String,
    #[serde(default)]
    pub journals: BTreeMap<String, JournalConfig>,
}

/// A journal is either just a path or a table of overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JournalConfig {
    Path(String),
    Scope(ScopeConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub journal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypt: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagsymbols: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeformat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
}

impl JournalConfig {
    pub fn path(&self) -> &str {
        match self {
            JournalConfig::Path(path) => path,
            JournalConfig::Scope(scope) => &scope.journal,
        }
    }

    /// The same journal as a table with `encrypt` overridden.
    fn with_encrypt(&self, encrypt: bool) -> JournalConfig {
        let scope = match self {
            JournalConfig::Path(path) => ScopeConfig {
                journal: path.clone(),
                ..ScopeConfig::default()
            },
            JournalConfig::Scope(scope) => scope.clone(),
        };
        JournalConfig::Scope(ScopeConfig {
            encrypt: Some(encrypt),
            ..scope
        })
    }
}

fn default_tag_symbols() -> String {
    DEFAULT_TAG_SYMBOLS.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_journal_name() -> String {
    DEFAULT_JOURNAL.to_string()
}

impl LogbookConfig {
    /// Fresh configuration with a single default journal at `journal_path`.
    pub fn new(journal_path: &Path, editor: Option<String>) -> Self {
        let mut journals = BTreeMap::new();
        journals.insert(
            DEFAULT_JOURNAL.to_string(),
            JournalConfig::Path(journal_path.to_string_lossy().to_string()),
        );
        Self {
            editor: editor.unwrap_or_default(),
            template: None,
            encrypt: false,
            tagsymbols: default_tag_symbols(),
            timeformat: default_time_format(),
            highlight: true,
            default_journal: default_journal_name(),
            journals,
        }
    }

    pub fn has_journal(&self, name: &str) -> bool {
        self.journals.contains_key(name)
    }

    /// Settings for journal `name`, its overrides applied over the globals.
    pub fn scoped(&self, name: &str) -> Result<JournalSettings, CliError> {
        let journal = self.journals.get(name).ok_or_else(|| {
            CliError::not_found(
                format!("No journal named '{}' in your configuration", name),
                "Hint: Run `logbook --list` to see configured journals.",
            )
        })?;

        let empty = ScopeConfig::default();
        let scope = match journal {
            JournalConfig::Path(_) => &empty,
            JournalConfig::Scope(scope) => scope,
        };

        let editor = scope
            .editor
            .clone()
            .unwrap_or_else(|| self.editor.clone());
        let template = scope.template.clone().or_else(|| self.template.clone());

        let mut settings = JournalSettings::new(name, expand_path(journal.path()))
            .with_encrypt(scope.encrypt.unwrap_or(self.encrypt))
            .with_tag_symbols(
                scope
                    .tagsymbols
                    .clone()
                    .unwrap_or_else(|| self.tagsymbols.clone()),
            );
        if !editor.trim().is_empty() {
            settings = settings.with_editor(editor);
        }
        settings.template = template
            .filter(|t| !t.trim().is_empty())
            .map(|t| expand_path(&t));
        settings.time_format = scope
            .timeformat
            .clone()
            .unwrap_or_else(|| self.timeformat.clone());
        settings.highlight = scope.highlight.unwrap_or(self.highlight);
        Ok(settings)
    }

    /// Record the encryption state of journal `name` as a journal-local
    /// override, turning a bare path entry into a table if needed.
    pub fn set_journal_encrypt(&mut self, name: &str, encrypt: bool) -> Result<(), CliError> {
        let journal = self.journals.get_mut(name).ok_or_else(|| {
            CliError::not_found(
                format!("No journal named '{}' in your configuration", name),
                "Hint: Run `logbook --list` to see configured journals.",
            )
        })?;
        *journal = journal.with_encrypt(encrypt);
        Ok(())
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_journal_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("journal.txt"))
}

pub fn read_config(path: &Path) -> anyhow::Result<LogbookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &LogbookConfig) -> anyhow::Result<()> {
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "wrote config");
    Ok(())
}

/// Read the config at `path`, installing defaults first if it is missing.
pub fn load_or_install(path: &Path) -> anyhow::Result<LogbookConfig> {
    if path.exists() {
        return read_config(path);
    }

    let editor = ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty());
    let config = LogbookConfig::new(&default_journal_path()?, editor);
    write_config(path, &config)?;
    eprintln!("[Configuration created at {}]", path.display());
    Ok(config)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("logbook"));
        }
    }
    Ok(home_dir()?.join(".config").join("logbook"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("logbook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("logbook"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

/// Expand a leading `~/` to the home directory.
pub fn expand_path(value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => match home_dir() {
            Ok(home) => home.join(rest),
            Err(_) => PathBuf::from(value),
        },
        None => PathBuf::from(value),
    }
}
