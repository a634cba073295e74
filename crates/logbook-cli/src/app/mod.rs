//! Application context: configuration, selected journal and mode.

pub mod passphrase;
pub mod resolver;

use std::path::PathBuf;

use logbook_core::mode::resolve;
use logbook_core::{Intent, JournalSettings, Mode};

use crate::cli::Cli;
use crate::config::{load_or_install, LogbookConfig};

pub use passphrase::open_journal;
pub use resolver::{resolve_config_path, select_journal};

/// Everything a command needs, resolved once per invocation.
pub struct AppContext {
    pub config_path: PathBuf,
    pub config: LogbookConfig,
    pub settings: JournalSettings,
    pub intent: Intent,
    pub mode: Mode,
}

impl AppContext {
    pub fn new(cli: &Cli, config_path: PathBuf, config: LogbookConfig) -> anyhow::Result<Self> {
        let (journal, text) = select_journal(&config, &cli.text);
        let settings = config.scoped(&journal)?;
        let intent = cli.intent(text);
        let mode = resolve(&intent, &settings.tag_symbols);
        tracing::debug!(journal = %settings.name, ?mode, "resolved invocation");
        Ok(Self {
            config_path,
            config,
            settings,
            intent,
            mode,
        })
    }

    /// Resolve the config path and load (or install) the config.
    pub fn load_config() -> anyhow::Result<(PathBuf, LogbookConfig)> {
        let config_path = resolve_config_path()?;
        let config = load_or_install(&config_path)?;
        Ok((config_path, config))
    }
}
