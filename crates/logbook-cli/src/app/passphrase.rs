//! Passphrase resolution and journal opening with retry logic.

use std::io::IsTerminal;

use logbook_core::{AgeCodec, Journal, JournalSettings, LogbookError, PlainCodec};

use crate::constants::MAX_PASSPHRASE_ATTEMPTS;
use crate::errors::CliError;
use crate::helpers::{env_passphrase, prompt_new_passphrase, prompt_passphrase};
use crate::security::Keychain;

/// Open the journal described by `settings`, asking for a passphrase
/// when it is encrypted.
///
/// Passphrase sources, in order: LOGBOOK_PASSPHRASE, the keychain, then
/// an interactive prompt with a limited number of attempts. A missing
/// encrypted journal asks for a new passphrase instead.
pub fn open_journal(settings: &JournalSettings) -> anyhow::Result<Journal> {
    if !settings.encrypt {
        return Ok(Journal::open(settings.clone(), Box::new(PlainCodec))?);
    }

    if !settings.path.exists() {
        eprintln!(
            "[Journal '{}' does not exist yet; choose a passphrase]",
            settings.name
        );
        let passphrase = prompt_new_passphrase()?;
        return Ok(open_with(settings, &passphrase)?);
    }

    if let Some(passphrase) = env_passphrase() {
        return match open_with(settings, &passphrase) {
            Ok(journal) => Ok(journal),
            Err(LogbookError::IncorrectPassphrase) => {
                Err(CliError::auth_failed("Incorrect passphrase.").into())
            }
            Err(err) => Err(err.into()),
        };
    }

    if let Some(journal) = try_keychain_passphrase(settings)? {
        return Ok(journal);
    }

    open_with_retry_prompt(settings)
}

fn open_with(settings: &JournalSettings, passphrase: &str) -> logbook_core::Result<Journal> {
    Journal::open(settings.clone(), Box::new(AgeCodec::new(passphrase)))
}

fn try_keychain_passphrase(settings: &JournalSettings) -> anyhow::Result<Option<Journal>> {
    let keychain = Keychain::for_journal(&settings.name);
    match keychain.load() {
        Ok(Some(passphrase)) => match open_with(settings, &passphrase) {
            Ok(journal) => Ok(Some(journal)),
            Err(LogbookError::IncorrectPassphrase) => {
                tracing::debug!(journal = %settings.name, "stale keychain passphrase");
                let _ = keychain.clear();
                Ok(None)
            }
            Err(err) => Err(err.into()),
        },
        Ok(None) => Ok(None),
        Err(err) => {
            tracing::debug!(error = %err, "keychain unavailable");
            Ok(None)
        }
    }
}

fn open_with_retry_prompt(settings: &JournalSettings) -> anyhow::Result<Journal> {
    let interactive = std::io::stdin().is_terminal();
    let max_attempts = if interactive {
        MAX_PASSPHRASE_ATTEMPTS
    } else {
        1
    };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let passphrase = prompt_passphrase(interactive)?;
        match open_with(settings, &passphrase) {
            Ok(journal) => return Ok(journal),
            Err(LogbookError::IncorrectPassphrase) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    return Err(CliError::auth_failed_with_hint(
                        "Too many failed passphrase attempts.",
                        "Hint: If you forgot your passphrase, the journal cannot be recovered.",
                    )
                    .into());
                }
                eprintln!(
                    "Incorrect passphrase. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}
