//! Input handling helpers for passphrases, confirmations and entry text.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::{Confirm, Password};
use zeroize::Zeroizing;

use logbook_core::crypto::validate_passphrase;
use logbook_core::reconcile::TextEditor;
use logbook_core::JournalSettings;

use super::editor::ExternalEditor;
use crate::constants::PASSPHRASE_ENV;
use crate::errors::CliError;

/// Passphrase from LOGBOOK_PASSPHRASE, if set and not blank.
pub fn env_passphrase() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt for the passphrase of an existing journal.
pub fn prompt_passphrase(interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_passphrase() {
        return Ok(value);
    }
    if !interactive {
        return Err(CliError::auth_failed_with_hint(
            "No passphrase provided and no TTY available.",
            format!("Hint: Set {} or store the passphrase in your keychain.", PASSPHRASE_ENV),
        )
        .into());
    }
    Password::new()
        .with_prompt("Passphrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(prompt_error)
}

/// Prompt for a new passphrase with confirmation, or take it from
/// LOGBOOK_PASSPHRASE. Either way it must pass validation.
pub fn prompt_new_passphrase() -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = env_passphrase() {
        validate_passphrase(&value).map_err(|e| {
            CliError::invalid_input(format!("Passphrase does not meet requirements: {}", e))
        })?;
        return Ok(value);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "A new passphrase is needed but no TTY is available. Set {}.",
            PASSPHRASE_ENV
        ))
        .into());
    }
    loop {
        let passphrase = Password::new()
            .with_prompt("Enter new passphrase")
            .with_confirmation("Confirm passphrase", "Passphrases do not match")
            .interact()
            .map(Zeroizing::new)
            .map_err(prompt_error)?;
        if let Err(err) = validate_passphrase(&passphrase) {
            eprintln!("Passphrase does not meet requirements: {}", err);
            continue;
        }
        return Ok(passphrase);
    }
}

/// Yes/no question on the terminal.
pub fn confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(err: dialoguer::Error) -> anyhow::Error {
    match err {
        dialoguer::Error::IO(io_err) if io_err.kind() == io::ErrorKind::Interrupted => {
            CliError::cancelled("Cancelled.").into()
        }
        other => anyhow::anyhow!("Failed to read input: {}", other),
    }
}

/// Where the text of a new entry can come from.
pub struct EntrySource<'a> {
    /// Whether stdin is attached to a terminal.
    pub interactive: bool,
    /// The configured editor, if any.
    pub editor: Option<&'a dyn TextEditor>,
    /// Seed for the editor.
    pub template: Option<&'a Path>,
    /// Piped input, or the terminal when no editor is set.
    pub reader: &'a mut dyn Read,
}

/// Text for a new entry, read from the real stdin and configured editor.
pub fn read_entry_text(text: &str, settings: &JournalSettings) -> anyhow::Result<Option<String>> {
    let editor = settings.editor.as_deref().map(ExternalEditor::new);
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let source = EntrySource {
        interactive: stdin.is_terminal(),
        editor: editor.as_ref().map(|e| e as &dyn TextEditor),
        template: settings.template.as_deref(),
        reader: &mut reader,
    };
    acquire_entry_text(text, source)
}

/// Text for a new entry.
///
/// Positional text wins. Otherwise piped input is read whole; on a
/// terminal the editor is launched, seeded with the template; without an
/// editor the terminal is read until end of input.
///
/// Returns `None` when there is nothing to write.
pub fn acquire_entry_text(text: &str, source: EntrySource<'_>) -> anyhow::Result<Option<String>> {
    if !text.trim().is_empty() {
        return Ok(Some(text.trim().to_string()));
    }

    let mut template = String::new();
    let raw = if !source.interactive {
        read_all(source.reader)?
    } else if let Some(editor) = source.editor {
        if let Some(path) = source.template {
            template = std::fs::read_to_string(path).map_err(|e| {
                anyhow::anyhow!("Failed to read template {}: {}", path.display(), e)
            })?;
        }
        editor.edit(&template)?
    } else {
        eprintln!("[Writing entry; on a blank line, press Ctrl+D to finish writing]");
        read_all(source.reader)?
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || (!template.is_empty() && trimmed == template.trim()) {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

fn read_all(reader: &mut dyn Read) -> anyhow::Result<String> {
    let mut buffer = String::new();
    match reader.read_to_string(&mut buffer) {
        Ok(_) => Ok(buffer),
        Err(err) if err.kind() == io::ErrorKind::Interrupted => {
            Err(CliError::cancelled("[Entry NOT saved to journal]").into())
        }
        Err(err) => Err(anyhow::anyhow!("Failed to read stdin: {}", err)),
    }
}
