//! Launching the configured editor on a temp file.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use logbook_core::reconcile::TextEditor;
use logbook_core::{LogbookError, Result};

/// The editor named by the `editor` config key, e.g. `vim` or `code --wait`.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn temp_path() -> Result<PathBuf> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| LogbookError::Storage(format!("System time error: {}", e)))?
            .as_nanos();
        let filename = format!("logbook_{}_{}.txt", std::process::id(), nanos);
        Ok(std::env::temp_dir().join(filename))
    }

    /// Program and arguments, split with shell quoting rules.
    fn argv(&self) -> Result<(String, Vec<String>)> {
        let mut words = shell_words::split(&self.command).map_err(|e| {
            LogbookError::InvalidInput(format!("Cannot parse editor '{}': {}", self.command, e))
        })?;
        if words.is_empty() {
            return Err(LogbookError::ConfigurationMissing("editor".to_string()));
        }
        let program = words.remove(0);
        Ok((program, words))
    }

    fn run(&self, path: &Path) -> Result<String> {
        let (program, args) = self.argv()?;

        let status = Command::new(&program)
            .args(&args)
            .arg(path)
            .status()
            .map_err(|e| {
                LogbookError::Storage(format!("Failed to launch editor '{}': {}", program, e))
            })?;
        if !status.success() {
            return Err(LogbookError::Aborted(format!(
                "Editor '{}' exited with failure",
                program
            )));
        }

        std::fs::read_to_string(path)
            .map_err(|e| LogbookError::Storage(format!("Failed to read temp file: {}", e)))
    }
}

impl TextEditor for ExternalEditor {
    fn edit(&self, seed: &str) -> Result<String> {
        let path = Self::temp_path()?;
        std::fs::write(&path, seed)
            .map_err(|e| LogbookError::Storage(format!("Failed to create temp file: {}", e)))?;
        set_file_permissions(&path)?;
        tracing::debug!(path = %path.display(), "launching editor");

        let result = self.run(&path);
        let _ = std::fs::remove_file(&path);
        result
    }
}

/// Temp files may hold decrypted entries; keep them private.
fn set_file_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_editor_output_is_returned() {
        // `true` leaves the file as written
        let editor = ExternalEditor::new("true");
        assert_eq!(editor.edit("seed text\n").unwrap(), "seed text\n");
    }

    #[test]
    fn test_failing_editor_aborts() {
        let editor = ExternalEditor::new("false");
        assert!(matches!(editor.edit("x"), Err(LogbookError::Aborted(_))));
    }

    #[test]
    fn test_quoted_program_path_keeps_spaces() {
        let editor = ExternalEditor::new("'/Applications/Sublime Text.app/bin/subl' -w");
        let (program, args) = editor.argv().unwrap();
        assert_eq!(program, "/Applications/Sublime Text.app/bin/subl");
        assert_eq!(args, vec!["-w"]);
    }

    #[test]
    fn test_unbalanced_quote_is_invalid() {
        let editor = ExternalEditor::new("'vim");
        assert!(matches!(editor.edit("x"), Err(LogbookError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_editor_is_missing_config() {
        let editor = ExternalEditor::new("   ");
        assert!(matches!(
            editor.edit("x"),
            Err(LogbookError::ConfigurationMissing(_))
        ));
    }

    #[test]
    fn test_missing_program_is_storage_error() {
        let editor = ExternalEditor::new("logbook-no-such-editor-binary");
        assert!(matches!(editor.edit("x"), Err(LogbookError::Storage(_))));
    }
}
