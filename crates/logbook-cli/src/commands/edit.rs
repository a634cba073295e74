use logbook_core::reconcile::edit_view;

use crate::app::{open_journal, AppContext};
use crate::errors::CliError;
use crate::helpers::ExternalEditor;

/// Open the filtered view in the editor and merge the result back.
pub fn handle_edit(ctx: &AppContext) -> anyhow::Result<()> {
    let Some(command) = ctx.settings.editor.as_deref() else {
        return Err(CliError::config_missing("editor", &ctx.config_path).into());
    };
    let editor = ExternalEditor::new(command);

    let mut journal = open_journal(&ctx.settings)?;
    let summary = edit_view(&mut journal, &ctx.intent.criteria(), &editor)?;
    if let Some(message) = summary.message() {
        eprintln!("{}", message);
    }
    Ok(())
}
