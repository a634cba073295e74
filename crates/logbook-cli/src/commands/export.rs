use logbook_core::export::{export_to, render_tags, ExportFormat, ExportOutput};
use logbook_core::filter;

use crate::app::{open_journal, AppContext};

/// Tag frequencies over the filtered view.
pub fn handle_tags(ctx: &AppContext) -> anyhow::Result<()> {
    let journal = open_journal(&ctx.settings)?;
    let view = filter::view(journal.entries(), &ctx.intent.criteria());
    println!("{}", render_tags(&view));
    Ok(())
}

/// Export the filtered view to stdout or to `-o PATH`.
pub fn handle_export(ctx: &AppContext, format: &str) -> anyhow::Result<()> {
    // Reject unknown formats before asking for a passphrase
    let format: ExportFormat = format.parse()?;
    let journal = open_journal(&ctx.settings)?;
    let view = filter::view(journal.entries(), &ctx.intent.criteria());

    let output = export_to(
        &view,
        format,
        &ctx.settings.time_format,
        ctx.intent.output.as_deref(),
    )?;
    match &output {
        ExportOutput::Printed(text) => println!("{}", text),
        ExportOutput::Written(_) => {
            if let Some(message) = output.message() {
                eprintln!("{}", message);
            }
        }
    }
    Ok(())
}
