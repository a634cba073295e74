use logbook_core::export::render_short;
use logbook_core::filter;

use crate::app::{open_journal, AppContext};
use crate::output::print_entries;

/// Print the filtered view in full.
pub fn handle_read(ctx: &AppContext) -> anyhow::Result<()> {
    let journal = open_journal(&ctx.settings)?;
    let view = filter::view(journal.entries(), &ctx.intent.criteria());
    tracing::debug!(total = journal.len(), shown = view.len(), "read");
    print_entries(&view, &ctx.settings);
    Ok(())
}

/// Print one line per entry of the filtered view.
pub fn handle_short(ctx: &AppContext) -> anyhow::Result<()> {
    let journal = open_journal(&ctx.settings)?;
    let view = filter::view(journal.entries(), &ctx.intent.criteria());
    if !view.is_empty() {
        println!("{}", render_short(&view, &ctx.settings.time_format));
    }
    Ok(())
}
