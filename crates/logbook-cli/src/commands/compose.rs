use chrono::Local;

use crate::app::{open_journal, AppContext};
use crate::helpers::read_entry_text;

/// Write one new entry. The journal is unlocked before any text is
/// collected so a failed passphrase never costs a typed entry.
pub fn handle_compose(ctx: &AppContext) -> anyhow::Result<()> {
    let mut journal = open_journal(&ctx.settings)?;

    let Some(text) = read_entry_text(&ctx.intent.joined_text(), &ctx.settings)? else {
        eprintln!("[Nothing saved to file]");
        return Ok(());
    };

    journal.new_entry(&text, Local::now().naive_local());
    journal.sort();
    journal.persist(None)?;

    eprintln!("[Entry added to {} journal]", ctx.settings.name);
    Ok(())
}
