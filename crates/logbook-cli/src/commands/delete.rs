use std::io::IsTerminal;

use logbook_core::reconcile::{delete_from_view, DeleteSelector};
use logbook_core::{Entry, LogbookError};

use crate::app::{open_journal, AppContext};
use crate::errors::CliError;
use crate::helpers::confirm;

/// Asks about each entry of the view in turn.
struct ConfirmSelector<'a> {
    time_format: &'a str,
}

impl DeleteSelector for ConfirmSelector<'_> {
    fn select(&mut self, view: &[Entry]) -> logbook_core::Result<Vec<Entry>> {
        let mut doomed = Vec::new();
        for entry in view {
            let prompt = format!("Delete entry '{}'?", entry.short(self.time_format));
            let yes = confirm(&prompt, false)
                .map_err(|e| LogbookError::Aborted(e.to_string()))?;
            if yes {
                doomed.push(entry.clone());
            }
        }
        Ok(doomed)
    }
}

pub fn handle_delete(ctx: &AppContext) -> anyhow::Result<()> {
    if !std::io::stdin().is_terminal() {
        return Err(
            CliError::invalid_input("--delete needs an interactive terminal to confirm").into(),
        );
    }

    let mut journal = open_journal(&ctx.settings)?;
    let mut selector = ConfirmSelector {
        time_format: &ctx.settings.time_format,
    };
    let outcome = delete_from_view(&mut journal, &ctx.intent.criteria(), &mut selector)?;
    eprintln!("{}", outcome.message());
    Ok(())
}
