//! Command handlers, one per mode or export-family action.

pub mod compose;
pub mod crypt;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod read;

use logbook_core::{ExportAction, Mode};

use crate::app::AppContext;

/// Run whatever the resolved mode asks for.
pub fn dispatch(ctx: &mut AppContext) -> anyhow::Result<()> {
    match ctx.mode.clone() {
        Mode::Compose => compose::handle_compose(ctx),
        Mode::Read => read::handle_read(ctx),
        Mode::Export(action) => match action {
            ExportAction::Short => read::handle_short(ctx),
            ExportAction::Tags => export::handle_tags(ctx),
            ExportAction::Format(format) => export::handle_export(ctx, &format),
            ExportAction::Encrypt(target) => crypt::handle_encrypt(ctx, &target),
            ExportAction::Decrypt(target) => crypt::handle_decrypt(ctx, &target),
            ExportAction::Edit => edit::handle_edit(ctx),
            ExportAction::Delete => delete::handle_delete(ctx),
        },
    }
}
