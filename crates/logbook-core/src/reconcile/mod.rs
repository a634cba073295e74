//! Reconciliation of interactive edits and deletions.
//!
//! Both procedures show the user a filtered view but apply the result to
//! the complete journal, so entries outside the view are never lost or
//! altered.

pub mod delete;
pub mod edit;

pub use delete::{delete_from_view, DeleteOutcome, DeleteSelector};
pub use edit::{edit_view, EditSession, EditSummary, TextEditor};
