//! Delete reconciliation.
//!
//! Candidates come from a filtered view, but removal always runs
//! against the full entry sequence, matching by content.

use crate::entry::Entry;
use crate::error::Result;
use crate::filter::{self, FilterCriteria};
use crate::storage::Journal;

/// Lets the user pick which entries of a view to delete.
pub trait DeleteSelector {
    fn select(&mut self, view: &[Entry]) -> Result<Vec<Entry>>;
}

/// What a delete run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The filter matched nothing; the user was never asked
    NoMatches,
    /// The user confirmed nothing
    NoneSelected,
    /// This many entries were removed and the journal persisted
    Deleted(usize),
}

impl DeleteOutcome {
    pub fn message(&self) -> String {
        match self {
            DeleteOutcome::NoMatches => {
                "No entries deleted, because the search returned no results.".to_string()
            }
            DeleteOutcome::NoneSelected => "No entries deleted.".to_string(),
            DeleteOutcome::Deleted(1) => "[1 entry deleted]".to_string(),
            DeleteOutcome::Deleted(n) => format!("[{} entries deleted]", n),
        }
    }
}

/// Remove each of `doomed` once from `entries`, by content.
///
/// Returns the remaining entries and how many were removed.
pub fn remove_entries(entries: Vec<Entry>, doomed: &[Entry]) -> (Vec<Entry>, usize) {
    let mut pending: Vec<&Entry> = doomed.iter().collect();
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        match pending.iter().position(|candidate| **candidate == entry) {
            Some(idx) => {
                pending.swap_remove(idx);
            }
            None => kept.push(entry),
        }
    }
    let removed = doomed.len() - pending.len();
    (kept, removed)
}

/// Ask which entries of the filtered view to delete and remove them from
/// the full journal.
///
/// The journal is persisted only when at least one entry was removed.
pub fn delete_from_view(
    journal: &mut Journal,
    criteria: &FilterCriteria,
    selector: &mut dyn DeleteSelector,
) -> Result<DeleteOutcome> {
    let full_before = journal.entries().to_vec();
    let view = filter::view(&full_before, criteria);
    if view.is_empty() {
        return Ok(DeleteOutcome::NoMatches);
    }

    let selected = selector.select(&view)?;
    if selected.is_empty() {
        return Ok(DeleteOutcome::NoneSelected);
    }

    let (remaining, removed) = remove_entries(full_before, &selected);
    if removed == 0 {
        return Ok(DeleteOutcome::NoneSelected);
    }
    tracing::debug!(shown = view.len(), removed, remaining = remaining.len(), "reconciled delete");

    journal.set_entries(remaining);
    journal.persist(None)?;
    Ok(DeleteOutcome::Deleted(removed))
}
