//! Edit reconciliation.
//!
//! The user rewrites a filtered view in an editor. Whatever comes back
//! replaces the view; entries that were never shown are carried over
//! untouched, and the merged journal is re-sorted and persisted.

use crate::entry::Entry;
use crate::error::{LogbookError, Result};
use crate::filter::{self, FilterCriteria};
use crate::storage::Journal;

/// Something that lets the user rewrite a block of text.
pub trait TextEditor {
    /// Hand `seed` to the user and return the edited text.
    fn edit(&self, seed: &str) -> Result<String>;
}

/// Counts reported after an edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub deleted: usize,
    pub modified: usize,
}

impl EditSummary {
    /// Status line such as `[1 entry deleted, 2 entries modified]`.
    ///
    /// `None` when nothing changed.
    pub fn message(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.deleted > 0 {
            parts.push(format!("{} {} deleted", self.deleted, noun(self.deleted)));
        }
        if self.modified > 0 {
            parts.push(format!("{} {} modified", self.modified, noun(self.modified)));
        }
        if parts.is_empty() {
            return None;
        }
        Some(format!("[{}]", capitalize(&parts.join(", "))))
    }
}

fn noun(count: usize) -> &'static str {
    if count == 1 {
        "entry"
    } else {
        "entries"
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// State of one edit, from snapshot to merged result.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub full_before: Vec<Entry>,
    pub view_before: Vec<Entry>,
    pub edited_text: String,
    pub parsed_after: Vec<Entry>,
    pub deleted_count: usize,
    pub modified_count: usize,
    pub final_entries: Vec<Entry>,
}

impl EditSession {
    /// Diff and merge an edit.
    ///
    /// `parsed_after` is the edited text already parsed into entries.
    /// The final entries are `parsed_after` followed by every entry of
    /// `full_before` that was not in `view_before`, sorted by timestamp.
    pub fn reconcile(
        full_before: Vec<Entry>,
        view_before: Vec<Entry>,
        edited_text: String,
        mut parsed_after: Vec<Entry>,
        time_format: &str,
    ) -> Self {
        let other = other_entries(&full_before, &view_before);
        let deleted_count = view_before.len().saturating_sub(parsed_after.len());
        let modified_count = mark_modified(&view_before, &mut parsed_after, time_format);

        let mut final_entries = Vec::with_capacity(parsed_after.len() + other.len());
        final_entries.extend(parsed_after.iter().cloned());
        final_entries.extend(other);
        final_entries.sort_by_key(|entry| entry.date);

        Self {
            full_before,
            view_before,
            edited_text,
            parsed_after,
            deleted_count,
            modified_count,
            final_entries,
        }
    }

    pub fn summary(&self) -> EditSummary {
        EditSummary {
            deleted: self.deleted_count,
            modified: self.modified_count,
        }
    }
}

/// Entries of `full` that are not part of `view`.
///
/// Matching is by content and consumes one view entry per match, so two
/// identical entries where only one was shown keep the other one.
pub fn other_entries(full: &[Entry], view: &[Entry]) -> Vec<Entry> {
    let mut unmatched: Vec<&Entry> = view.iter().collect();
    let mut other = Vec::new();
    for entry in full {
        match unmatched.iter().position(|candidate| *candidate == entry) {
            Some(idx) => {
                unmatched.swap_remove(idx);
            }
            None => other.push(entry.clone()),
        }
    }
    other
}

/// Positional diff: flag each parsed entry whose rendering differs from
/// the entry that sat at the same position before the edit.
///
/// Returns how many entries were flagged.
pub fn mark_modified(before: &[Entry], after: &mut [Entry], time_format: &str) -> usize {
    let mut modified = 0;
    for (idx, entry) in after.iter_mut().enumerate() {
        entry.modified = match before.get(idx) {
            Some(old) => old.render(time_format) != entry.render(time_format),
            None => true,
        };
        if entry.modified {
            modified += 1;
        }
    }
    modified
}

/// Run a full edit against `journal`: filter, edit, reconcile, persist.
///
/// Nothing is written unless an editor is configured, the editor
/// succeeds and its output parses.
pub fn edit_view(
    journal: &mut Journal,
    criteria: &FilterCriteria,
    editor: &dyn TextEditor,
) -> Result<EditSummary> {
    if journal.settings().editor.is_none() {
        return Err(LogbookError::ConfigurationMissing("editor".to_string()));
    }

    let full_before = journal.entries().to_vec();
    let view_before = filter::view(&full_before, criteria);
    let seed = journal.serialize_editable(&view_before);

    let edited_text = editor.edit(&seed)?;
    let parsed_after = journal.parse_editable(&edited_text)?;

    let time_format = journal.settings().time_format.clone();
    let session = EditSession::reconcile(
        full_before,
        view_before,
        edited_text,
        parsed_after,
        &time_format,
    );
    tracing::debug!(
        shown = session.view_before.len(),
        returned = session.parsed_after.len(),
        deleted = session.deleted_count,
        modified = session.modified_count,
        total = session.final_entries.len(),
        "reconciled edit"
    );

    let summary = session.summary();
    journal.set_entries(session.final_entries);
    journal.persist(None)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::DEFAULT_TIME_FORMAT;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn entry(day: u32, text: &str) -> Entry {
        Entry::new(at(day), text, "@")
    }

    #[test]
    fn test_summary_messages() {
        assert_eq!(EditSummary::default().message(), None);
        assert_eq!(
            EditSummary {
                deleted: 1,
                modified: 0
            }
            .message()
            .as_deref(),
            Some("[1 entry deleted]")
        );
        assert_eq!(
            EditSummary {
                deleted: 0,
                modified: 3
            }
            .message()
            .as_deref(),
            Some("[3 entries modified]")
        );
    }

    #[test]
    fn test_summary_pluralizes_each_clause_on_its_own_count() {
        let summary = EditSummary {
            deleted: 1,
            modified: 2,
        };
        assert_eq!(
            summary.message().as_deref(),
            Some("[1 entry deleted, 2 entries modified]")
        );

        let summary = EditSummary {
            deleted: 2,
            modified: 1,
        };
        assert_eq!(
            summary.message().as_deref(),
            Some("[2 entries deleted, 1 entry modified]")
        );
    }

    #[test]
    fn test_other_entries_by_content() {
        let full = vec![entry(1, "a"), entry(2, "b"), entry(3, "c")];
        let view = vec![full[1].clone()];
        assert_eq!(other_entries(&full, &view), vec![entry(1, "a"), entry(3, "c")]);
    }

    #[test]
    fn test_other_entries_keeps_unshown_duplicate() {
        let full = vec![entry(1, "same"), entry(1, "same")];
        let view = vec![full[1].clone()];
        assert_eq!(other_entries(&full, &view).len(), 1);
    }

    #[test]
    fn test_mark_modified_positional() {
        let before = vec![entry(1, "a"), entry(2, "b")];
        let mut after = vec![entry(1, "a"), entry(2, "b changed"), entry(3, "new")];
        let count = mark_modified(&before, &mut after, DEFAULT_TIME_FORMAT);
        assert_eq!(count, 2);
        assert!(!after[0].modified);
        assert!(after[1].modified);
        assert!(after[2].modified);
    }

    #[test]
    fn test_reconcile_five_three_two() {
        let full: Vec<Entry> = (1..=5).map(|d| entry(d, &format!("entry {}", d))).collect();
        let view = vec![full[1].clone(), full[2].clone(), full[3].clone()];
        let parsed = vec![full[1].clone(), entry(4, "entry 4 reworded")];

        let session =
            EditSession::reconcile(full, view, String::new(), parsed, DEFAULT_TIME_FORMAT);

        assert_eq!(session.deleted_count, 1);
        assert_eq!(session.final_entries.len(), 4);
        let titles: Vec<&str> = session
            .final_entries
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["entry 1", "entry 2", "entry 4 reworded", "entry 5"]);
    }

    #[test]
    fn test_reconcile_unchanged_is_noop() {
        let full: Vec<Entry> = (1..=4).map(|d| entry(d, &format!("entry {}", d))).collect();
        let view = vec![full[0].clone(), full[3].clone()];
        let parsed = view.clone();

        let session =
            EditSession::reconcile(full.clone(), view, String::new(), parsed, DEFAULT_TIME_FORMAT);

        assert_eq!(session.summary(), EditSummary::default());
        assert_eq!(session.final_entries, full);
    }

    #[test]
    fn test_reconcile_never_touches_unseen_entries() {
        let full = vec![entry(1, "hidden @private"), entry(2, "shown")];
        let view = vec![full[1].clone()];
        let parsed = vec![];

        let session =
            EditSession::reconcile(full.clone(), view, String::new(), parsed, DEFAULT_TIME_FORMAT);

        assert_eq!(session.final_entries, vec![full[0].clone()]);
        assert!(!session.final_entries[0].modified);
    }
}
