//! Filter engine.
//!
//! Filtering never reorders: the result is always a subsequence of the
//! input. Limiting keeps the most recent (last) entries.

use chrono::NaiveDate;

use crate::entry::Entry;
use crate::tags::normalize_tag;

/// Criteria for narrowing a journal to a view.
///
/// An empty criteria selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Tags to look for (any, or all when `strict`)
    pub tags: Vec<String>,

    /// Tags that must not be present
    pub excluded: Vec<String>,

    /// First day to include
    pub start: Option<NaiveDate>,

    /// Last day to include
    pub end: Option<NaiveDate>,

    /// Require every tag instead of any tag
    pub strict: bool,

    /// Only starred entries
    pub starred: bool,

    /// Case-insensitive substring of title or body
    pub contains: Option<String>,

    /// Keep only the last `n` matches (zero keeps all)
    pub limit: Option<usize>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags.into_iter().map(|t| normalize_tag(t.as_ref())).collect();
        self
    }

    pub fn exclude<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded = tags.into_iter().map(|t| normalize_tag(t.as_ref())).collect();
        self
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Shorthand for a single day: start and end collapse to `date`.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self.end = Some(date);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    pub fn contains(mut self, text: impl Into<String>) -> Self {
        self.contains = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single entry satisfies everything but the limit.
    pub fn matches(&self, entry: &Entry) -> bool {
        let day = entry.date.date();
        if self.start.is_some_and(|start| day < start) {
            return false;
        }
        if self.end.is_some_and(|end| day > end) {
            return false;
        }
        if self.starred && !entry.starred {
            return false;
        }
        if !self.tags.is_empty() {
            let tagged = if self.strict {
                self.tags.iter().all(|tag| entry.has_tag(tag))
            } else {
                self.tags.iter().any(|tag| entry.has_tag(tag))
            };
            if !tagged {
                return false;
            }
        }
        if self.excluded.iter().any(|tag| entry.has_tag(tag)) {
            return false;
        }
        if let Some(needle) = self.contains.as_deref() {
            if !entry.text().to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Entries matching `criteria`, in their original order, without the limit.
pub fn filter(entries: &[Entry], criteria: &FilterCriteria) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| criteria.matches(entry))
        .cloned()
        .collect()
}

/// Keep the last `n` entries; `None` or zero keeps them all.
pub fn limit(mut entries: Vec<Entry>, n: Option<usize>) -> Vec<Entry> {
    match n {
        Some(n) if n > 0 && n < entries.len() => entries.split_off(entries.len() - n),
        _ => entries,
    }
}

/// Filter, then limit: the view shown to the user.
pub fn view(entries: &[Entry], criteria: &FilterCriteria) -> Vec<Entry> {
    limit(filter(entries, criteria), criteria.limit)
}
