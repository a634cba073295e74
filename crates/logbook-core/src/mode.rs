//! Mode resolution.
//!
//! An invocation is a bag of optional flags. [`resolve`] turns it into
//! exactly one [`Mode`] by walking an ordered rule list; the first rule
//! that applies wins. Within the export family, [`ExportAction::select`]
//! picks one terminal action by a fixed precedence.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::filter::FilterCriteria;
use crate::tags::is_tag_word;

/// Where an encryption transition writes its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Replace the journal file itself
    InPlace,
    /// Write a copy to another file
    Path(PathBuf),
}

impl Target {
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Target::InPlace => None,
            Target::Path(path) => Some(path),
        }
    }
}

impl From<Option<PathBuf>> for Target {
    fn from(value: Option<PathBuf>) -> Self {
        value.map(Target::Path).unwrap_or(Target::InPlace)
    }
}

/// Everything the command line asked for, before interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    pub decrypt: Option<Target>,
    pub encrypt: Option<Target>,
    pub export: Option<String>,
    pub output: Option<PathBuf>,
    pub short: bool,
    pub tags: bool,
    pub edit: bool,
    pub delete: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub on_date: Option<NaiveDate>,
    pub limit: Option<usize>,
    pub strict: bool,
    pub starred: bool,
    pub contains: Option<String>,
    pub excluded: Vec<String>,
    pub text: Vec<String>,
}

impl Intent {
    /// Positional text joined back into one string.
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }

    /// Filter criteria for the read and export family.
    ///
    /// Positional words are treated as tags; an "on" date overrides the
    /// start and end dates.
    pub fn criteria(&self) -> FilterCriteria {
        let words: Vec<String> = self
            .joined_text()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let mut criteria = FilterCriteria::new()
            .tags(words)
            .exclude(&self.excluded)
            .strict(self.strict)
            .starred(self.starred);
        criteria.start = self.start_date;
        criteria.end = self.end_date;
        if let Some(day) = self.on_date {
            criteria = criteria.on(day);
        }
        if let Some(needle) = &self.contains {
            criteria = criteria.contains(needle.clone());
        }
        criteria.limit = self.limit;
        criteria
    }
}

/// The single terminal action of the export family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportAction {
    Short,
    Tags,
    Format(String),
    Encrypt(Target),
    Decrypt(Target),
    Edit,
    Delete,
}

impl ExportAction {
    /// First action present in precedence order:
    /// short, tags, export, encrypt, decrypt, edit, delete.
    pub fn select(intent: &Intent) -> Option<ExportAction> {
        let candidates: [Option<ExportAction>; 7] = [
            intent.short.then_some(ExportAction::Short),
            intent.tags.then_some(ExportAction::Tags),
            intent.export.clone().map(ExportAction::Format),
            intent.encrypt.clone().map(ExportAction::Encrypt),
            intent.decrypt.clone().map(ExportAction::Decrypt),
            intent.edit.then_some(ExportAction::Edit),
            intent.delete.then_some(ExportAction::Delete),
        ];
        candidates.into_iter().flatten().next()
    }
}

/// What an invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Write a new entry
    Compose,
    /// Print a filtered view
    Read,
    /// Run one export-family action on a filtered view
    Export(ExportAction),
}

impl Mode {
    pub fn is_compose(&self) -> bool {
        matches!(self, Mode::Compose)
    }
}

type Rule = fn(&Intent, &str) -> Option<Mode>;

/// Resolution rules, highest priority first.
const RULES: [Rule; 4] = [
    export_family,
    read_by_filter_flags,
    read_by_bare_tags,
    compose,
];

/// Resolve the mode for `intent` given the configured tag symbols.
pub fn resolve(intent: &Intent, tag_symbols: &str) -> Mode {
    RULES
        .iter()
        .find_map(|rule| rule(intent, tag_symbols))
        .unwrap_or(Mode::Compose)
}

fn export_family(intent: &Intent, _tag_symbols: &str) -> Option<Mode> {
    ExportAction::select(intent).map(Mode::Export)
}

fn read_by_filter_flags(intent: &Intent, _tag_symbols: &str) -> Option<Mode> {
    let filtering = intent.start_date.is_some()
        || intent.end_date.is_some()
        || intent.on_date.is_some()
        || intent.limit.is_some_and(|n| n > 0)
        || intent.strict
        || intent.starred
        || intent.contains.is_some();
    filtering.then_some(Mode::Read)
}

fn read_by_bare_tags(intent: &Intent, tag_symbols: &str) -> Option<Mode> {
    let text = intent.joined_text();
    let mut words = text.split_whitespace().peekable();
    if words.peek().is_none() {
        return None;
    }
    words
        .all(|word| is_tag_word(word, tag_symbols))
        .then_some(Mode::Read)
}

fn compose(_intent: &Intent, _tag_symbols: &str) -> Option<Mode> {
    Some(Mode::Compose)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn text(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_plain_text_composes() {
        let intent = Intent {
            text: text(&["bought", "milk"]),
            ..Intent::default()
        };
        assert_eq!(resolve(&intent, "@"), Mode::Compose);
    }

    #[test]
    fn test_zero_limit_is_not_a_filter() {
        let intent = Intent {
            limit: Some(0),
            text: text(&["bought", "milk"]),
            ..Intent::default()
        };
        assert_eq!(resolve(&intent, "@"), Mode::Compose);
    }

    #[test]
    fn test_no_arguments_composes() {
        assert_eq!(resolve(&Intent::default(), "@"), Mode::Compose);
    }

    #[test]
    fn test_bare_tags_read() {
        let intent = Intent {
            text: text(&["@work", "@health"]),
            ..Intent::default()
        };
        assert_eq!(resolve(&intent, "@"), Mode::Read);
    }

    #[test]
    fn test_mixed_tags_and_words_compose() {
        let intent = Intent {
            text: text(&["@work", "meeting"]),
            ..Intent::default()
        };
        assert_eq!(resolve(&intent, "@"), Mode::Compose);
    }

    #[test]
    fn test_filter_flags_read() {
        let flagged = [
            Intent {
                start_date: Some(day(1)),
                ..Intent::default()
            },
            Intent {
                end_date: Some(day(1)),
                ..Intent::default()
            },
            Intent {
                on_date: Some(day(1)),
                ..Intent::default()
            },
            Intent {
                limit: Some(3),
                ..Intent::default()
            },
            Intent {
                strict: true,
                ..Intent::default()
            },
            Intent {
                starred: true,
                ..Intent::default()
            },
            Intent {
                contains: Some("x".to_string()),
                text: text(&["not", "tags"]),
                ..Intent::default()
            },
        ];
        for intent in flagged {
            assert_eq!(resolve(&intent, "@"), Mode::Read, "{:?}", intent);
        }
    }

    #[test]
    fn test_export_family_never_composes() {
        let actions = [
            Intent {
                short: true,
                ..Intent::default()
            },
            Intent {
                tags: true,
                ..Intent::default()
            },
            Intent {
                export: Some("json".to_string()),
                ..Intent::default()
            },
            Intent {
                encrypt: Some(Target::InPlace),
                ..Intent::default()
            },
            Intent {
                decrypt: Some(Target::Path(PathBuf::from("out.txt"))),
                ..Intent::default()
            },
            Intent {
                edit: true,
                ..Intent::default()
            },
            Intent {
                delete: true,
                ..Intent::default()
            },
        ];
        for base in actions {
            // Rules 2-4 matching as well must not change the outcome.
            let noisy = Intent {
                limit: Some(1),
                starred: true,
                text: text(&["plain", "words"]),
                ..base.clone()
            };
            for intent in [base, noisy] {
                let mode = resolve(&intent, "@");
                assert!(matches!(mode, Mode::Export(_)), "{:?} -> {:?}", intent, mode);
            }
        }
    }

    #[test]
    fn test_export_action_precedence() {
        let everything = Intent {
            short: true,
            tags: true,
            export: Some("json".to_string()),
            encrypt: Some(Target::InPlace),
            decrypt: Some(Target::InPlace),
            edit: true,
            delete: true,
            ..Intent::default()
        };
        assert_eq!(ExportAction::select(&everything), Some(ExportAction::Short));

        let no_short = Intent {
            short: false,
            ..everything.clone()
        };
        assert_eq!(ExportAction::select(&no_short), Some(ExportAction::Tags));

        let encrypt_and_edit = Intent {
            encrypt: Some(Target::Path(PathBuf::from("x.age"))),
            edit: true,
            delete: true,
            ..Intent::default()
        };
        assert_eq!(
            ExportAction::select(&encrypt_and_edit),
            Some(ExportAction::Encrypt(Target::Path(PathBuf::from("x.age"))))
        );

        let edit_and_delete = Intent {
            edit: true,
            delete: true,
            ..Intent::default()
        };
        assert_eq!(ExportAction::select(&edit_and_delete), Some(ExportAction::Edit));
    }

    #[test]
    fn test_tag_words_with_date_range_still_read() {
        let intent = Intent {
            text: text(&["@work"]),
            start_date: Some(day(1)),
            end_date: Some(day(2)),
            ..Intent::default()
        };
        assert_eq!(resolve(&intent, "@"), Mode::Read);
    }

    #[test]
    fn test_criteria_from_intent() {
        let intent = Intent {
            text: text(&["@Work", "@home"]),
            start_date: Some(day(1)),
            end_date: Some(day(9)),
            on_date: Some(day(4)),
            excluded: text(&["@Skip"]),
            limit: Some(5),
            strict: true,
            ..Intent::default()
        };
        let criteria = intent.criteria();
        assert_eq!(criteria.tags, vec!["@work", "@home"]);
        assert_eq!(criteria.excluded, vec!["@skip"]);
        assert_eq!(criteria.start, Some(day(4)));
        assert_eq!(criteria.end, Some(day(4)));
        assert_eq!(criteria.limit, Some(5));
        assert!(criteria.strict);
    }
}
