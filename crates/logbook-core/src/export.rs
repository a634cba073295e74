//! Exporters.
//!
//! Every exporter turns a filtered view into one string. Writing to a
//! file goes through the same atomic replace as the journal itself.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Datelike;
use serde::Serialize;

use crate::entry::Entry;
use crate::error::{LogbookError, Result};
use crate::fs::write_atomic;

/// Message printed when a journal has no tags at all.
pub const NO_TAGS_MESSAGE: &str = "[No tags found in journal.]";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
    Markdown,
    Tags,
}

impl ExportFormat {
    pub const NAMES: [&'static str; 6] = ["json", "text", "txt", "markdown", "md", "tags"];
}

impl FromStr for ExportFormat {
    type Err = LogbookError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "tags" => Ok(ExportFormat::Tags),
            other => Err(LogbookError::InvalidInput(format!(
                "Unknown export format '{}' (expected one of: {})",
                other,
                ExportFormat::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Tags => "tags",
        };
        f.write_str(name)
    }
}

/// Result of an export: either text for stdout or the file written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutput {
    Printed(String),
    Written(PathBuf),
}

impl ExportOutput {
    /// Status line for a file export.
    pub fn message(&self) -> Option<String> {
        match self {
            ExportOutput::Printed(_) => None,
            ExportOutput::Written(path) => {
                Some(format!("[Journal exported to {}]", path.display()))
            }
        }
    }
}

/// Tag frequencies, most used first, ties broken by name.
pub fn tag_counts(entries: &[Entry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        for tag in &entry.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// `tag : count` lines, or [`NO_TAGS_MESSAGE`].
pub fn render_tags(entries: &[Entry]) -> String {
    let counts = tag_counts(entries);
    if counts.is_empty() {
        return NO_TAGS_MESSAGE.to_string();
    }
    let width = counts.iter().map(|(tag, _)| tag.chars().count()).max().unwrap_or(0);
    counts
        .iter()
        .map(|(tag, count)| format!("{:<width$} : {}", tag, count, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per entry: timestamp and title.
pub fn render_short(entries: &[Entry], time_format: &str) -> String {
    entries
        .iter()
        .map(|entry| entry.short(time_format))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    title: &'a str,
    body: &'a str,
    date: String,
    time: String,
    starred: bool,
    tags: &'a [String],
}

#[derive(Serialize)]
struct JsonExport<'a> {
    tags: BTreeMap<String, usize>,
    entries: Vec<JsonEntry<'a>>,
}

fn render_json(entries: &[Entry]) -> Result<String> {
    let export = JsonExport {
        tags: tag_counts(entries).into_iter().collect(),
        entries: entries
            .iter()
            .map(|entry| JsonEntry {
                title: &entry.title,
                body: &entry.body,
                date: entry.date.format("%Y-%m-%d").to_string(),
                time: entry.date.format("%H:%M").to_string(),
                starred: entry.starred,
                tags: &entry.tags,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

fn render_markdown(entries: &[Entry], time_format: &str) -> String {
    let mut out = String::new();
    let mut year = None;
    let mut month = None;
    for entry in entries {
        let date = entry.date.date();
        if year != Some(date.year()) {
            year = Some(date.year());
            month = None;
            out.push_str(&format!("# {}\n\n", date.year()));
        }
        if month != Some(date.month()) {
            month = Some(date.month());
            out.push_str(&format!("## {}\n\n", entry.date.format("%B")));
        }
        out.push_str(&format!(
            "### {} {}\n\n",
            entry.date.format(time_format),
            entry.title
        ));
        if !entry.body.is_empty() {
            out.push_str(&entry.body);
            out.push_str("\n\n");
        }
    }
    out.trim_end().to_string()
}

/// Render `entries` in `format`.
pub fn export(entries: &[Entry], format: ExportFormat, time_format: &str) -> Result<String> {
    match format {
        ExportFormat::Json => render_json(entries),
        ExportFormat::Text => Ok(crate::storage::format::render_entries(entries, time_format)),
        ExportFormat::Markdown => Ok(render_markdown(entries, time_format)),
        ExportFormat::Tags => Ok(render_tags(entries)),
    }
}

/// Render `entries` and either return the text or write it to `output`.
pub fn export_to(
    entries: &[Entry],
    format: ExportFormat,
    time_format: &str,
    output: Option<&Path>,
) -> Result<ExportOutput> {
    let text = export(entries, format, time_format)?;
    match output {
        None => Ok(ExportOutput::Printed(text)),
        Some(path) => {
            let mut bytes = text.into_bytes();
            if !bytes.ends_with(b"\n") {
                bytes.push(b'\n');
            }
            write_atomic(path, &bytes)?;
            tracing::debug!(format = %format, entries = entries.len(), path = %path.display(), "exported");
            Ok(ExportOutput::Written(path.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::DEFAULT_TIME_FORMAT;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::tempdir;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap()
    }

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new(at(2023, 12, 31), "Year end. Quiet @home", "@"),
            Entry::new(at(2024, 1, 2), "Back at it @work @home", "@"),
            Entry::new(at(2024, 1, 3), "Review @work *", "@"),
        ]
    }

    #[test]
    fn test_format_names() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        let err = "yaml".parse::<ExportFormat>().unwrap_err();
        assert!(err.to_string().contains("markdown"));
    }

    #[test]
    fn test_tag_counts_sorted_by_count_then_name() {
        let counts = tag_counts(&sample());
        assert_eq!(
            counts,
            vec![("@home".to_string(), 2), ("@work".to_string(), 2)]
        );

        let extra = vec![Entry::new(at(2024, 1, 4), "@zeta @zeta-two @work", "@")];
        let mut all = sample();
        all.extend(extra);
        assert_eq!(tag_counts(&all)[0], ("@work".to_string(), 3));
    }

    #[test]
    fn test_render_tags_empty() {
        let entries = vec![Entry::new(at(2024, 1, 1), "no tags here", "@")];
        assert_eq!(render_tags(&entries), NO_TAGS_MESSAGE);
    }

    #[test]
    fn test_json_schema() {
        let text = export(&sample(), ExportFormat::Json, DEFAULT_TIME_FORMAT).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tags"]["@work"], 2);
        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["title"], "Year end.");
        assert_eq!(entries[0]["body"], "Quiet @home");
        assert_eq!(entries[0]["date"], "2023-12-31");
        assert_eq!(entries[0]["time"], "10:15");
        assert_eq!(entries[2]["starred"], true);
    }

    #[test]
    fn test_markdown_groups_by_year_and_month() {
        let text = export(&sample(), ExportFormat::Markdown, DEFAULT_TIME_FORMAT).unwrap();
        let headings: Vec<&str> = text.lines().filter(|l| l.starts_with('#')).collect();
        assert_eq!(
            headings,
            vec![
                "# 2023",
                "## December",
                "### 2023-12-31 10:15 Year end.",
                "# 2024",
                "## January",
                "### 2024-01-02 10:15 Back at it @work @home",
                "### 2024-01-03 10:15 Review @work",
            ]
        );
    }

    #[test]
    fn test_export_to_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("journal.txt");

        let output = export_to(&sample(), ExportFormat::Text, DEFAULT_TIME_FORMAT, Some(&path))
            .unwrap();

        assert_eq!(
            output.message(),
            Some(format!("[Journal exported to {}]", path.display()))
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("[2023-12-31 10:15] Year end.\nQuiet @home\n"));
    }

    #[test]
    fn test_export_without_output_prints() {
        let output = export_to(&sample(), ExportFormat::Tags, DEFAULT_TIME_FORMAT, None).unwrap();
        assert!(matches!(output, ExportOutput::Printed(_)));
        assert_eq!(output.message(), None);
    }
}
