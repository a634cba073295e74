use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use clap_complete::Shell;

use logbook_core::{Intent, Target, VERSION};

use crate::helpers::parse_date;

/// Logbook - a plain-text, optionally encrypted, command-line journal
///
/// Write an entry by passing its text, or pipe it in. Passing only tags
/// (words starting with a tag symbol) or any filter flag reads entries
/// instead.
#[derive(Parser, Debug)]
#[command(name = "logbook")]
#[command(author, version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Entry text, or tags to filter by. A leading journal name selects that journal.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Show entries on or after this date (YYYY-MM-DD, today, yesterday)
    #[arg(long = "from", value_name = "DATE", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Show entries on or before this date
    #[arg(long = "to", visible_alias = "until", value_name = "DATE", value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Show entries on this date only
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub on: Option<NaiveDate>,

    /// Show entries containing this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub contains: Option<String>,

    /// Require every given tag instead of any of them
    #[arg(long = "and")]
    pub strict: bool,

    /// Show only starred entries
    #[arg(long)]
    pub starred: bool,

    /// Show only the last N entries
    #[arg(short = 'n', value_name = "N")]
    pub limit: Option<usize>,

    /// Exclude entries with this tag (repeatable)
    #[arg(long = "not", value_name = "TAG")]
    pub excluded: Vec<String>,

    /// Show only timestamps and titles
    #[arg(long)]
    pub short: bool,

    /// List tags by frequency
    #[arg(long)]
    pub tags: bool,

    /// Export entries: json, text, markdown, tags
    #[arg(long, value_name = "FORMAT")]
    pub export: Option<String>,

    /// Write the export to a file instead of stdout
    #[arg(short = 'o', long = "file", value_name = "PATH", requires = "export")]
    pub output: Option<PathBuf>,

    /// Encrypt the journal in place, or write an encrypted copy to PATH
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub encrypt: Option<Option<PathBuf>>,

    /// Decrypt the journal in place, or write a plain copy to PATH
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub decrypt: Option<Option<PathBuf>>,

    /// Open the selected entries in your editor
    #[arg(long)]
    pub edit: bool,

    /// Interactively delete the selected entries
    #[arg(long)]
    pub delete: bool,

    /// List configured journals
    #[arg(long)]
    pub list: bool,

    /// Print debug logs to stderr
    #[arg(long)]
    pub debug: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Turn parsed flags into an intent, with `text` already stripped of
    /// any journal name.
    pub fn intent(&self, text: Vec<String>) -> Intent {
        Intent {
            decrypt: self.decrypt.clone().map(Target::from),
            encrypt: self.encrypt.clone().map(Target::from),
            export: self.export.clone(),
            output: self.output.clone(),
            short: self.short,
            tags: self.tags,
            edit: self.edit,
            delete: self.delete,
            start_date: self.from,
            end_date: self.to,
            on_date: self.on,
            limit: self.limit,
            strict: self.strict,
            starred: self.starred,
            contains: self.contains.clone(),
            excluded: self.excluded.clone(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_encrypt_without_path_is_in_place() {
        let cli = Cli::try_parse_from(["logbook", "--encrypt"]).unwrap();
        let intent = cli.intent(Vec::new());
        assert_eq!(intent.encrypt, Some(Target::InPlace));
        assert_eq!(intent.decrypt, None);
    }

    #[test]
    fn test_decrypt_with_path() {
        let cli = Cli::try_parse_from(["logbook", "--decrypt", "plain.txt"]).unwrap();
        let intent = cli.intent(Vec::new());
        assert_eq!(
            intent.decrypt,
            Some(Target::Path(PathBuf::from("plain.txt")))
        );
    }

    #[test]
    fn test_flags_and_text_interleave() {
        let cli = Cli::try_parse_from(["logbook", "@work", "-n", "3", "--and", "@home"]).unwrap();
        assert_eq!(cli.text, vec!["@work", "@home"]);
        assert_eq!(cli.limit, Some(3));
        assert!(cli.strict);
    }

    #[test]
    fn test_output_requires_export() {
        assert!(Cli::try_parse_from(["logbook", "-o", "out.json"]).is_err());
        assert!(Cli::try_parse_from(["logbook", "--export", "json", "-o", "out.json"]).is_ok());
    }
}
