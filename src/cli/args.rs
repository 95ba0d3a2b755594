/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

/// colourcat — dump files to the console with syntax highlighting.
#[derive(Debug, Parser)]
#[command(
    name = "colourcat",
    about = "Dump files to the console with syntax highlighting",
    version
)]
pub struct Cli {
    /// Files to print. `-` or no files reads standard input.
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Force the language: a name, an extension, or a fuzzy query.
    #[arg(short, long, value_name = "NAME")]
    pub language: Option<String>,

    /// Colour theme (see --list-themes).
    #[arg(short, long, value_name = "NAME")]
    pub theme: Option<String>,

    /// When to colour output. `auto` colours only when stdout is a TTY.
    #[arg(long, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Never highlight; print contents unchanged.
    #[arg(short, long)]
    pub plain: bool,

    /// Prefix every line with its line number.
    #[arg(short, long)]
    pub number: bool,

    /// Expand tabs to N columns in highlighted output (0 keeps tabs).
    #[arg(long, value_name = "N")]
    pub tabs: Option<usize>,

    /// Print binary files as-is instead of refusing them.
    #[arg(long)]
    pub binary: bool,

    /// Report the detected file type of each input instead of printing it.
    #[arg(long, conflicts_with_all = ["list_languages", "list_themes"])]
    pub detect: bool,

    /// List supported languages, optionally filtered by a fuzzy query.
    #[arg(
        long,
        value_name = "QUERY",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "list_themes"
    )]
    pub list_languages: Option<String>,

    /// List available themes, optionally filtered by a fuzzy query.
    #[arg(long, value_name = "QUERY", num_args = 0..=1, default_missing_value = "")]
    pub list_themes: Option<String>,

    /// Output format for listings, --detect and errors.
    /// Auto-detects: table when TTY, json when piped.
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long)]
    pub no_header: bool,

    /// Read settings from this file instead of the default location.
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore the configuration file.
    #[arg(long)]
    pub no_config: bool,

    /// Log detection decisions and timings to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print inputs with highlighting.
    Cat,
    /// Report detection results per input.
    Detect,
    /// List grammars matching the query.
    Languages(String),
    /// List themes matching the query.
    Themes(String),
}

impl Cli {
    /// The mode selected by the flags.
    #[must_use]
    pub fn command(&self) -> Command {
        if let Some(query) = &self.list_languages {
            Command::Languages(query.clone())
        } else if let Some(query) = &self.list_themes {
            Command::Themes(query.clone())
        } else if self.detect {
            Command::Detect
        } else {
            Command::Cat
        }
    }

    /// Input arguments, defaulting to standard input.
    #[must_use]
    pub fn inputs(&self) -> Vec<String> {
        if self.files.is_empty() {
            vec![crate::input::STDIN_ARG.to_owned()]
        } else {
            self.files.clone()
        }
    }
}

/// Colour policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when stdout is a TTY and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always emit colour escapes.
    Always,
    /// Never emit colour escapes.
    Never,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// JSON array or object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
    /// Aligned table with headers (human-readable).
    Table,
    /// Name only, one per line (for piping to other commands).
    Id,
}
