/// Output formatting: JSON, table and id modes. TTY and colour detection.
use std::io::{IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::args::{ColorChoice, OutputFormat};
use crate::types::{DetectionOutput, ErrorOutput, LanguageOutput, ThemeOutput};

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Decide whether file contents are coloured.
///
/// `auto` colours only when stdout is a TTY and `NO_COLOR` is unset or empty.
#[must_use]
pub fn use_color(choice: ColorChoice) -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    color_enabled(choice, no_color, std::io::stdout().is_terminal())
}

fn color_enabled(choice: ColorChoice, no_color: bool, is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !no_color && is_terminal,
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
        }
    }

    /// Start a named timer. Logs elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label)
    }
}

// --- Languages ---

/// Write the language listing to stdout.
pub fn write_languages(languages: &[LanguageOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(languages),
        OutputFormat::Compact => print_compact_json(languages),
        OutputFormat::Ndjson => print_ndjson(languages),
        OutputFormat::Id => {
            for lang in languages {
                println!("{}", lang.name);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => write_languages_table(languages, ctx),
    }
}

fn write_languages_table(languages: &[LanguageOutput], ctx: &OutputCtx) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["LANGUAGE", "EXTENSIONS"]);
    }
    for lang in languages {
        table.add_row([
            Cell::new(&lang.name),
            Cell::new(lang.extensions.join(", ")),
        ]);
    }
    println!("{table}");
}

// --- Themes ---

/// Write the theme listing to stdout.
pub fn write_themes(themes: &[ThemeOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(themes),
        OutputFormat::Compact => print_compact_json(themes),
        OutputFormat::Ndjson => print_ndjson(themes),
        OutputFormat::Id => {
            for theme in themes {
                println!("{}", theme.name);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => write_themes_table(themes, ctx),
    }
}

fn write_themes_table(themes: &[ThemeOutput], ctx: &OutputCtx) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["THEME", "ACTIVE"]);
    }
    for theme in themes {
        table.add_row([theme.name.as_str(), if theme.active { "✓" } else { "" }]);
    }
    println!("{table}");
}

// --- Detection ---

/// Write detection results to stdout.
pub fn write_detections(rows: &[DetectionOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Compact => print_compact_json(rows),
        OutputFormat::Ndjson => print_ndjson(rows),
        OutputFormat::Id => {
            for row in rows {
                println!("{}: {}", row.file, row.syntax);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => write_detections_table(rows, ctx),
    }
}

fn write_detections_table(rows: &[DetectionOutput], ctx: &OutputCtx) {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["FILE", "SYNTAX", "METHOD", "MIME", "BINARY"]);
    }
    for row in rows {
        table.add_row([
            row.file.as_str(),
            row.syntax.as_str(),
            row.method.as_str(),
            row.mime.as_deref().unwrap_or(""),
            if row.binary { "yes" } else { "" },
        ]);
    }
    println!("{table}");
}

// --- Error output ---

/// Write a structured error to stderr.
///
/// Only the JSON formats produce an envelope; `auto` stays human-readable
/// because stderr is usually a terminal even when stdout is piped.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = if json_flag { OutputFormat::Json } else { format };
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            let s = serde_json::to_string(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "colourcat: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds at debug level on drop.
///
/// Created via [`OutputCtx::timer`].
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(elapsed_ms = ms, "{}", self.label);
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => tracing::error!("JSON serialization error: {e}"),
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => tracing::error!("JSON serialization error: {e}"),
    }
}

fn print_ndjson<T: Serialize>(values: &[T]) {
    for v in values {
        match serde_json::to_string(v) {
            Ok(s) => println!("{s}"),
            Err(e) => tracing::error!("JSON serialization error: {e}"),
        }
    }
}
