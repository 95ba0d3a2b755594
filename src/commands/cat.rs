/// Default command: print each input with syntax highlighting.
use std::io::{ErrorKind, Write};

use crate::cli::use_color;
use crate::highlight::detect::DetectMethod;
use crate::highlight::{
    ColorDepth, DetectOptions, HighlightError, RenderOptions, Renderer, detect, render_plain,
    resolve_theme,
};
use crate::input::{Source, read_source};

use super::Context;

/// Label used for write failures on standard output.
const STDOUT_LABEL: &str = "<stdout>";

/// Per-run state shared by every input.
struct CatJob<'a> {
    cx: &'a Context<'a>,
    detect: DetectOptions<'a>,
    /// `None` when output is plain.
    renderer: Option<Renderer<'a>>,
}

/// Run `colourcat [FILE]...`.
///
/// Inputs are processed in order. A failing input is reported on stderr and
/// the remaining inputs are still printed.
///
/// # Errors
///
/// Returns `HighlightError` for a bad `--language` or `--theme`, or when
/// standard output fails for a reason other than a closed pipe.
pub fn run(cx: &Context<'_>) -> Result<i32, HighlightError> {
    let detect = cx.detect_options()?;
    let renderer = if !cx.cli.plain && use_color(cx.settings.color) {
        Some(build_renderer(cx)?)
    } else {
        None
    };
    let job = CatJob {
        cx,
        detect,
        renderer,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut status = 0;

    for arg in cx.cli.inputs() {
        let _t = cx.output.timer("cat_input");
        match cat_one(&arg, &job, &mut out) {
            Ok(()) => {}
            Err(HighlightError::Io { label, source }) if label == STDOUT_LABEL => {
                if source.kind() == ErrorKind::BrokenPipe {
                    tracing::debug!("stdout closed, stopping");
                    return Ok(status);
                }
                return Err(HighlightError::Io { label, source });
            }
            Err(err) if !err.is_per_input() => return Err(err),
            Err(err) => {
                let _ = out.flush();
                cx.report(&err);
                status = err.exit_code();
            }
        }
    }

    if let Err(source) = out.flush() {
        if source.kind() != ErrorKind::BrokenPipe {
            return Err(stdout_error(source));
        }
    }
    Ok(status)
}

fn build_renderer<'a>(cx: &Context<'a>) -> Result<Renderer<'a>, HighlightError> {
    let name = resolve_theme(cx.catalog, &cx.settings.theme)?;
    let theme = cx
        .catalog
        .theme(name)
        .ok_or_else(|| HighlightError::UnknownTheme {
            query: name.to_owned(),
        })?;
    let opts = RenderOptions {
        depth: ColorDepth::from_env(),
        number: cx.settings.number,
        tab_width: cx.settings.tab_width,
    };
    tracing::debug!(theme = name, depth = ?opts.depth, "highlighting enabled");
    Ok(Renderer::new(&cx.catalog.syntaxes, theme, opts))
}

fn cat_one(arg: &str, job: &CatJob<'_>, out: &mut impl Write) -> Result<(), HighlightError> {
    let source = read_source(arg)?;
    let detection = detect(
        job.cx.catalog,
        source.path.as_deref(),
        &source.bytes,
        &job.detect,
    );

    if detection.binary {
        if !job.cx.cli.binary {
            return Err(HighlightError::BinaryInput {
                label: source.label,
                kind: detection.mime.unwrap_or("data").to_owned(),
            });
        }
        return out.write_all(&source.bytes).map_err(stdout_error);
    }

    match &job.renderer {
        Some(renderer) if detection.method != DetectMethod::Fallback => {
            write_highlighted(renderer, &source, detection.syntax, job, out)
        }
        _ => out
            .write_all(&render_plain(&source.bytes, job.cx.settings.number, 1))
            .map_err(stdout_error),
    }
}

/// Write `source` line by line as it is highlighted. If the grammar fails,
/// the rest of the input is written plain.
fn write_highlighted(
    renderer: &Renderer<'_>,
    source: &Source,
    syntax: &syntect::parsing::SyntaxReference,
    job: &CatJob<'_>,
    out: &mut impl Write,
) -> Result<(), HighlightError> {
    let text = String::from_utf8_lossy(&source.bytes);
    let mut lines = renderer.lines(syntax, &text);

    while let Some(line) = lines.next() {
        match line {
            Ok(line) => out.write_all(line.as_bytes()).map_err(stdout_error)?,
            Err(err) => {
                tracing::warn!(
                    file = %source.label,
                    line = lines.line_no(),
                    "falling back to plain output: {err}"
                );
                let rest = &text.as_bytes()[lines.line_start()..];
                let plain = render_plain(rest, job.cx.settings.number, lines.line_no());
                return out.write_all(&plain).map_err(stdout_error);
            }
        }
    }
    Ok(())
}

fn stdout_error(source: std::io::Error) -> HighlightError {
    HighlightError::Io {
        label: STDOUT_LABEL.to_owned(),
        source,
    }
}
