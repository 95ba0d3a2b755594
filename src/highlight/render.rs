/// Line-by-line rendering of text to ANSI-coloured or plain output.
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::errors::HighlightError;
use super::palette::{ColorDepth, DIM, RESET, sgr};

/// Width of the line-number column, excluding the separator.
const GUTTER_WIDTH: usize = 6;

/// Rendering options shared by every input.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Terminal colour depth.
    pub depth: ColorDepth,
    /// Prefix each line with its 1-based number.
    pub number: bool,
    /// Expand tabs to this many columns (0 keeps them).
    pub tab_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth: ColorDepth::Ansi256,
            number: false,
            tab_width: 0,
        }
    }
}

/// Highlights text with one theme.
pub struct Renderer<'a> {
    syntaxes: &'a SyntaxSet,
    theme: &'a Theme,
    opts: RenderOptions,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(syntaxes: &'a SyntaxSet, theme: &'a Theme, opts: RenderOptions) -> Self {
        Self {
            syntaxes,
            theme,
            opts,
        }
    }

    /// Highlight `text` with `syntax`, one escaped line at a time.
    ///
    /// Lines are produced lazily so the caller can write each one as soon as
    /// it is ready.
    #[must_use]
    pub fn lines<'t>(&self, syntax: &SyntaxReference, text: &'t str) -> RenderedLines<'a, 't> {
        RenderedLines {
            syntaxes: self.syntaxes,
            opts: self.opts,
            highlighter: HighlightLines::new(syntax, self.theme),
            lines: LinesWithEndings::from(text),
            line_no: 0,
            offset: 0,
            line_start: 0,
        }
    }
}

/// Iterator over highlighted lines of one input.
///
/// Every item ends with [`RESET`] before its newline.
pub struct RenderedLines<'a, 't> {
    syntaxes: &'a SyntaxSet,
    opts: RenderOptions,
    highlighter: HighlightLines<'a>,
    lines: LinesWithEndings<'t>,
    line_no: usize,
    offset: usize,
    line_start: usize,
}

impl RenderedLines<'_, '_> {
    /// 1-based number of the line most recently yielded.
    #[must_use]
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Byte offset in the text where the most recently yielded line starts.
    #[must_use]
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    fn render_line(&mut self, line: &str) -> Result<String, HighlightError> {
        let ranges = self.highlighter.highlight_line(line, self.syntaxes)?;
        let mut out = String::with_capacity(line.len() * 2);

        if self.opts.number {
            out.push_str(DIM);
            out.push_str(&gutter(self.line_no));
            out.push_str(RESET);
        }

        let mut column = 0;
        let mut newline = false;
        for (style, piece) in ranges {
            let piece = match piece.strip_suffix('\n') {
                Some(body) => {
                    newline = true;
                    body
                }
                None => piece,
            };
            if piece.is_empty() {
                continue;
            }
            out.push_str(&sgr(style, self.opts.depth));
            if self.opts.tab_width > 0 {
                expand_tabs(piece, self.opts.tab_width, &mut column, &mut out);
            } else {
                out.push_str(piece);
            }
        }

        out.push_str(RESET);
        if newline {
            out.push('\n');
        }
        Ok(out)
    }
}

impl Iterator for RenderedLines<'_, '_> {
    type Item = Result<String, HighlightError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_no += 1;
        self.line_start = self.offset;
        self.offset += line.len();
        Some(self.render_line(line))
    }
}

/// Render bytes without colour: unchanged unless line numbers are requested,
/// in which case numbering starts at `first_line`.
#[must_use]
pub fn render_plain(bytes: &[u8], number: bool, first_line: usize) -> Vec<u8> {
    if !number {
        return bytes.to_vec();
    }

    let mut out = Vec::with_capacity(bytes.len() + bytes.len() / 8);
    for (idx, line) in bytes.split_inclusive(|&b| b == b'\n').enumerate() {
        out.extend_from_slice(gutter(first_line + idx).as_bytes());
        out.extend_from_slice(line);
    }
    out
}

fn gutter(line_no: usize) -> String {
    format!("{line_no:>GUTTER_WIDTH$}  ")
}

fn expand_tabs(piece: &str, width: usize, column: &mut usize, out: &mut String) {
    for ch in piece.chars() {
        if ch == '\t' {
            let pad = width - (*column % width);
            out.extend(std::iter::repeat_n(' ', pad));
            *column += pad;
        } else {
            out.push(ch);
            *column += 1;
        }
    }
}
