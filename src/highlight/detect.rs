/// File-type detection: pick a grammar for an input and decide whether it is
/// binary.
///
/// Grammar selection, first hit wins:
///
/// 1. Forced language (`--language`).
/// 2. Configured mapping for the exact file name, then `*.ext`.
/// 3. Grammar registered for the full file name (`Makefile`, `Dockerfile`).
/// 4. Grammar registered for the extension, retried lower-cased.
/// 5. First line (shebang, `<?xml`, editor modelines).
/// 6. Text MIME type sniffed by `infer` (`text/html`, `text/xml`, shell scripts).
/// 7. Plain text.
///
/// Binary classification runs independently over the first [`BINARY_SNIFF_LEN`]
/// bytes: a NUL byte marks the input as binary, and so does a non-text `infer`
/// match whose bytes are not also readable text. Some `infer` signatures are
/// only two or three bytes long (`BM`, `MZ`, `ID3`), so a magic match alone
/// never refuses a file that decodes as UTF-8 without control bytes.
use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use syntect::parsing::SyntaxReference;

use super::catalog::Catalog;
use super::resolve::resolve_language;

/// How many leading bytes are scanned for NUL when classifying binary input.
pub const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Longest first line handed to first-line matching.
const FIRST_LINE_LIMIT: usize = 1024;

/// Which rule selected the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectMethod {
    Forced,
    Mapping,
    FileName,
    Extension,
    FirstLine,
    Magic,
    Fallback,
}

impl DetectMethod {
    /// Short lowercase label for table output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forced => "forced",
            Self::Mapping => "mapping",
            Self::FileName => "file_name",
            Self::Extension => "extension",
            Self::Magic => "magic",
            Self::FirstLine => "first_line",
            Self::Fallback => "fallback",
        }
    }
}

/// Outcome of detection for one input.
#[derive(Debug, Clone)]
pub struct Detection<'a> {
    /// Selected grammar.
    pub syntax: &'a SyntaxReference,
    /// Rule that selected it.
    pub method: DetectMethod,
    /// MIME type reported by magic-byte sniffing, if any.
    pub mime: Option<&'static str>,
    /// Whether the content looks binary.
    pub binary: bool,
}

/// Detection inputs that do not vary per file.
#[derive(Debug, Default)]
pub struct DetectOptions<'a> {
    /// Grammar chosen with `--language`; skips every other rule.
    pub forced: Option<&'a SyntaxReference>,
    /// Config mappings: exact file name or `*.ext` → language name.
    pub mappings: BTreeMap<String, String>,
}

/// Detect the grammar and binary-ness of one input.
#[must_use]
pub fn detect<'a>(
    catalog: &'a Catalog,
    path: Option<&Path>,
    bytes: &[u8],
    opts: &DetectOptions<'a>,
) -> Detection<'a> {
    let kind = infer::get(bytes);
    let mime = kind.map(|k| k.mime_type());
    let text_kind = kind.is_some_and(|k| k.matcher_type() == infer::MatcherType::Text);
    let binary = has_nul(bytes) || (kind.is_some() && !text_kind && !looks_like_text(bytes));

    let (syntax, method) = select_syntax(catalog, path, bytes, mime.filter(|_| text_kind), opts);

    tracing::debug!(
        syntax = %syntax.name,
        method = method.as_str(),
        mime = mime.unwrap_or("-"),
        binary,
        "detected file type"
    );

    Detection {
        syntax,
        method,
        mime,
        binary,
    }
}

fn select_syntax<'a>(
    catalog: &'a Catalog,
    path: Option<&Path>,
    bytes: &[u8],
    text_mime: Option<&str>,
    opts: &DetectOptions<'a>,
) -> (&'a SyntaxReference, DetectMethod) {
    if let Some(forced) = opts.forced {
        return (forced, DetectMethod::Forced);
    }

    let file_name = path
        .and_then(Path::file_name)
        .and_then(|n| n.to_str());
    let extension = path
        .and_then(Path::extension)
        .and_then(|e| e.to_str());

    if let Some(syntax) = from_mapping(catalog, file_name, extension, &opts.mappings) {
        return (syntax, DetectMethod::Mapping);
    }

    if let Some(name) = file_name {
        if let Some(syntax) = catalog.syntaxes.find_syntax_by_extension(name) {
            return (syntax, DetectMethod::FileName);
        }
    }

    if let Some(ext) = extension {
        let found = catalog
            .syntaxes
            .find_syntax_by_extension(ext)
            .or_else(|| {
                catalog
                    .syntaxes
                    .find_syntax_by_extension(&ext.to_lowercase())
            });
        if let Some(syntax) = found {
            return (syntax, DetectMethod::Extension);
        }
    }

    if let Some(syntax) = catalog.syntaxes.find_syntax_by_first_line(&first_line(bytes)) {
        return (syntax, DetectMethod::FirstLine);
    }

    if let Some(syntax) = text_mime.and_then(|m| from_mime(catalog, m)) {
        return (syntax, DetectMethod::Magic);
    }

    (catalog.plain_text(), DetectMethod::Fallback)
}

fn from_mapping<'a>(
    catalog: &'a Catalog,
    file_name: Option<&str>,
    extension: Option<&str>,
    mappings: &BTreeMap<String, String>,
) -> Option<&'a SyntaxReference> {
    let by_name = file_name.and_then(|n| mappings.get(n));
    let by_ext = || extension.and_then(|e| mappings.get(&format!("*.{e}")));
    let language = by_name.or_else(by_ext)?;

    match resolve_language(catalog, language) {
        Ok(syntax) => Some(syntax),
        Err(err) => {
            tracing::warn!(%language, "ignoring configured mapping: {err}");
            None
        }
    }
}

/// Map a text MIME type reported by `infer` to a grammar.
fn from_mime<'a>(catalog: &'a Catalog, mime: &str) -> Option<&'a SyntaxReference> {
    let token = match mime {
        "text/html" => "html",
        "text/xml" => "xml",
        "text/x-shellscript" => "sh",
        _ => return None,
    };
    catalog.syntaxes.find_syntax_by_token(token)
}

fn has_nul(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

/// Whether the sniff window is UTF-8 with no control bytes besides whitespace
/// and ESC. A multi-byte sequence cut off by the window end still counts.
fn looks_like_text(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    let text = match std::str::from_utf8(window) {
        Ok(text) => text,
        Err(err) if err.error_len().is_none() => {
            // Only the tail is incomplete; `valid_up_to` is a char boundary.
            std::str::from_utf8(&window[..err.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return false,
    };
    !text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0c' | '\x1b'))
}

fn first_line(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(FIRST_LINE_LIMIT)];
    let line = head.split(|&b| b == b'\n').next().unwrap_or_default();
    String::from_utf8_lossy(line).into_owned()
}
