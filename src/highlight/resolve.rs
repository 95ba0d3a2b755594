/// Name resolution: convert user-provided language and theme names to catalog
/// entries.
///
/// Resolution strategy (in priority order):
///
/// 1. **Exact name match** (case-insensitive).
/// 2. **Token match** (languages only): extension such as `py` or `rs`.
/// 3. **Fuzzy match**: auto-resolve if the top result has a significantly
///    higher score than the second.
/// 4. **Ambiguity error**: if several names match with similar scores.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};
use syntect::parsing::SyntaxReference;

use super::catalog::Catalog;
use super::errors::HighlightError;

/// Minimum score ratio between 1st and 2nd result to auto-resolve fuzzy match.
const FUZZY_AUTO_RESOLVE_RATIO: f32 = 2.0;

/// Maximum number of candidates reported in an ambiguity error.
const MAX_CANDIDATES: usize = 5;

/// Resolve a language name, extension or fuzzy query to a grammar.
///
/// # Errors
///
/// - `HighlightError::UnknownLanguage` — nothing matches
/// - `HighlightError::AmbiguousName` — several grammars match with similar confidence
pub fn resolve_language<'a>(
    catalog: &'a Catalog,
    query: &str,
) -> Result<&'a SyntaxReference, HighlightError> {
    let names: Vec<&str> = catalog.language_names().collect();

    if let Some(name) = exact_name(&names, query) {
        if let Some(syntax) = catalog.syntax(name) {
            return Ok(syntax);
        }
    }

    if let Some(syntax) = catalog.syntaxes.find_syntax_by_extension(query) {
        return Ok(syntax);
    }
    if let Some(syntax) = catalog
        .syntaxes
        .find_syntax_by_extension(&query.to_lowercase())
    {
        return Ok(syntax);
    }

    let name = resolve_fuzzy(&names, query).map_err(|err| match err {
        FuzzyMiss::None => HighlightError::UnknownLanguage {
            query: query.to_owned(),
        },
        FuzzyMiss::Ambiguous(candidates) => HighlightError::AmbiguousName {
            query: query.to_owned(),
            candidates,
        },
    })?;

    catalog
        .syntax(name)
        .ok_or_else(|| HighlightError::UnknownLanguage {
            query: query.to_owned(),
        })
}

/// Resolve a theme name or fuzzy query to the exact catalog theme name.
///
/// # Errors
///
/// - `HighlightError::UnknownTheme` — nothing matches
/// - `HighlightError::AmbiguousName` — several themes match with similar confidence
pub fn resolve_theme<'a>(catalog: &'a Catalog, query: &str) -> Result<&'a str, HighlightError> {
    let names: Vec<&str> = catalog.theme_names().collect();

    if let Some(name) = exact_name(&names, query) {
        return Ok(name);
    }

    resolve_fuzzy(&names, query).map_err(|err| match err {
        FuzzyMiss::None => HighlightError::UnknownTheme {
            query: query.to_owned(),
        },
        FuzzyMiss::Ambiguous(candidates) => HighlightError::AmbiguousName {
            query: query.to_owned(),
            candidates,
        },
    })
}

fn exact_name<'a>(names: &[&'a str], query: &str) -> Option<&'a str> {
    names
        .iter()
        .copied()
        .find(|name| name.eq_ignore_ascii_case(query))
}

/// Why a fuzzy lookup did not yield a single name.
#[derive(Debug, PartialEq, Eq)]
enum FuzzyMiss {
    None,
    Ambiguous(Vec<String>),
}

fn resolve_fuzzy<'a>(names: &[&'a str], query: &str) -> Result<&'a str, FuzzyMiss> {
    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut scored: Vec<(&str, u32)> = names
        .iter()
        .filter_map(|&name| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(name, &mut buf);
            pattern.score(haystack, &mut matcher).map(|s| (name, s))
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    match scored.as_slice() {
        [] => Err(FuzzyMiss::None),
        [(name, _)] => Ok(name),
        [(best_name, best_score), (_, second_score), ..] => {
            #[allow(clippy::cast_precision_loss)]
            let ratio = *best_score as f32 / (*second_score as f32).max(1.0);
            if ratio >= FUZZY_AUTO_RESOLVE_RATIO {
                Ok(best_name)
            } else {
                Err(FuzzyMiss::Ambiguous(
                    scored
                        .iter()
                        .take(MAX_CANDIDATES)
                        .map(|(n, _)| (*n).to_owned())
                        .collect(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_language_case_insensitive() {
        let catalog = Catalog::load();
        let syntax = resolve_language(&catalog, "python").unwrap();
        assert_eq!(syntax.name, "Python");
    }

    #[test]
    fn test_language_by_extension() {
        let catalog = Catalog::load();
        assert_eq!(resolve_language(&catalog, "rs").unwrap().name, "Rust");
        assert_eq!(resolve_language(&catalog, "PY").unwrap().name, "Python");
    }

    #[test]
    fn test_unknown_language() {
        let catalog = Catalog::load();
        let result = resolve_language(&catalog, "zzqqxx");
        assert!(matches!(result, Err(HighlightError::UnknownLanguage { .. })));
    }

    #[test]
    fn test_exact_theme() {
        let catalog = Catalog::load();
        assert_eq!(
            resolve_theme(&catalog, "InspiredGitHub").unwrap(),
            "InspiredGitHub"
        );
    }

    #[test]
    fn test_unknown_theme() {
        let catalog = Catalog::load();
        let result = resolve_theme(&catalog, "zzqqxx");
        assert!(matches!(result, Err(HighlightError::UnknownTheme { .. })));
    }

    #[test]
    fn test_fuzzy_single_match() {
        let names = ["Python", "Rust", "Ruby"];
        assert_eq!(resolve_fuzzy(&names, "pyth"), Ok("Python"));
    }

    #[test]
    fn test_fuzzy_ambiguous() {
        let names = ["Solarized (dark)", "Solarized (light)"];
        let result = resolve_fuzzy(&names, "solarized");
        assert!(matches!(result, Err(FuzzyMiss::Ambiguous(c)) if c.len() == 2));
    }

    #[test]
    fn test_fuzzy_none() {
        let names = ["Python", "Rust"];
        assert_eq!(resolve_fuzzy(&names, "qqq"), Err(FuzzyMiss::None));
    }
}
