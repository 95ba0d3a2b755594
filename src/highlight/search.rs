/// Fuzzy filtering of catalog listings.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

use super::catalog::CatalogEntry;

/// A listing row with its match score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched entry.
    pub entry: CatalogEntry,
    /// Match score (higher = better match). 0 when unscored.
    pub score: u32,
}

/// Filter catalog entries by query string.
///
/// Matches against the entry name and, for grammars, each claimed extension.
/// An empty query keeps every entry in catalog order; otherwise results are
/// sorted by score descending (best match first).
#[must_use]
pub fn search(entries: &[CatalogEntry], query: &str) -> Vec<SearchResult> {
    if query.is_empty() {
        return entries
            .iter()
            .map(|entry| SearchResult {
                entry: entry.clone(),
                score: 0,
            })
            .collect();
    }

    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let mut buf = Vec::new();

    let mut scored: Vec<SearchResult> = entries
        .iter()
        .filter_map(|entry| {
            let name_score = pattern.score(Utf32Str::new(&entry.name, &mut buf), &mut matcher);
            let ext_score = entry
                .extensions
                .iter()
                .filter_map(|ext| pattern.score(Utf32Str::new(ext, &mut buf), &mut matcher))
                .max();
            name_score.max(ext_score).map(|score| SearchResult {
                entry: entry.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, extensions: &[&str]) -> CatalogEntry {
        CatalogEntry {
            name: name.to_owned(),
            extensions: extensions.iter().map(|&e| e.to_owned()).collect(),
        }
    }

    fn entries() -> Vec<CatalogEntry> {
        vec![
            entry("Python", &["py", "pyw"]),
            entry("Rust", &["rs"]),
            entry("Ruby", &["rb"]),
            entry("JavaScript", &["js", "mjs"]),
        ]
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let results = search(&entries(), "");
        let names: Vec<&str> = results.iter().map(|r| r.entry.name.as_str()).collect();
        assert_eq!(names, ["Python", "Rust", "Ruby", "JavaScript"]);
    }

    #[test]
    fn test_fuzzy_by_name() {
        let results = search(&entries(), "jscript");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.name, "JavaScript");
    }

    #[test]
    fn test_fuzzy_by_extension() {
        let results = search(&entries(), "rb");
        assert_eq!(results[0].entry.name, "Ruby");
    }

    #[test]
    fn test_no_match() {
        assert!(search(&entries(), "zzq").is_empty());
    }
}
