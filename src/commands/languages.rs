/// `--list-languages`: list grammars, optionally fuzzy-filtered.
use crate::cli::output::write_languages;
use crate::highlight::search;
use crate::types::LanguageOutput;

use super::Context;

/// Run `colourcat --list-languages [QUERY]`.
pub fn run(query: &str, cx: &Context<'_>) {
    let _t = cx.output.timer("list_languages");
    let entries = cx.catalog.language_entries();
    let results = search(&entries, query);

    let output: Vec<LanguageOutput> = results
        .into_iter()
        .map(|r| LanguageOutput {
            name: r.entry.name,
            extensions: r.entry.extensions,
            score: (!query.is_empty()).then_some(r.score),
        })
        .collect();

    write_languages(&output, cx.output);
}
