/// `--list-themes`: list colour themes, optionally fuzzy-filtered.
use crate::cli::output::write_themes;
use crate::highlight::{resolve_theme, search};
use crate::types::ThemeOutput;

use super::Context;

/// Run `colourcat --list-themes [QUERY]`.
///
/// The theme in effect is marked active; an unresolvable configured theme
/// leaves nothing marked.
pub fn run(query: &str, cx: &Context<'_>) {
    let active = resolve_theme(cx.catalog, &cx.settings.theme).ok();
    let entries = cx.catalog.theme_entries();
    let results = search(&entries, query);

    let output: Vec<ThemeOutput> = results
        .into_iter()
        .map(|r| ThemeOutput {
            active: active == Some(r.entry.name.as_str()),
            name: r.entry.name,
            score: (!query.is_empty()).then_some(r.score),
        })
        .collect();

    write_themes(&output, cx.output);
}
