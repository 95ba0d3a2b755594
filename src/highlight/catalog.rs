/// Grammar and theme catalog backed by syntect's bundled dumps.
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Theme used when neither the config nor the CLI names one.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Name of the grammar every undetected input falls back to.
pub const PLAIN_TEXT: &str = "Plain Text";

/// A listing row for one grammar or theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Grammar or theme name.
    pub name: String,
    /// File extensions and names the grammar claims (empty for themes).
    pub extensions: Vec<String>,
}

/// All grammars and themes available to the process.
///
/// Loading the dumps costs a few milliseconds, so the catalog is built once
/// in `main` and borrowed everywhere else.
pub struct Catalog {
    pub syntaxes: SyntaxSet,
    pub themes: ThemeSet,
}

impl Catalog {
    /// Load the default newline-aware grammars and the default themes.
    #[must_use]
    pub fn load() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Look up a grammar by its exact name.
    #[must_use]
    pub fn syntax(&self, name: &str) -> Option<&SyntaxReference> {
        self.syntaxes.find_syntax_by_name(name)
    }

    /// The plain-text grammar.
    #[must_use]
    pub fn plain_text(&self) -> &SyntaxReference {
        self.syntax(PLAIN_TEXT)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    /// Look up a theme by its exact name.
    #[must_use]
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.themes.get(name)
    }

    /// Names of all user-visible grammars, in catalog order.
    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.syntaxes
            .syntaxes()
            .iter()
            .filter(|s| !s.hidden)
            .map(|s| s.name.as_str())
    }

    /// Names of all themes, sorted.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.themes.keys().map(String::as_str)
    }

    /// Listing rows for all user-visible grammars, sorted by name.
    #[must_use]
    pub fn language_entries(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .syntaxes
            .syntaxes()
            .iter()
            .filter(|s| !s.hidden)
            .map(|s| CatalogEntry {
                name: s.name.clone(),
                extensions: s.file_extensions.clone(),
            })
            .collect();
        entries.sort_by_key(|e| e.name.to_lowercase());
        entries
    }

    /// Listing rows for all themes, sorted by name.
    #[must_use]
    pub fn theme_entries(&self) -> Vec<CatalogEntry> {
        self.theme_names()
            .map(|name| CatalogEntry {
                name: name.to_owned(),
                extensions: Vec::new(),
            })
            .collect()
    }
}
