//! Settings: defaults, config file, environment and CLI flags.
//!
//! Priority chain (lowest to highest):
//! 1. Defaults
//! 2. Config file (`$XDG_CONFIG_HOME/colourcat/config.toml`)
//! 3. Environment variables (`COLOURCAT_THEME`, `COLOURCAT_COLOR`)
//! 4. CLI arguments

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::cli::Cli;
use crate::cli::args::ColorChoice;
use crate::highlight::DEFAULT_THEME;

/// Environment variable overriding the theme.
pub const ENV_THEME: &str = "COLOURCAT_THEME";

/// Environment variable overriding the colour policy.
pub const ENV_COLOR: &str = "COLOURCAT_COLOR";

/// On-disk configuration. Every key is optional.
///
/// ```toml
/// theme = "Solarized (dark)"
/// color = "auto"
/// number = false
/// tabs = 4
///
/// [mappings]
/// "*.tpl" = "HTML"
/// "Jenkinsfile" = "Groovy"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub theme: Option<String>,
    pub color: Option<ColorChoice>,
    pub number: Option<bool>,
    pub tabs: Option<usize>,
    /// Exact file name or `*.ext` → language name.
    pub mappings: BTreeMap<String, String>,
}

impl FileConfig {
    /// Parse a config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Default config file location, if a config directory can be determined.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .map(|dir| dir.join("colourcat").join("config.toml"))
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Theme name or fuzzy query, resolved against the catalog later.
    pub theme: String,
    pub color: ColorChoice,
    pub number: bool,
    pub tab_width: usize,
    pub mappings: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            color: ColorChoice::Auto,
            number: false,
            tab_width: 0,
            mappings: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Build settings from every layer for a parsed command line.
    ///
    /// # Errors
    ///
    /// Fails if an explicit `--config` file is missing, or any config file is
    /// unreadable or malformed.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = Self::default();

        if !cli.no_config {
            if let Some(path) = &cli.config {
                settings.apply_file(FileConfig::load(path)?);
            } else if let Some(path) = FileConfig::default_path().filter(|p| p.is_file()) {
                tracing::debug!(path = %path.display(), "loading config");
                settings.apply_file(FileConfig::load(&path)?);
            }
        }

        settings.apply_env(|key| std::env::var(key).ok());
        settings.apply_cli(cli);
        Ok(settings)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        if let Some(color) = file.color {
            self.color = color;
        }
        if let Some(number) = file.number {
            self.number = number;
        }
        if let Some(tabs) = file.tabs {
            self.tab_width = tabs;
        }
        self.mappings.extend(file.mappings);
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(theme) = var(ENV_THEME).filter(|t| !t.is_empty()) {
            self.theme = theme;
        }
        if let Some(color) = var(ENV_COLOR) {
            match ColorChoice::from_str(&color, true) {
                Ok(color) => self.color = color,
                Err(_) => tracing::warn!(value = %color, "ignoring invalid {ENV_COLOR}"),
            }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(theme) = &cli.theme {
            self.theme.clone_from(theme);
        }
        if let Some(color) = cli.color {
            self.color = color;
        }
        if cli.number {
            self.number = true;
        }
        if let Some(tabs) = cli.tabs {
            self.tab_width = tabs;
        }
    }
}
