/// Errors from the highlighting domain layer.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, detecting or highlighting an input.
#[derive(Debug, Error)]
pub enum HighlightError {
    /// The input path does not exist.
    #[error("{}: No such file or directory", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The input exists but cannot be read by this user.
    #[error("{}: Permission denied", path.display())]
    PermissionDenied {
        /// The unreadable path.
        path: PathBuf,
    },

    /// The input is a directory.
    #[error("{}: Is a directory", path.display())]
    IsDirectory {
        /// The directory path.
        path: PathBuf,
    },

    /// Any other I/O failure while reading an input.
    #[error("{label}: {source}")]
    Io {
        /// Display label of the input (`path` or `<stdin>`).
        label: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input looks binary and `--binary` was not given.
    #[error("{label}: binary content ({kind}), use --binary to print it anyway")]
    BinaryInput {
        /// Display label of the input.
        label: String,
        /// Detected MIME type, or `data` when only the NUL heuristic fired.
        kind: String,
    },

    /// No grammar matched the requested language.
    #[error("Unknown language '{query}'")]
    UnknownLanguage {
        /// The requested language.
        query: String,
    },

    /// No theme matched the requested name.
    #[error("Unknown theme '{query}'")]
    UnknownTheme {
        /// The requested theme.
        query: String,
    },

    /// Several grammars or themes matched with similar confidence.
    #[error("Ambiguous name '{query}'. Candidates:\n  {}", candidates.join("\n  "))]
    AmbiguousName {
        /// The requested name.
        query: String,
        /// Names of all candidates that matched.
        candidates: Vec<String>,
    },

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Error chain rendered as a single line.
        message: String,
    },

    /// The highlighting engine rejected the input.
    #[error("Highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
}

/// Exit code mapping for `HighlightError` variants.
impl HighlightError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::IsDirectory { .. }
            | Self::Io { .. }
            | Self::BinaryInput { .. }
            | Self::Highlight(_) => 1,
            Self::UnknownLanguage { .. }
            | Self::UnknownTheme { .. }
            | Self::AmbiguousName { .. }
            | Self::Config { .. } => 2,
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::IsDirectory { .. } => "is_directory",
            Self::Io { .. } => "io_error",
            Self::BinaryInput { .. } => "binary_input",
            Self::UnknownLanguage { .. } => "unknown_language",
            Self::UnknownTheme { .. } => "unknown_theme",
            Self::AmbiguousName { .. } => "ambiguous_name",
            Self::Config { .. } => "config_error",
            Self::Highlight(_) => "highlight_error",
        }
    }

    /// Whether the error concerns a single input, so processing may go on
    /// with the remaining ones.
    #[must_use]
    pub fn is_per_input(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::PermissionDenied { .. }
                | Self::IsDirectory { .. }
                | Self::Io { .. }
                | Self::BinaryInput { .. }
        )
    }
}

impl From<anyhow::Error> for HighlightError {
    fn from(err: anyhow::Error) -> Self {
        Self::Config {
            message: format!("{err:#}"),
        }
    }
}
