/// Shared serializable output types for listings, detection and errors.
///
/// These types are what gets written to stdout — either as JSON or rendered
/// as a table. They are decoupled from the internal syntect and detection types.
use serde::{Deserialize, Serialize};

use crate::highlight::HighlightError;
use crate::highlight::detect::DetectMethod;

/// A grammar in the language listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOutput {
    /// Grammar name, accepted by `--language`.
    pub name: String,
    /// Extensions and file names the grammar claims.
    pub extensions: Vec<String>,
    /// Fuzzy match score when a query was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// A theme in the theme listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeOutput {
    /// Theme name, accepted by `--theme`.
    pub name: String,
    /// Whether this is the theme in effect for the current settings.
    pub active: bool,
    /// Fuzzy match score when a query was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// Detection result for one input.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionOutput {
    /// Input label (path or `<stdin>`).
    pub file: String,
    /// Selected grammar name.
    pub syntax: String,
    /// Rule that selected the grammar.
    pub method: DetectMethod,
    /// MIME type from magic-byte sniffing; the key is omitted when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Whether the content looks binary.
    pub binary: bool,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional list of candidates (for ambiguous name errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl ErrorOutput {
    /// Construct from a `HighlightError`.
    #[must_use]
    pub fn from_error(err: &HighlightError) -> Self {
        let candidates = match err {
            HighlightError::AmbiguousName { candidates, .. } => Some(candidates.clone()),
            _ => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                candidates,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope() {
        let err = HighlightError::AmbiguousName {
            query: "sol".to_owned(),
            candidates: vec!["Solarized (dark)".to_owned(), "Solarized (light)".to_owned()],
        };
        let json = serde_json::to_value(ErrorOutput::from_error(&err)).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "ambiguous_name");
        assert_eq!(json["error"]["candidates"][1], "Solarized (light)");
    }

    #[test]
    fn test_detection_method_serializes_snake_case() {
        let out = DetectionOutput {
            file: "a".to_owned(),
            syntax: "Plain Text".to_owned(),
            method: DetectMethod::FirstLine,
            mime: None,
            binary: false,
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["method"], "first_line");
        assert!(json.get("mime").is_none());
    }
}
