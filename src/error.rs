//! Errors returned by the public API.
//!
//! Two sources: the JSON document failed to parse, or a layout hit an
//! invalid tree operation while building.

use serde_json::error::Category;
use thiserror::Error;

use crate::dom::DomError;

#[derive(Debug, Error)]
pub enum FormnestError {
    /// JSON input failed to parse as a form document.
    #[error("Failed to parse form document: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
    /// A layout hook failed.
    #[error("Layout failed: {0}")]
    Layout(#[from] DomError),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for FormnestError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            Category::Data => {
                "The JSON is valid but is not a form document. Check the layout \"type\", field names and value types.".to_string()
            }
            Category::Eof => "Unexpected end of input. Is the JSON truncated?".to_string(),
            Category::Io => String::new(),
        };
        FormnestError::Parse { source: e, hint }
    }
}
