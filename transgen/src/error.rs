//! All error types for the transgen crate.
//!
//! Ingestion and emission failures are reported per unit (one source file,
//! one output file); callers decide whether a unit failure aborts anything
//! else.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("number of columns in row {row} doesn't match header size ({fields} fields, expected {expected}): {content}")]
    MalformedRow {
        row: u64,
        fields: usize,
        expected: usize,
        /// The parsed fields rejoined with the delimiter, not the raw line;
        /// quoting and escapes are already resolved.
        content: String,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("file `{}` does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("output folder for `{}` does not exist", .path.display())]
    OutputPathMissing { path: PathBuf },

    #[error("language `{language}` is not a known ISO language and has no mapping{}", format_suggestions(.suggestions))]
    UnknownLanguage {
        language: String,
        suggestions: Vec<String>,
    },

    #[error("client `{0}` not found in the settings file")]
    UnknownClient(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (possible candidates: {})", suggestions.join(", "))
    }
}

impl Error {
    /// Creates a new settings error.
    pub fn settings_error(message: impl Into<String>) -> Self {
        Error::Settings(message.into())
    }
}
