//! Error types for detection and selection.

use thiserror::Error;

/// Errors that can occur while parsing hints or detecting headers.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Malformed line-range expression.
    #[error("invalid range expression: {0:?}")]
    InvalidRange(String),

    /// A value-hint matcher failed to compile as a regex.
    #[error("invalid matcher pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Malformed column letters inside a hint.
    #[error(transparent)]
    Column(#[from] odt_model::ModelError),

    /// No candidate record satisfied every matcher.
    #[error("{filename}: no record matches hints")]
    NoRecordMatches { filename: String },

    /// None of the requested line numbers has a record.
    #[error("{filename}: no record found for the requested lines")]
    NoSuchRecord { filename: String },
}

/// Result type for detection and selection operations.
pub type Result<T> = std::result::Result<T, SelectError>;
