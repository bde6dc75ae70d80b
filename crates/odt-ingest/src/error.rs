//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading and loading a CSV source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read standard input.
    #[error("failed to read stdin: {0}")]
    StdinRead(#[source] std::io::Error),

    /// The requested code page label is not a known encoding.
    #[error("unknown encoding label: {label:?}")]
    UnknownEncoding { label: String },

    /// The source bytes do not decode cleanly in the attempted encoding.
    #[error("failed to decode {filename} as {encoding}")]
    Decode { filename: String, encoding: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
