//! Error types for the dfqa library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dfqa operations.
#[derive(Debug, Error)]
pub enum DfqaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table could not be assembled (duplicate names, ragged columns).
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to assess.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

/// Result type alias for dfqa operations.
pub type Result<T> = std::result::Result<T, DfqaError>;
