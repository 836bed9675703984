//! Error types for HXL ingestion.

use std::path::PathBuf;

use hxl_model::ModelError;
use thiserror::Error;

/// Errors that can occur while reading or tagging a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
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

    // === CSV Parsing Errors ===
    /// Malformed CSV record.
    #[error("failed to parse CSV: {message}")]
    Csv { message: String },

    /// No row of hashtags near the top of the input.
    #[error("no hashtag row found in the first {scanned} row(s)")]
    NoHashtagRow { scanned: usize },

    // === Tagging Errors ===
    /// A tagging spec names an invalid column spec.
    #[error("invalid tag spec '{spec}' for header '{header}': {source}")]
    InvalidTagSpec {
        header: String,
        spec: String,
        #[source]
        source: ModelError,
    },

    /// No row matched any tagging spec.
    #[error("no header row matched the tagging specs in the first {scanned} row(s)")]
    NoHeaderMatched { scanned: usize },
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");

        let err = IngestError::NoHashtagRow { scanned: 25 };
        assert_eq!(err.to_string(), "no hashtag row found in the first 25 row(s)");
    }
}
