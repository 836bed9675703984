//! Error types for counting.

use thiserror::Error;

/// Errors raised while writing a count report.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for counting operations.
pub type Result<T> = std::result::Result<T, CountError>;
