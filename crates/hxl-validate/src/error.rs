//! Schema configuration errors.
//!
//! These are raised while building a schema, never while scanning rows.

use std::path::PathBuf;

use hxl_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid value pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown data type '{0}' (expected none, text, number, url, email or phone)")]
    UnknownDataType(String),

    #[error("rule {tag}: minValue {min} is greater than maxValue {max}")]
    InvalidRange { tag: String, min: f64, max: f64 },

    #[error("rule {tag}: minOccur {min} is greater than maxOccur {max}")]
    InvalidOccurrence { tag: String, min: usize, max: usize },

    #[error("rule {tag}: unknown taxonomy '{name}'")]
    UnknownTaxonomy { tag: String, name: String },

    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
