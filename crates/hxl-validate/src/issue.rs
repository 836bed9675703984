//! Validation error descriptors.
//!
//! Every detected violation produces exactly one [`ValidationError`],
//! delivered to the schema's [`ErrorSink`](crate::sink::ErrorSink).

use std::fmt;

use hxl_model::{Hashtag, Row};
use serde::{Deserialize, Serialize};

/// The constraint a value or row failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    // Data type checks
    WrongDataType,
    InvalidUrl,
    InvalidEmail,
    InvalidPhone,

    // Value checks
    ValueTooLow,
    ValueTooHigh,
    PatternMismatch,
    ValueNotAllowed,

    // Taxonomy checks
    NotInTaxonomy,
    WrongTaxonomyLevel,

    // Row cardinality checks
    TooFewOccurrences,
    TooManyOccurrences,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongDataType => "wrong_data_type",
            Self::InvalidUrl => "invalid_url",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhone => "invalid_phone",
            Self::ValueTooLow => "value_too_low",
            Self::ValueTooHigh => "value_too_high",
            Self::PatternMismatch => "pattern_mismatch",
            Self::ValueNotAllowed => "value_not_allowed",
            Self::NotInTaxonomy => "not_in_taxonomy",
            Self::WrongTaxonomyLevel => "wrong_taxonomy_level",
            Self::TooFewOccurrences => "too_few_occurrences",
            Self::TooManyOccurrences => "too_many_occurrences",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WrongDataType => "Wrong data type",
            Self::InvalidUrl => "Invalid URL",
            Self::InvalidEmail => "Invalid email",
            Self::InvalidPhone => "Invalid phone number",
            Self::ValueTooLow => "Value too low",
            Self::ValueTooHigh => "Value too high",
            Self::PatternMismatch => "Pattern mismatch",
            Self::ValueNotAllowed => "Value not allowed",
            Self::NotInTaxonomy => "Not in taxonomy",
            Self::WrongTaxonomyLevel => "Wrong taxonomy level",
            Self::TooFewOccurrences => "Too few occurrences",
            Self::TooManyOccurrences => "Too many occurrences",
        }
    }

    /// True for row-level cardinality violations.
    pub fn is_cardinality(&self) -> bool {
        matches!(self, Self::TooFewOccurrences | Self::TooManyOccurrences)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single detected violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Rule hashtag, e.g. `#sector`.
    pub tag: String,
    pub kind: ErrorKind,
    /// Offending value; `None` for cardinality violations.
    pub value: Option<String>,
    pub message: String,
    /// Logical 1-based row number, when validated as part of a row.
    pub row_number: Option<usize>,
    /// Physical 1-based source row, when known.
    pub source_row_number: Option<usize>,
}

impl ValidationError {
    pub fn new(
        tag: &Hashtag,
        kind: ErrorKind,
        value: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            kind,
            value: value.map(str::to_string),
            message: message.into(),
            row_number: None,
            source_row_number: None,
        }
    }

    /// Attach the row context.
    #[must_use]
    pub fn with_row(mut self, row: &Row) -> Self {
        self.row_number = Some(row.row_number());
        self.source_row_number = row.source_row_number();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.row_number, self.source_row_number) {
            (Some(row), Some(source)) => write!(f, "row {row} (line {source}): ")?,
            (Some(row), None) => write!(f, "row {row}: ")?,
            _ => {}
        }
        write!(f, "{} [{}] {}", self.tag, self.kind, self.message)
    }
}
