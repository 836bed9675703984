//! Schema validation for HXL-tagged datasets.
//!
//! A [`Schema`] is an ordered list of [`SchemaRule`]s, one per hashtag of
//! interest. Each rule checks the values under its hashtag (type, range,
//! pattern, enumeration, taxonomy) and how many values a row has for it.
//! Violations are delivered to an [`ErrorSink`]; validation never aborts a
//! scan because of bad data.

pub mod config;
pub mod data_type;
pub mod error;
pub mod issue;
pub mod rule;
pub mod schema;
pub mod sink;

pub use config::{RuleSpec, SchemaConfig, load_schema};
pub use data_type::{
    DataType, EMAIL_PATTERN, MIN_PHONE_DIGITS, PHONE_PATTERN, URL_PATTERN, is_email, is_phone,
    is_url, parse_number,
};
pub use error::{Result, SchemaError};
pub use issue::{ErrorKind, ValidationError};
pub use rule::{SchemaRule, is_empty_value};
pub use schema::{Schema, ValidationSummary};
pub use sink::{CollectingSink, CountingSink, DiscardSink, ErrorSink, TracingSink};
