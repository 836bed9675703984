//! Data model for Humanitarian Exchange Language (HXL) datasets.
//!
//! A dataset is a table whose columns are tagged with hashtags such as
//! `#sector` or `#affected_num`. This crate provides the column and row
//! types consumed by validation, ingestion and counting, plus the
//! [`Taxonomy`] vocabulary used by taxonomy-constrained rules.

pub mod column;
pub mod error;
pub mod hashtag;
pub mod row;
pub mod taxonomy;

pub use column::Column;
pub use error::{ModelError, Result};
pub use hashtag::Hashtag;
pub use row::Row;
pub use taxonomy::{Taxonomy, Term};
