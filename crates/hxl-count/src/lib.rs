//! Counting utility for HXL datasets.
//!
//! Rows are grouped by the combination of values under a set of hashtags;
//! each group gets a row count and, optionally, sum/average/min/max over a
//! numeric column. Only the first column carrying each hashtag is used.

pub mod aggregate;
pub mod count;
pub mod error;

pub use aggregate::Aggregator;
pub use count::{AGGREGATE_TAGS, COUNT_TAG, CountReport, Counter, count};
pub use error::{CountError, Result};
