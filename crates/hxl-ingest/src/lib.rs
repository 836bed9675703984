//! HXL ingestion: turning delimited text into rows with hashtag columns.

pub mod error;
pub mod reader;
pub mod tagger;

pub use error::{IngestError, Result};
pub use reader::{HASHTAG_SCAN_DEPTH, HxlReader};
pub use tagger::{Tagger, normalize_header};
