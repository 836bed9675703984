//! Column descriptors.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::hashtag::{Hashtag, is_token};

/// A column's hashtag plus optional attributes, e.g. `#org+funder`.
///
/// Attributes carry no meaning for validation; they are preserved so the
/// column can be written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Hashtag, or `None` for an untagged column.
    pub tag: Option<Hashtag>,
    /// Lower-cased attributes in source order.
    pub attributes: Vec<String>,
    /// Free-text header that appeared above the hashtag row.
    pub header: Option<String>,
    /// 0-based position in the source.
    pub column_number: usize,
}

impl Column {
    /// Create a tagged column without attributes.
    pub fn new(tag: Hashtag, column_number: usize) -> Self {
        Self {
            tag: Some(tag),
            attributes: Vec::new(),
            header: None,
            column_number,
        }
    }

    /// Create a column with no hashtag.
    pub fn untagged(column_number: usize) -> Self {
        Self {
            tag: None,
            attributes: Vec::new(),
            header: None,
            column_number,
        }
    }

    /// Parse a column spec such as `#adm1+code`.
    ///
    /// The leading `#` is required. An empty spec yields an untagged column.
    pub fn parse(spec: &str, column_number: usize) -> Result<Self> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Ok(Self::untagged(column_number));
        }
        if !trimmed.starts_with('#') {
            return Err(ModelError::InvalidHashtag(spec.to_string()));
        }
        let mut parts = trimmed.split('+');
        let tag = Hashtag::parse(parts.next().unwrap_or_default())?;
        let mut attributes = Vec::new();
        for part in parts {
            let attribute = part.trim();
            if !is_token(attribute) {
                return Err(ModelError::InvalidAttribute {
                    spec: spec.to_string(),
                    attribute: attribute.to_string(),
                });
            }
            attributes.push(attribute.to_ascii_lowercase());
        }
        Ok(Self {
            tag: Some(tag),
            attributes,
            header: None,
            column_number,
        })
    }

    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// True if this column carries `tag`.
    pub fn has_tag(&self, tag: &Hashtag) -> bool {
        self.tag.as_ref() == Some(tag)
    }

    /// Render as `#tag+attr`; untagged columns render as an empty string.
    pub fn display_tag(&self) -> String {
        let Some(tag) = &self.tag else {
            return String::new();
        };
        let mut out = tag.to_string();
        for attribute in &self.attributes {
            out.push('+');
            out.push_str(attribute);
        }
        out
    }
}
