//! Tagging untagged spreadsheets.
//!
//! A [`Tagger`] maps free-text headers to column specs and inserts a
//! hashtag row under the first row whose headers match. Matching ignores
//! case and runs of whitespace. With `allow_partial` (the default) a spec
//! also matches any header that contains it.

use hxl_model::Column;

use crate::error::{IngestError, Result};
use crate::reader::{HASHTAG_SCAN_DEPTH, HxlReader};

#[derive(Debug, Clone)]
struct TagSpec {
    /// Normalized header text.
    header: String,
    /// Canonical `#tag+attr` form.
    tag: String,
}

/// Adds hashtags to a table with only text headers.
#[derive(Debug, Clone)]
pub struct Tagger {
    specs: Vec<TagSpec>,
    allow_partial: bool,
}

impl Tagger {
    /// Build from `(header text, column spec)` pairs; earlier pairs win.
    pub fn new<I, H, T>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (H, T)>,
        H: AsRef<str>,
        T: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (header, spec) in specs {
            let (header, spec) = (header.as_ref(), spec.as_ref());
            let column = Column::parse(spec, 0).map_err(|source| IngestError::InvalidTagSpec {
                header: header.to_string(),
                spec: spec.to_string(),
                source,
            })?;
            parsed.push(TagSpec {
                header: normalize_header(header),
                tag: column.display_tag(),
            });
        }
        Ok(Self {
            specs: parsed,
            allow_partial: true,
        })
    }

    #[must_use]
    pub fn with_allow_partial(mut self, allow_partial: bool) -> Self {
        self.allow_partial = allow_partial;
        self
    }

    /// Column spec for `header`, if any spec matches.
    pub fn match_header(&self, header: &str) -> Option<&str> {
        let header = normalize_header(header);
        if header.is_empty() {
            return None;
        }
        self.specs
            .iter()
            .find(|spec| {
                spec.header == header || (self.allow_partial && header.contains(&spec.header))
            })
            .map(|spec| spec.tag.as_str())
    }

    /// Insert a hashtag row below the first row with a matching header.
    pub fn tag_rows(&self, mut rows: Vec<Vec<String>>) -> Result<Vec<Vec<String>>> {
        let scanned = rows.len().min(HASHTAG_SCAN_DEPTH);
        for idx in 0..scanned {
            let tags: Vec<String> = rows[idx]
                .iter()
                .map(|header| self.match_header(header).unwrap_or_default().to_string())
                .collect();
            if tags.iter().any(|tag| !tag.is_empty()) {
                tracing::debug!(
                    header_row = idx + 1,
                    tagged = tags.iter().filter(|tag| !tag.is_empty()).count(),
                    "tagged header row"
                );
                rows.insert(idx + 1, tags);
                return Ok(rows);
            }
        }
        Err(IngestError::NoHeaderMatched { scanned })
    }

    /// Tag `rows` and read the result as an HXL table.
    pub fn read(&self, rows: Vec<Vec<String>>) -> Result<HxlReader> {
        HxlReader::from_rows(self.tag_rows(rows)?)
    }
}

/// Lower-case, trim, and collapse runs of whitespace to one space.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Country   Name "), "country name");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn test_match_header() {
        let tagger = Tagger::new([("name", "#country+name")]).unwrap();
        assert_eq!(tagger.match_header("Country Name"), Some("#country+name"));
        assert_eq!(tagger.match_header("Code"), None);
        assert_eq!(tagger.match_header(""), None);

        let strict = tagger.with_allow_partial(false);
        assert_eq!(strict.match_header("Country Name"), None);
        assert_eq!(strict.match_header(" NAME "), Some("#country+name"));
    }

    #[test]
    fn test_invalid_spec() {
        let err = Tagger::new([("Country", "country")]).unwrap_err();
        assert!(matches!(err, IngestError::InvalidTagSpec { .. }));
    }
}
