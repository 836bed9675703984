//! Hashtag names.
//!
//! A hashtag identifies the semantic meaning of a column (e.g. `#sector`).
//! Names start with a letter followed by letters, digits or underscores.
//! Matching is case-insensitive, so the canonical form is lower-case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// A canonical (lower-case) hashtag name, stored without the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hashtag(String);

impl Hashtag {
    /// Parse a hashtag from `#name` or `name`.
    ///
    /// Surrounding whitespace is ignored and the name is lower-cased.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let name = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !is_token(name) {
            return Err(ModelError::InvalidHashtag(text.to_string()));
        }
        Ok(Self(name.to_ascii_lowercase()))
    }

    /// The name without the leading `#`.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hashtag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for Hashtag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Hashtag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hashtag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Returns true if `value` is a letter followed by letters, digits or underscores.
pub fn is_token(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Hashtag::parse("#sector").unwrap().name(), "sector");
        assert_eq!(Hashtag::parse("sector").unwrap().name(), "sector");
        assert_eq!(Hashtag::parse("  #Affected_Num ").unwrap().name(), "affected_num");
    }

    #[test]
    fn rejects_bad_names() {
        assert!(Hashtag::parse("").is_err());
        assert!(Hashtag::parse("#").is_err());
        assert!(Hashtag::parse("#1abc").is_err());
        assert!(Hashtag::parse("#_abc").is_err());
        assert!(Hashtag::parse("#ab-c").is_err());
        assert!(Hashtag::parse("##abc").is_err());
    }

    #[test]
    fn displays_with_hash() {
        assert_eq!(Hashtag::parse("ORG").unwrap().to_string(), "#org");
    }
}
