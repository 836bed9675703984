//! Data type checks (`none`, `text`, `number`, `url`, `email`, `phone`).
//!
//! The format patterns are public constants so they can be checked on their own.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::issue::ErrorKind;

/// Scheme followed by `://` and a host.
pub const URL_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+\S*$";

/// Simplified `local@domain`.
pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

/// Digits, spaces, parentheses and hyphens with an optional leading `+` and
/// an optional extension such as `x1234` or `ext. 12`.
pub const PHONE_PATTERN: &str =
    r"(?i)^(?P<number>\+?[0-9\s()\-]+?)(?:\s*(?:x|ext\.?)\s*(?P<extension>[0-9]+))?$";

/// Fewest digits a phone number may have, not counting the extension.
pub const MIN_PHONE_DIGITS: usize = 7;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("Invalid URL regex"));

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("Invalid email regex"));

pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("Invalid phone regex"));

/// Declared type of a rule's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    None,
    Text,
    Number,
    Url,
    Email,
    Phone,
}

impl DataType {
    /// Parse a data type tag, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Some(Self::None),
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "url" => Some(Self::Url),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Text => "text",
            Self::Number => "number",
            Self::Url => "url",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Check a non-empty value; returns the failing kind and a message.
    pub fn check(&self, value: &str) -> Option<(ErrorKind, String)> {
        let ok = match self {
            Self::None | Self::Text => true,
            Self::Number => parse_number(value).is_some(),
            Self::Url => is_url(value),
            Self::Email => is_email(value),
            Self::Phone => is_phone(value),
        };
        if ok {
            return None;
        }
        let kind = match self {
            Self::Url => ErrorKind::InvalidUrl,
            Self::Email => ErrorKind::InvalidEmail,
            Self::Phone => ErrorKind::InvalidPhone,
            _ => ErrorKind::WrongDataType,
        };
        Some((kind, format!("expected {} but found '{value}'", self.describe())))
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::None | Self::Text => "text",
            Self::Number => "a number",
            Self::Url => "a URL",
            Self::Email => "an email address",
            Self::Phone => "a phone number",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a decimal real number, ignoring surrounding whitespace.
///
/// Infinities and NaN are not numbers here.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

pub fn is_url(value: &str) -> bool {
    URL_REGEX.is_match(value.trim())
}

pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Matches [`PHONE_PATTERN`] with at least [`MIN_PHONE_DIGITS`] digits.
pub fn is_phone(value: &str) -> bool {
    let Some(captures) = PHONE_REGEX.captures(value.trim()) else {
        return false;
    };
    let digits = captures
        .name("number")
        .map_or(0, |number| {
            number.as_str().chars().filter(char::is_ascii_digit).count()
        });
    digits >= MIN_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_tags() {
        assert_eq!(DataType::parse("Number"), Some(DataType::Number));
        assert_eq!(DataType::parse(" url "), Some(DataType::Url));
        assert_eq!(DataType::parse(""), Some(DataType::None));
        assert_eq!(DataType::parse("date"), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("35"), Some(35.0));
        assert_eq!(parse_number(" -10.1 "), Some(-10.1));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("ten"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn urls() {
        assert!(is_url("http://www.example.org"));
        assert!(is_url("https://example.org/path?q=1#frag"));
        assert!(is_url("ftp://data.example.org"));
        assert!(!is_url("hello, world"));
        assert!(!is_url("www.example.org"));
        assert!(!is_url("http://"));
    }

    #[test]
    fn emails() {
        assert!(is_email("somebody@example.org"));
        assert!(!is_email("hello, world"));
        assert!(!is_email("a@b@c"));
        assert!(!is_email("@example.org"));
    }

    #[test]
    fn phones() {
        assert!(is_phone("+1-613-555-1111 x1234"));
        assert!(is_phone("(613) 555-1111"));
        assert!(is_phone("613 555 1111 ext. 12"));
        assert!(!is_phone("123"));
        assert!(!is_phone("123456789abc"));
        // Extension digits do not count toward the minimum
        assert!(!is_phone("12345 x6789"));
    }

    #[test]
    fn check_reports_kind() {
        assert!(DataType::Text.check("anything").is_none());
        let (kind, message) = DataType::Number.check("ten").unwrap();
        assert_eq!(kind, ErrorKind::WrongDataType);
        assert_eq!(message, "expected a number but found 'ten'");
        assert_eq!(DataType::Phone.check("123").unwrap().0, ErrorKind::InvalidPhone);
    }
}
