//! Schema rules.
//!
//! A rule targets one hashtag and carries any combination of constraints.
//! Value checks run in a fixed order and stop at the first failure, so a
//! value produces at most one error:
//!
//! 1. data type
//! 2. numeric range (`minValue` / `maxValue`)
//! 3. pattern
//! 4. enumeration
//! 5. taxonomy (membership, then level)
//!
//! Empty values (blank after trimming) skip all value checks and do not
//! count toward `minOccur` / `maxOccur`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use hxl_model::{Hashtag, Row, Taxonomy};
use regex::Regex;

use crate::data_type::{DataType, parse_number};
use crate::error::{Result, SchemaError};
use crate::issue::{ErrorKind, ValidationError};
use crate::sink::{DiscardSink, ErrorSink};

/// True if `value` counts as "no value present".
pub fn is_empty_value(value: &str) -> bool {
    value.trim().is_empty()
}

/// Allowed literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Enumeration {
    exact: BTreeSet<String>,
    folded: BTreeSet<String>,
}

impl Enumeration {
    fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let exact: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        let folded = exact.iter().map(|value| value.to_lowercase()).collect();
        Self { exact, folded }
    }

    fn contains(&self, value: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            self.exact.contains(value)
        } else {
            self.folded.contains(&value.to_lowercase())
        }
    }
}

/// Validation rule for a single hashtag.
///
/// Rules are stateless: every call computes its result fresh, so a rule
/// can be shared across rows and threads.
#[derive(Clone)]
pub struct SchemaRule {
    tag: Hashtag,
    data_type: DataType,
    min_value: Option<f64>,
    max_value: Option<f64>,
    pattern: Option<Regex>,
    enumeration: Option<Enumeration>,
    case_sensitive: bool,
    taxonomy: Option<Arc<Taxonomy>>,
    taxonomy_level: Option<u32>,
    min_occur: Option<usize>,
    max_occur: Option<usize>,
    sink: Arc<dyn ErrorSink>,
}

impl SchemaRule {
    /// A rule with no constraints; every value passes.
    pub fn new(tag: Hashtag) -> Self {
        Self {
            tag,
            data_type: DataType::None,
            min_value: None,
            max_value: None,
            pattern: None,
            enumeration: None,
            case_sensitive: true,
            taxonomy: None,
            taxonomy_level: None,
            min_occur: None,
            max_occur: None,
            sink: Arc::new(DiscardSink),
        }
    }

    /// Parse `tag` and create an unconstrained rule.
    pub fn for_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(Hashtag::parse(tag)?))
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    #[must_use]
    pub fn with_min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    #[must_use]
    pub fn with_max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Set the value pattern; values must contain a match.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    #[must_use]
    pub fn with_enumeration<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumeration = Some(Enumeration::new(values));
        self
    }

    /// Enumeration matching is case-sensitive unless turned off here.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: Arc<Taxonomy>) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Require taxonomy terms at exactly this level.
    #[must_use]
    pub fn with_taxonomy_level(mut self, level: u32) -> Self {
        self.taxonomy_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_min_occur(mut self, min: usize) -> Self {
        self.min_occur = Some(min);
        self
    }

    #[must_use]
    pub fn with_max_occur(mut self, max: usize) -> Self {
        self.max_occur = Some(max);
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn tag(&self) -> &Hashtag {
        &self.tag
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn min_occur(&self) -> Option<usize> {
        self.min_occur
    }

    pub fn max_occur(&self) -> Option<usize> {
        self.max_occur
    }

    /// Reject contradictory bounds.
    pub fn verify(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_value, self.max_value)
            && min > max
        {
            return Err(SchemaError::InvalidRange {
                tag: self.tag.to_string(),
                min,
                max,
            });
        }
        if let (Some(min), Some(max)) = (self.min_occur, self.max_occur)
            && min > max
        {
            return Err(SchemaError::InvalidOccurrence {
                tag: self.tag.to_string(),
                min,
                max,
            });
        }
        Ok(())
    }

    /// Validate a single value, reporting at most one error to the sink.
    pub fn validate(&self, value: &str) -> bool {
        match self.check_value(value) {
            Some(error) => {
                self.report(error);
                false
            }
            None => true,
        }
    }

    /// Validate the rule's hashtag in `row`: cardinality plus every present value.
    pub fn validate_row(&self, row: &Row) -> bool {
        let errors = self.check_row(row);
        let valid = errors.is_empty();
        for error in errors {
            self.report(error);
        }
        valid
    }

    /// First violation for `value`, without reporting it.
    pub fn check_value(&self, value: &str) -> Option<ValidationError> {
        if is_empty_value(value) {
            return None;
        }
        let (kind, message) = self
            .data_type
            .check(value)
            .or_else(|| self.check_range(value))
            .or_else(|| self.check_pattern(value))
            .or_else(|| self.check_enumeration(value))
            .or_else(|| self.check_taxonomy(value))?;
        Some(ValidationError::new(&self.tag, kind, Some(value), message))
    }

    /// All violations for `row`, without reporting them.
    ///
    /// The cardinality error (if any) comes first, then value errors in
    /// column order.
    pub fn check_row(&self, row: &Row) -> Vec<ValidationError> {
        let present: Vec<&str> = row
            .values_for(&self.tag)
            .into_iter()
            .filter(|value| !is_empty_value(value))
            .collect();

        let mut errors = Vec::new();
        if let Some(error) = self.check_occurrences(present.len()) {
            errors.push(error.with_row(row));
        }
        for value in present {
            if let Some(error) = self.check_value(value) {
                errors.push(error.with_row(row));
            }
        }
        errors
    }

    fn report(&self, error: ValidationError) {
        tracing::trace!(tag = %error.tag, kind = %error.kind, "rule violation");
        self.sink.report(error);
    }

    fn check_occurrences(&self, count: usize) -> Option<ValidationError> {
        if let Some(min) = self.min_occur
            && count < min
        {
            return Some(ValidationError::new(
                &self.tag,
                ErrorKind::TooFewOccurrences,
                None,
                format!("expected at least {min} value(s) for {}, found {count}", self.tag),
            ));
        }
        if let Some(max) = self.max_occur
            && count > max
        {
            return Some(ValidationError::new(
                &self.tag,
                ErrorKind::TooManyOccurrences,
                None,
                format!("expected at most {max} value(s) for {}, found {count}", self.tag),
            ));
        }
        None
    }

    fn check_range(&self, value: &str) -> Option<(ErrorKind, String)> {
        if self.min_value.is_none() && self.max_value.is_none() {
            return None;
        }
        let number = parse_number(value);
        if let Some(min) = self.min_value {
            match number {
                None => {
                    return Some((
                        ErrorKind::ValueTooLow,
                        format!("'{value}' is not a number (minimum is {min})"),
                    ));
                }
                Some(number) if number < min => {
                    return Some((
                        ErrorKind::ValueTooLow,
                        format!("{number} is less than the minimum {min}"),
                    ));
                }
                Some(_) => {}
            }
        }
        if let Some(max) = self.max_value {
            match number {
                None => {
                    return Some((
                        ErrorKind::ValueTooHigh,
                        format!("'{value}' is not a number (maximum is {max})"),
                    ));
                }
                Some(number) if number > max => {
                    return Some((
                        ErrorKind::ValueTooHigh,
                        format!("{number} is greater than the maximum {max}"),
                    ));
                }
                Some(_) => {}
            }
        }
        None
    }

    fn check_pattern(&self, value: &str) -> Option<(ErrorKind, String)> {
        let pattern = self.pattern.as_ref()?;
        if pattern.is_match(value) {
            return None;
        }
        Some((
            ErrorKind::PatternMismatch,
            format!("'{value}' does not match pattern {}", pattern.as_str()),
        ))
    }

    fn check_enumeration(&self, value: &str) -> Option<(ErrorKind, String)> {
        let enumeration = self.enumeration.as_ref()?;
        if enumeration.contains(value, self.case_sensitive) {
            return None;
        }
        let allowed: Vec<&str> = enumeration.exact.iter().map(String::as_str).collect();
        Some((
            ErrorKind::ValueNotAllowed,
            format!("'{value}' is not one of: {}", allowed.join(", ")),
        ))
    }

    fn check_taxonomy(&self, value: &str) -> Option<(ErrorKind, String)> {
        let taxonomy = self.taxonomy.as_ref()?;
        let Some(level) = taxonomy.level_of(value) else {
            return Some((
                ErrorKind::NotInTaxonomy,
                format!("'{value}' is not a known taxonomy term"),
            ));
        };
        match self.taxonomy_level {
            Some(expected) if expected != level => Some((
                ErrorKind::WrongTaxonomyLevel,
                format!("'{value}' is a level {level} term, expected level {expected}"),
            )),
            _ => None,
        }
    }
}

impl fmt::Debug for SchemaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRule")
            .field("tag", &self.tag)
            .field("data_type", &self.data_type)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("enumeration", &self.enumeration)
            .field("case_sensitive", &self.case_sensitive)
            .field("taxonomy_terms", &self.taxonomy.as_ref().map(|t| t.len()))
            .field("taxonomy_level", &self.taxonomy_level)
            .field("min_occur", &self.min_occur)
            .field("max_occur", &self.max_occur)
            .finish_non_exhaustive()
    }
}
