//! Schemas: ordered rule sets applied row by row.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use hxl_model::Row;
use serde::Serialize;

use crate::issue::ValidationError;
use crate::rule::SchemaRule;
use crate::sink::ErrorSink;

/// Outcome of scanning a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub rows_checked: usize,
    pub invalid_rows: usize,
    pub error_count: usize,
}

impl ValidationSummary {
    pub fn is_valid(&self) -> bool {
        self.invalid_rows == 0
    }
}

/// An ordered collection of rules sharing one error sink.
///
/// Every rule is applied to every row; there is no short-circuit across
/// rules, so one row can surface violations from several rules.
#[derive(Clone)]
pub struct Schema {
    rules: Vec<SchemaRule>,
    sink: Arc<dyn ErrorSink>,
}

impl Schema {
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            rules: Vec::new(),
            sink,
        }
    }

    /// Append a rule, rebinding it to this schema's sink.
    #[must_use]
    pub fn with_rule(mut self, rule: SchemaRule) -> Self {
        self.push_rule(rule);
        self
    }

    pub fn push_rule(&mut self, rule: SchemaRule) {
        self.rules.push(rule.with_sink(Arc::clone(&self.sink)));
    }

    pub fn rules(&self) -> &[SchemaRule] {
        &self.rules
    }

    pub fn sink(&self) -> &Arc<dyn ErrorSink> {
        &self.sink
    }

    /// Validate one row; errors go to the sink in rule order.
    pub fn validate_row(&self, row: &Row) -> bool {
        self.rules
            .iter()
            .fold(true, |valid, rule| rule.validate_row(row) && valid)
    }

    /// All violations for `row`, without reporting them.
    pub fn check_row(&self, row: &Row) -> Vec<ValidationError> {
        self.rules
            .iter()
            .flat_map(|rule| rule.check_row(row))
            .collect()
    }

    /// Validate rows in order and summarize the scan.
    pub fn validate_rows<I>(&self, rows: I) -> ValidationSummary
    where
        I: IntoIterator,
        I::Item: Borrow<Row>,
    {
        let span = tracing::debug_span!("validate_rows", rules = self.rules.len());
        let _guard = span.enter();

        let mut summary = ValidationSummary::default();
        for row in rows {
            let row = row.borrow();
            let errors = self.check_row(row);
            summary.rows_checked += 1;
            if !errors.is_empty() {
                summary.invalid_rows += 1;
                summary.error_count += errors.len();
            }
            for error in errors {
                self.sink.report(error);
            }
        }
        tracing::debug!(
            rows = summary.rows_checked,
            invalid = summary.invalid_rows,
            errors = summary.error_count,
            "validation finished"
        );
        summary
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
