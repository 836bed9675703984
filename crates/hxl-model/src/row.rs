//! Data rows.

use std::sync::Arc;

use crate::column::Column;
use crate::hashtag::Hashtag;

/// One data record aligned with the dataset's column descriptors.
///
/// Columns are shared across every row of a dataset and never change after
/// construction; values may be replaced as a batch with [`Row::set_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[Column]>,
    values: Vec<String>,
    row_number: usize,
    source_row_number: Option<usize>,
}

impl Row {
    /// Create an empty row. `row_number` is 1-based.
    pub fn new(columns: Arc<[Column]>, row_number: usize) -> Self {
        Self {
            columns,
            values: Vec::new(),
            row_number,
            source_row_number: None,
        }
    }

    /// Physical 1-based position in the source, when blank or header lines were skipped.
    #[must_use]
    pub fn with_source_row_number(mut self, source_row_number: usize) -> Self {
        self.source_row_number = Some(source_row_number);
        self
    }

    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_values(values);
        self
    }

    /// Replace all values. Values beyond the last column are kept but never
    /// reachable by hashtag; missing trailing values read as empty.
    pub fn set_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn source_row_number(&self) -> Option<usize> {
        self.source_row_number
    }

    /// Value at a column index, empty when the row is short.
    pub fn get(&self, index: usize) -> Option<&str> {
        if index >= self.columns.len() {
            return None;
        }
        Some(self.values.get(index).map_or("", String::as_str))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All values under `tag`, in column order.
    pub fn values_for(&self, tag: &Hashtag) -> Vec<&str> {
        self.iter()
            .filter(|(column, _)| column.has_tag(tag))
            .map(|(_, value)| value)
            .collect()
    }

    /// The first value under `tag`, or `None` if no column carries it.
    pub fn first_value_for(&self, tag: &Hashtag) -> Option<&str> {
        self.iter()
            .find(|(column, _)| column.has_tag(tag))
            .map(|(_, value)| value)
    }

    /// Iterate `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Column, &str)> {
        self.columns.iter().enumerate().map(|(idx, column)| {
            let value = self.values.get(idx).map_or("", String::as_str);
            (column, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Arc<[Column]> {
        vec![
            Column::parse("#affected_num", 0).unwrap(),
            Column::parse("#sector", 1).unwrap(),
            Column::parse("#sector+cluster", 2).unwrap(),
        ]
        .into()
    }

    #[test]
    fn looks_up_by_tag() {
        let row = Row::new(columns(), 1).with_values(["35", "WASH", "Health"]);
        let sector = Hashtag::parse("#sector").unwrap();
        assert_eq!(row.values_for(&sector), vec!["WASH", "Health"]);
        assert_eq!(row.first_value_for(&sector), Some("WASH"));
    }

    #[test]
    fn missing_tag_is_absent() {
        let row = Row::new(columns(), 1).with_values(["35", "WASH", ""]);
        let org = Hashtag::parse("#org").unwrap();
        assert!(row.values_for(&org).is_empty());
        assert_eq!(row.first_value_for(&org), None);
    }

    #[test]
    fn short_row_reads_empty() {
        let row = Row::new(columns(), 4).with_values(["35"]);
        let sector = Hashtag::parse("sector").unwrap();
        assert_eq!(row.values_for(&sector), vec!["", ""]);
        assert_eq!(row.get(2), Some(""));
        assert_eq!(row.get(3), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn source_row_number_is_optional() {
        let row = Row::new(columns(), 1);
        assert_eq!(row.source_row_number(), None);
        let row = row.with_source_row_number(3);
        assert_eq!(row.row_number(), 1);
        assert_eq!(row.source_row_number(), Some(3));
    }
}
