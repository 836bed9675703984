//! Reading HXL rows from CSV.
//!
//! An HXL table has a row of hashtags somewhere near the top. Anything
//! above it is ignored except the row directly above, which supplies
//! free-text column headers:
//!
//! ```text
//! Organisation,Sector,People affected     <- headers (optional)
//! #org,#sector,#affected_num              <- hashtag row
//! UNICEF,WASH,35                          <- data
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use hxl_model::{Column, Row};

use crate::error::{IngestError, Result};

/// How many leading rows to scan for the hashtag row.
pub const HASHTAG_SCAN_DEPTH: usize = 25;

type Records = Box<dyn Iterator<Item = csv::Result<StringRecord>>>;

/// Iterator over the data rows of an HXL table.
pub struct HxlReader {
    records: Records,
    columns: Arc<[Column]>,
    /// Records pulled from `records` so far.
    records_read: usize,
    row_number: usize,
}

impl HxlReader {
    /// Read CSV from any reader.
    pub fn from_reader<R: Read + 'static>(reader: R) -> Result<Self> {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self::from_records(Box::new(records))
    }

    /// Read a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        tracing::debug!(path = %path.display(), "reading HXL table");
        Self::from_reader(file)
    }

    /// Read rows that are already in memory.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        let records = rows.into_iter().map(|row| Ok(StringRecord::from(row)));
        Self::from_records(Box::new(records))
    }

    fn from_records(mut records: Records) -> Result<Self> {
        let mut previous: Option<StringRecord> = None;
        for scanned in 1..=HASHTAG_SCAN_DEPTH {
            let Some(record) = records.next() else {
                return Err(IngestError::NoHashtagRow {
                    scanned: scanned - 1,
                });
            };
            let record = record?;
            let line = source_line(&record, scanned);
            if let Some(columns) = parse_hashtag_row(&record, previous.as_ref()) {
                tracing::debug!(
                    line,
                    columns = columns.len(),
                    "found hashtag row"
                );
                return Ok(Self {
                    records,
                    columns: columns.into(),
                    records_read: scanned,
                    row_number: 0,
                });
            }
            previous = Some(record);
        }
        Err(IngestError::NoHashtagRow {
            scanned: HASHTAG_SCAN_DEPTH,
        })
    }

    /// Column descriptors shared by every row.
    pub fn columns(&self) -> &Arc<[Column]> {
        &self.columns
    }

    /// Display form of each column's tag (`""` for untagged columns).
    pub fn display_tags(&self) -> Vec<String> {
        self.columns.iter().map(Column::display_tag).collect()
    }

    /// Free-text headers, if the input had a header row.
    pub fn headers(&self) -> Vec<Option<&str>> {
        self.columns
            .iter()
            .map(|column| column.header.as_deref())
            .collect()
    }
}

impl Iterator for HxlReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = self.records.next()?;
            self.records_read += 1;
            let record = match record {
                Ok(record) => record,
                Err(err) => return Some(Err(err.into())),
            };
            let line = source_line(&record, self.records_read);
            if is_blank(&record) {
                tracing::trace!(line, "skipping blank row");
                continue;
            }
            if record.len() != self.columns.len() {
                tracing::warn!(
                    line,
                    values = record.len(),
                    columns = self.columns.len(),
                    "ragged row"
                );
            }
            self.row_number += 1;
            let row = Row::new(Arc::clone(&self.columns), self.row_number)
                .with_source_row_number(line)
                .with_values(record.iter());
            return Some(Ok(row));
        }
    }
}

/// Physical 1-based line of `record`. The csv parser drops empty lines
/// without yielding a record, so the record count alone can fall behind.
/// In-memory rows have no position and use `fallback`.
fn source_line(record: &StringRecord, fallback: usize) -> usize {
    record
        .position()
        .and_then(|position| usize::try_from(position.line()).ok())
        .unwrap_or(fallback)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|value| value.trim().is_empty())
}

/// Parse `record` as a hashtag row: every non-empty cell must be a column
/// spec, and at least one cell must be non-empty.
fn parse_hashtag_row(record: &StringRecord, headers: Option<&StringRecord>) -> Option<Vec<Column>> {
    if is_blank(record) {
        return None;
    }
    let mut columns = Vec::with_capacity(record.len());
    for (idx, cell) in record.iter().enumerate() {
        let mut column = Column::parse(cell, idx).ok()?;
        if let Some(header) = headers
            .and_then(|headers| headers.get(idx))
            .map(str::trim)
            .filter(|header| !header.is_empty())
        {
            column = column.with_header(header);
        }
        columns.push(column);
    }
    Some(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> StringRecord {
        StringRecord::from(values.to_vec())
    }

    #[test]
    fn test_hashtag_row_detection() {
        assert!(parse_hashtag_row(&record(&["#org", "", "#sector+cluster"]), None).is_some());
        assert!(parse_hashtag_row(&record(&["#org", "Sector"]), None).is_none());
        assert!(parse_hashtag_row(&record(&["", " "]), None).is_none());
        assert!(parse_hashtag_row(&record(&["UNICEF", "WASH"]), None).is_none());
    }

    #[test]
    fn test_headers_attached() {
        let headers = record(&["Organisation", "  ", "Sector"]);
        let columns =
            parse_hashtag_row(&record(&["#org", "", "#sector"]), Some(&headers)).unwrap();
        assert_eq!(columns[0].header.as_deref(), Some("Organisation"));
        assert_eq!(columns[1].header, None);
        assert_eq!(columns[2].header.as_deref(), Some("Sector"));
    }
}
