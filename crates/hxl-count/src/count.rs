//! Counting value combinations.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::io::Write;

use hxl_model::{Hashtag, Row};

use crate::aggregate::Aggregator;
use crate::error::Result;

/// Output tag for the row count of each group.
pub const COUNT_TAG: &str = "#x_count_num";
/// Output tags for the aggregate statistics, in column order.
pub const AGGREGATE_TAGS: [&str; 4] = [
    "#x_sum_num",
    "#x_average_num",
    "#x_min_num",
    "#x_max_num",
];

/// Accumulates groups keyed by the first value of each requested tag.
#[derive(Debug, Clone)]
pub struct Counter {
    tags: Vec<Hashtag>,
    aggregate: Option<Hashtag>,
    groups: BTreeMap<Vec<String>, Aggregator>,
}

impl Counter {
    pub fn new(tags: Vec<Hashtag>) -> Self {
        Self {
            tags,
            aggregate: None,
            groups: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_aggregate(mut self, tag: Option<Hashtag>) -> Self {
        self.aggregate = tag;
        self
    }

    /// Add one row. Tags with no column in the row are left out of its
    /// key; a row with none of the tags is skipped.
    pub fn add(&mut self, row: &Row) {
        let key: Vec<String> = self
            .tags
            .iter()
            .filter_map(|tag| row.first_value_for(tag))
            .map(str::to_string)
            .collect();
        if key.is_empty() {
            tracing::trace!(row = row.row_number(), "no counted tags in row");
            return;
        }
        let value = self
            .aggregate
            .as_ref()
            .and_then(|tag| row.first_value_for(tag));
        self.groups.entry(key).or_default().add(value);
    }

    pub fn finish(self) -> CountReport {
        tracing::debug!(groups = self.groups.len(), "counted value combinations");
        CountReport {
            tags: self.tags,
            groups: self.groups,
        }
    }
}

/// Count value combinations of `tags` across `rows`.
pub fn count<I>(rows: I, tags: Vec<Hashtag>, aggregate: Option<Hashtag>) -> CountReport
where
    I: IntoIterator,
    I::Item: Borrow<Row>,
{
    let mut counter = Counter::new(tags).with_aggregate(aggregate);
    for row in rows {
        counter.add(row.borrow());
    }
    counter.finish()
}

/// Groups sorted by key.
#[derive(Debug, Clone)]
pub struct CountReport {
    tags: Vec<Hashtag>,
    groups: BTreeMap<Vec<String>, Aggregator>,
}

impl CountReport {
    pub fn groups(&self) -> impl Iterator<Item = (&[String], &Aggregator)> {
        self.groups.iter().map(|(key, agg)| (key.as_slice(), agg))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// True if any group aggregated a number.
    pub fn seen_numbers(&self) -> bool {
        self.groups.values().any(Aggregator::seen_numbers)
    }

    /// Hashtag row of the output.
    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = self.tags.iter().map(ToString::to_string).collect();
        header.push(COUNT_TAG.to_string());
        if self.seen_numbers() {
            header.extend(AGGREGATE_TAGS.iter().map(|tag| (*tag).to_string()));
        }
        header
    }

    /// Data rows of the output, one per group.
    pub fn records(&self) -> Vec<Vec<String>> {
        let with_stats = self.seen_numbers();
        self.groups
            .iter()
            .map(|(key, agg)| {
                let mut record = key.clone();
                record.push(agg.count().to_string());
                if with_stats {
                    for stat in [agg.sum(), agg.average(), agg.min(), agg.max()] {
                        record.push(stat.map(|n| n.to_string()).unwrap_or_default());
                    }
                }
                record
            })
            .collect()
    }

    /// Write the report as HXL CSV (hashtag row, then data).
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);
        writer.write_record(self.header())?;
        for record in self.records() {
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
