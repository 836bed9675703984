//! Per-group running statistics.

/// Count of rows in a group plus statistics over the numeric values of
/// the aggregate column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregator {
    count: usize,
    numbers: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one row. `value` is the row's aggregate value, if any;
    /// values that do not parse as finite numbers are counted but not
    /// aggregated.
    pub fn add(&mut self, value: Option<&str>) {
        self.count += 1;
        let Some(n) = value.and_then(parse_number) else {
            return;
        };
        self.numbers += 1;
        self.sum += n;
        self.min = Some(self.min.map_or(n, |min| min.min(n)));
        self.max = Some(self.max.map_or(n, |max| max.max(n)));
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// True once at least one numeric value was added.
    pub fn seen_numbers(&self) -> bool {
        self.numbers > 0
    }

    pub fn sum(&self) -> Option<f64> {
        self.seen_numbers().then_some(self.sum)
    }

    /// Sum divided by the group's row count, numeric or not.
    pub fn average(&self) -> Option<f64> {
        self.seen_numbers().then(|| self.sum / self.count as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let mut agg = Aggregator::new();
        for value in [Some("10"), Some(" 2.5 "), Some("n/a"), None, Some("-1")] {
            agg.add(value);
        }
        assert_eq!(agg.count(), 5);
        assert_eq!(agg.sum(), Some(11.5));
        assert_eq!(agg.min(), Some(-1.0));
        assert_eq!(agg.max(), Some(10.0));
        // Non-numeric rows still count toward the divisor
        assert_eq!(agg.average(), Some(2.3));
    }

    #[test]
    fn test_no_numbers() {
        let mut agg = Aggregator::new();
        agg.add(Some("abc"));
        agg.add(Some("inf"));
        assert_eq!(agg.count(), 2);
        assert!(!agg.seen_numbers());
        assert_eq!(agg.sum(), None);
        assert_eq!(agg.average(), None);
        assert_eq!(agg.min(), None);
    }
}
