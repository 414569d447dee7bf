use crate::error::Error;
use crate::metric::{Metric, METRIC_COUNT};
use csv::StringRecord;

/// Header names of the key columns.
pub const STATE_COLUMN: &str = "state";
pub const YEAR_COLUMN: &str = "year";
pub const QUARTER_COLUMN: &str = "quarter";

/// One row of the colony dataset.
///
/// Metric values keep the distinction between a parsed number and a field
/// that was empty or non-numeric (`None`). Aggregators read values through
/// [`Record::value`], which applies [`coerce`].
///
/// Values are set while building a record; a finished record is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    state: String,
    year: i32,
    quarter: u8,
    values: [Option<f64>; METRIC_COUNT],
}

/// Coerce a raw metric value for aggregation.
///
/// Missing or non-numeric fields count as `0.0`. This is the only place the
/// rule lives; both aggregators go through it.
pub fn coerce(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse one metric field of the source CSV.
///
/// Returns `None` for empty, non-numeric and non-finite fields.
pub fn parse_metric_field(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

impl Record {
    /// Create a record with every metric missing.
    pub fn new(state: &str, year: i32, quarter: u8) -> Result<Self, Error> {
        let state = state.trim();
        if state.is_empty() {
            return Err(Error::InvalidRecord("empty state".to_string()));
        }
        if !(1..=4).contains(&quarter) {
            return Err(Error::InvalidRecord(format!(
                "{state} {year}: quarter {quarter} out of range"
            )));
        }
        Ok(Record {
            state: state.to_string(),
            year,
            quarter,
            values: [None; METRIC_COUNT],
        })
    }

    /// Builder-style setter, mostly for tests and fixtures.
    pub fn with_value(self, metric: Metric, value: f64) -> Self {
        self.with_raw_value(metric, Some(value))
    }

    /// Builder-style setter keeping the missing / present distinction.
    pub fn with_raw_value(mut self, metric: Metric, value: Option<f64>) -> Self {
        self.values[metric.index()] = value;
        self
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// The value as loaded, `None` if the source field was missing.
    pub fn raw_value(&self, metric: Metric) -> Option<f64> {
        self.values[metric.index()]
    }

    /// The coerced value used by aggregation.
    pub fn value(&self, metric: Metric) -> f64 {
        coerce(self.raw_value(metric))
    }
}

/// Column positions of a dataset CSV, resolved from its header row.
///
/// The key columns are required. Metric columns may be absent, in which case
/// every record reads them as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordColumns {
    state: usize,
    year: usize,
    quarter: usize,
    metrics: [Option<usize>; METRIC_COUNT],
}

impl RecordColumns {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, Error> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let required = |name: &str| {
            find(name).ok_or_else(|| Error::InvalidRecord(format!("missing column '{name}'")))
        };
        let mut metrics = [None; METRIC_COUNT];
        for metric in Metric::ALL {
            metrics[metric.index()] = find(metric.as_str());
            if metrics[metric.index()].is_none() {
                log::warn!("[Bees] no '{}' column, every row reads it as missing", metric);
            }
        }
        Ok(RecordColumns {
            state: required(STATE_COLUMN)?,
            year: required(YEAR_COLUMN)?,
            quarter: required(QUARTER_COLUMN)?,
            metrics,
        })
    }

    /// Metrics that have a column in this file.
    pub fn present_metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL
            .into_iter()
            .filter(|metric| self.metrics[metric.index()].is_some())
    }

    /// Turn one CSV row into a record.
    pub fn parse_row(&self, row: &StringRecord) -> Result<Record, Error> {
        let field = |i: usize| row.get(i).unwrap_or("").trim();
        let year: i32 = field(self.year)
            .parse()
            .map_err(|_| Error::InvalidRecord(format!("bad year '{}'", field(self.year))))?;
        let quarter: u8 = field(self.quarter)
            .parse()
            .map_err(|_| Error::InvalidRecord(format!("bad quarter '{}'", field(self.quarter))))?;
        let mut record = Record::new(field(self.state), year, quarter)?;
        for metric in Metric::ALL {
            let raw = self.metrics[metric.index()]
                .and_then(|i| row.get(i))
                .and_then(parse_metric_field);
            record = record.with_raw_value(metric, raw);
        }
        Ok(record)
    }
}
