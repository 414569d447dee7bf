//! Aggregation of colony records for the dashboard views.
//!
//! Both aggregators are pure functions of the record slice and the current
//! selection. They are re-run from scratch on every selection change; nothing
//! here caches or updates incrementally.

pub mod heat_grid;
pub mod state_average;

pub use heat_grid::{aggregate_cells, HeatCell, HeatGrid};
pub use state_average::{aggregate_by_state, StateAverage};

use bees_core::{Error, Record};
use std::collections::HashSet;

/// Fail with [`Error::DuplicateRecord`] on the first (state, year, quarter)
/// key that occurs twice.
pub fn ensure_unique(records: &[Record]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert((record.state(), record.year(), record.quarter())) {
            return Err(Error::DuplicateRecord {
                state: record.state().to_string(),
                year: record.year(),
                quarter: record.quarter(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_records_pass() {
        let records = vec![
            Record::new("Texas", 2015, 1).unwrap(),
            Record::new("Texas", 2015, 2).unwrap(),
            Record::new("Utah", 2015, 1).unwrap(),
        ];
        assert_eq!(ensure_unique(&records), Ok(()));
        assert_eq!(ensure_unique(&[]), Ok(()));
    }

    #[test]
    fn duplicate_key_is_reported() {
        let records = vec![
            Record::new("Texas", 2015, 1).unwrap(),
            Record::new("Utah", 2015, 1).unwrap(),
            Record::new("Texas", 2015, 1).unwrap(),
        ];
        assert_eq!(
            ensure_unique(&records),
            Err(Error::DuplicateRecord {
                state: "Texas".to_string(),
                year: 2015,
                quarter: 1,
            })
        );
    }
}
