//! Per-state averages for the bubble map.

use bees_core::region::UNITED_STATES;
use bees_core::{Metric, Record};
use serde::Serialize;
use std::collections::BTreeMap;

/// Lower bound of the bubble scale domain. The map uses a log scale, so a
/// zero average must not reach it.
pub const MIN_EXTENT: f64 = 1e-6;

/// Mean value of one metric per state, over every year and quarter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAverage {
    pub metric: Metric,
    pub averages: BTreeMap<String, f64>,
}

impl StateAverage {
    pub fn get(&self, state: &str) -> Option<f64> {
        self.averages.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.averages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    /// Sum of the state averages, shown on the whole-country bubble.
    ///
    /// A "United States" aggregate row already counts every state, so it is
    /// left out of the sum.
    pub fn national_total(&self) -> f64 {
        self.averages
            .iter()
            .filter(|(state, _)| state.as_str() != UNITED_STATES)
            .map(|(_, value)| value)
            .sum()
    }

    /// `(min, max)` of the averages, min clamped to [`MIN_EXTENT`].
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut values = self.averages.values().copied();
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some((min.max(MIN_EXTENT), max))
    }
}

/// Average `metric` per state.
///
/// Missing values are coerced to zero and still count toward the state's
/// denominator. States without records do not appear in the result.
pub fn aggregate_by_state(records: &[Record], metric: Metric) -> StateAverage {
    let mut totals: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(record.state()).or_insert((0.0, 0));
        entry.0 += record.value(metric);
        entry.1 += 1;
    }
    let averages = totals
        .into_iter()
        .map(|(state, (total, count))| (state.to_string(), total / f64::from(count)))
        .collect::<BTreeMap<_, _>>();
    log::debug!(
        "[Bees] aggregate_by_state({}): {} states from {} records",
        metric,
        averages.len(),
        records.len()
    );
    StateAverage { metric, averages }
}
