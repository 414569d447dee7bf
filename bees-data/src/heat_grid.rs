//! Year x quarter grid for the heat map.
//!
//! The grid is fixed: every year in [`YEARS`] times every quarter in
//! [`QUARTERS`], year-major. A position with no backing record is absent
//! (`None`), which is different from a recorded zero.
//!
//! Cell values for a state come from that state's row. For the whole country
//! the dataset's own "United States" rows are used when it has any;
//! otherwise each cell is the mean over every row for that year and quarter.

use bees_core::region::UNITED_STATES;
use bees_core::{Metric, Record, Region, Unit, QUARTERS, YEARS};
use serde::Serialize;
use std::collections::HashMap;

/// Number of cells in every grid.
pub const CELL_COUNT: usize = YEARS.len() * QUARTERS.len();

/// One (year, quarter) position of the heat map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatCell {
    pub year: i32,
    pub quarter: u8,
    /// Coerced metric value, `None` when no record exists for the position.
    pub actual_value: Option<f64>,
    /// Value the colour scale reads: the actual value for percentage
    /// metrics, percent of `max_actual` for counts.
    pub scaled_value: Option<f64>,
}

impl HeatCell {
    pub fn is_absent(&self) -> bool {
        self.actual_value.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatGrid {
    pub region: Region,
    pub metric: Metric,
    pub unit: Unit,
    pub years: [i32; 8],
    pub quarters: [u8; 4],
    pub cells: Vec<HeatCell>,
    /// Largest coerced value among present cells, `0.0` if none.
    pub max_actual: f64,
}

impl HeatGrid {
    pub fn cell(&self, year: i32, quarter: u8) -> Option<&HeatCell> {
        let y = YEARS.iter().position(|y| *y == year)?;
        let q = QUARTERS.iter().position(|q| *q == quarter)?;
        self.cells.get(y * QUARTERS.len() + q)
    }

    pub fn present_cells(&self) -> impl Iterator<Item = &HeatCell> {
        self.cells.iter().filter(|cell| !cell.is_absent())
    }
}

/// Build the heat map grid of `metric` for `region`.
///
/// If more than one row of the selected state lands on the same position,
/// the first one in `records` wins.
pub fn aggregate_cells(records: &[Record], region: &Region, metric: Metric) -> HeatGrid {
    let found = match region {
        Region::State(_) => first_match_by_cell(
            records.iter().filter(|r| region.contains(r.state())),
            region,
            metric,
        ),
        Region::UnitedStates if records.iter().any(|r| r.state() == UNITED_STATES) => {
            first_match_by_cell(
                records.iter().filter(|r| r.state() == UNITED_STATES),
                region,
                metric,
            )
        }
        Region::UnitedStates => mean_by_cell(records, metric),
    };

    let mut max_actual = 0.0_f64;
    let mut actuals = Vec::with_capacity(CELL_COUNT);
    for year in YEARS {
        for quarter in QUARTERS {
            let actual = found.get(&(year, quarter)).copied();
            if let Some(value) = actual {
                if value > max_actual {
                    max_actual = value;
                }
            }
            actuals.push((year, quarter, actual));
        }
    }

    let unit = metric.unit();
    let cells = actuals
        .into_iter()
        .map(|(year, quarter, actual_value)| HeatCell {
            year,
            quarter,
            actual_value,
            scaled_value: scale(actual_value, unit, max_actual),
        })
        .collect::<Vec<_>>();

    log::debug!(
        "[Bees] aggregate_cells({}, {}): {} present, max {}",
        region,
        metric,
        cells.iter().filter(|c| !c.is_absent()).count(),
        max_actual
    );
    HeatGrid {
        region: region.clone(),
        metric,
        unit,
        years: YEARS,
        quarters: QUARTERS,
        cells,
        max_actual,
    }
}

fn first_match_by_cell<'a>(
    records: impl Iterator<Item = &'a Record>,
    region: &Region,
    metric: Metric,
) -> HashMap<(i32, u8), f64> {
    let mut found = HashMap::new();
    let mut duplicates = 0usize;
    for record in records {
        let key = (record.year(), record.quarter());
        if found.contains_key(&key) {
            duplicates += 1;
            continue;
        }
        found.insert(key, record.value(metric));
    }
    if duplicates > 0 {
        log::warn!(
            "[Bees] aggregate_cells({}, {}): {} records shadowed by an earlier match",
            region,
            metric,
            duplicates
        );
    }
    found
}

/// Mean of the coerced value over every row sharing a position.
fn mean_by_cell(records: &[Record], metric: Metric) -> HashMap<(i32, u8), f64> {
    let mut totals: HashMap<(i32, u8), (f64, u32)> = HashMap::new();
    for record in records {
        let entry = totals
            .entry((record.year(), record.quarter()))
            .or_insert((0.0, 0));
        entry.0 += record.value(metric);
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(key, (total, count))| (key, total / f64::from(count)))
        .collect()
}

/// Percentages pass through. Counts become percent of `max_actual`, and are
/// absent when there is no positive maximum to divide by.
fn scale(actual: Option<f64>, unit: Unit, max_actual: f64) -> Option<f64> {
    let value = actual?;
    match unit {
        Unit::Percentage => Some(value),
        Unit::Count if max_actual > 0.0 => Some(value / max_actual * 100.0),
        Unit::Count => None,
    }
}
