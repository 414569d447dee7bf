//! SQL schema for the in-memory row store.
//!
//! One `records` table keyed by (state, year, quarter), with one nullable
//! REAL column per metric. NULL means the source field was empty or
//! non-numeric; coercion to zero happens at aggregation time, not here.

use bees_core::Metric;

/// Returns the full SQL schema as a single batch string.
///
/// Metric columns are named after [`Metric::as_str`], in registry order.
pub fn create_schema() -> String {
    let metric_columns = Metric::ALL
        .iter()
        .map(|metric| format!("        {} REAL,\n", metric.as_str()))
        .collect::<String>();
    format!(
        r#"
    CREATE TABLE IF NOT EXISTS records (
        state TEXT NOT NULL,
        year INTEGER NOT NULL,
        quarter INTEGER NOT NULL CHECK (quarter BETWEEN 1 AND 4),
{metric_columns}        UNIQUE (state, year, quarter)
    );
    CREATE INDEX IF NOT EXISTS idx_records_state ON records(state);
    "#
    )
}

/// Comma-separated metric column list, in registry order.
pub(crate) fn metric_column_list() -> String {
    Metric::ALL
        .iter()
        .map(|metric| metric.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
