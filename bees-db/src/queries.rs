//! Typed read queries over the row store.
//!
//! Rows always come back in load order (`rowid`), which is the order the
//! aggregators see them in. The heat map's "first match wins" rule depends on
//! that order being stable.

use crate::models::StateInfo;
use crate::schema::metric_column_list;
use crate::Database;
use bees_core::{Metric, Record, Region};
use rusqlite::{params, Row};

type RawRecord = (String, i32, u8, Vec<Option<f64>>);

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    let mut values = Vec::with_capacity(Metric::ALL.len());
    for i in 0..Metric::ALL.len() {
        values.push(row.get::<_, Option<f64>>(3 + i)?);
    }
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, values))
}

fn into_record((state, year, quarter, values): RawRecord) -> anyhow::Result<Record> {
    let record = Metric::ALL
        .iter()
        .zip(values)
        .fold(Record::new(&state, year, quarter)?, |record, (metric, value)| {
            record.with_raw_value(*metric, value)
        });
    Ok(record)
}

impl Database {
    /// Every loaded record, in load order.
    pub fn query_records(&self) -> anyhow::Result<Vec<Record>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT state, year, quarter, {} FROM records ORDER BY rowid",
            metric_column_list()
        ))?;
        let raw = stmt
            .query_map([], read_raw)?
            .collect::<Result<Vec<_>, _>>()?;
        let records = raw
            .into_iter()
            .map(into_record)
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!(
            "[Bees] query: query_records returned {} records",
            records.len()
        );
        Ok(records)
    }

    /// Records belonging to `region`, in load order.
    ///
    /// The whole-country region returns every record.
    pub fn query_region_records(&self, region: &Region) -> anyhow::Result<Vec<Record>> {
        let state = match region {
            Region::UnitedStates => return self.query_records(),
            Region::State(state) => state,
        };
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT state, year, quarter, {} FROM records WHERE state = ?1 ORDER BY rowid",
            metric_column_list()
        ))?;
        let raw = stmt
            .query_map(params![state], read_raw)?
            .collect::<Result<Vec<_>, _>>()?;
        let records = raw
            .into_iter()
            .map(into_record)
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!(
            "[Bees] query: query_region_records({}) returned {} records",
            region,
            records.len()
        );
        Ok(records)
    }

    /// Distinct states with their row counts and year span, sorted by name.
    pub fn query_states(&self) -> anyhow::Result<Vec<StateInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT state, COUNT(*), MIN(year), MAX(year)
             FROM records
             GROUP BY state
             ORDER BY state",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StateInfo {
                    name: row.get(0)?,
                    record_count: row.get(1)?,
                    first_year: row.get(2)?,
                    last_year: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn record_count(&self) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(usize::try_from(count)?)
    }
}
