//! CSV loading into the in-memory row store.
//!
//! Expected format (with headers), columns located by name:
//!
//! ```text
//! state,year,quarter,num_colonies,max_colonies,lost_colonies,percent_lost,added_colonies,renovated_colonies,percent_renovated,varroa_mites,other_pests_and_parasites,diseases,pesticides
//! Alabama,2015,1,7000,7000,1800,26,2800,250,4,10,5.4,,2.2
//! ```

use crate::schema::metric_column_list;
use crate::Database;
use bees_core::record::RecordColumns;
use bees_core::{Error, Metric, Record};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, ErrorCode};

impl Database {
    /// Load dataset rows from a CSV string.
    ///
    /// Rows with an empty state or an unusable year / quarter are skipped and
    /// logged. A second row for an already loaded (state, year, quarter) fails
    /// the whole load with [`Error::DuplicateRecord`]; nothing from that call
    /// is kept. Returns the number of rows inserted.
    pub fn load_records(&self, csv_data: &str) -> anyhow::Result<usize> {
        let mut conn = self.conn.borrow_mut();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());
        let columns = RecordColumns::from_headers(rdr.headers()?)?;
        log::debug!(
            "[Bees] loader: {} of {} metric columns present",
            columns.present_metrics().count(),
            Metric::ALL.len()
        );

        let placeholders = (1..=3 + Metric::ALL.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO records (state, year, quarter, {}) VALUES ({})",
            metric_column_list(),
            placeholders
        );

        let tx = conn.transaction()?;
        let mut count = 0usize;
        let mut skipped = 0usize;
        {
            let mut stmt = tx.prepare(&sql)?;
            for result in rdr.records() {
                let row = result?;
                let record = match columns.parse_row(&row) {
                    Ok(record) => record,
                    Err(e) => {
                        log::warn!("[Bees] loader: skipping row {:?}: {}", row.position(), e);
                        skipped += 1;
                        continue;
                    }
                };
                match stmt.execute(params_from_iter(row_values(&record))) {
                    Ok(_) => count += 1,
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.code == ErrorCode::ConstraintViolation =>
                    {
                        return Err(Error::DuplicateRecord {
                            state: record.state().to_string(),
                            year: record.year(),
                            quarter: record.quarter(),
                        }
                        .into());
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        tx.commit()?;
        log::info!(
            "[Bees] loader: Loaded {} records, skipped {} invalid",
            count,
            skipped
        );
        Ok(count)
    }
}

fn row_values(record: &Record) -> Vec<Value> {
    let mut values = vec![
        Value::Text(record.state().to_string()),
        Value::Integer(i64::from(record.year())),
        Value::Integer(i64::from(record.quarter())),
    ];
    values.extend(
        Metric::ALL
            .iter()
            .map(|metric| record.raw_value(*metric).map_or(Value::Null, Value::Real)),
    );
    values
}
