//! In-memory SQLite row store for the honeybee colony dataset.
//!
//! The dataset is a flat CSV with one row per (state, year, quarter). It is
//! loaded once into an in-memory SQLite database and read back as
//! [`bees_core::Record`] values for the aggregators. Nothing mutates a row
//! after it is loaded.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper, single-threaded like the dashboard
//! - CSV parsing delegated to [`bees_core::record::RecordColumns`], so column
//!   order in the file does not matter
//! - `UNIQUE (state, year, quarter)` makes a duplicated row a load error
//!   ([`bees_core::Error::DuplicateRecord`]) instead of a silent pick
//!
//! # Usage
//!
//! ```rust
//! use bees_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_records("state,year,quarter,num_colonies\nTexas,2015,1,100\n").unwrap();
//! let records = db.query_records().unwrap();
//! assert_eq!(records.len(), 1);
//! ```

mod loader;
pub mod models;
mod queries;
pub mod schema;

use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Small sample of the bundled dataset, in the same column layout.
pub static SAMPLE_CSV: &str = include_str!("../../fixtures/save_the_bees_sample.csv");

/// In-memory SQLite database holding the colony dataset.
///
/// Cheaply cloneable (via `Rc`); clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create an empty in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database preloaded with [`SAMPLE_CSV`].
    pub fn with_sample() -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_records(SAMPLE_CSV)?;
        Ok(db)
    }
}

/// Read a dataset CSV from disk and load it into a fresh database.
///
/// This is the only suspending step of the dashboard. Everything that
/// aggregates the data runs after it resolves.
pub async fn load_dataset(path: impl AsRef<Path>) -> anyhow::Result<Database> {
    let path = path.as_ref();
    log::info!("[Bees] loading dataset from {}", path.display());
    let csv_data = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    let db = Database::new()?;
    db.load_records(&csv_data)?;
    Ok(db)
}
