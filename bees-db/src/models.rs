//! Query result model structs.
//!
//! Serializable so the selector surface can be fed as JSON.

use serde::Serialize;

/// One state present in the dataset, for selection lists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StateInfo {
    /// State name as it appears in the dataset.
    pub name: String,
    /// Number of (year, quarter) rows loaded for the state.
    pub record_count: i64,
    pub first_year: i32,
    pub last_year: i32,
}
