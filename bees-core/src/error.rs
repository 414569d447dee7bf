use thiserror::Error;

/// Errors raised by the dashboard core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A metric id that is not in the registry.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// Two dataset rows share the same (state, year, quarter) key.
    #[error("duplicate record for {state} {year} Q{quarter}")]
    DuplicateRecord {
        state: String,
        year: i32,
        quarter: u8,
    },

    /// A dataset row that cannot be turned into a record.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
