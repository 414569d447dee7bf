//! Core types for the honeybee colony dashboard.
//!
//! This crate provides:
//! - `metric`: the static metric registry (labels, descriptions, units)
//! - `region`: the selectable regions (the 50 states plus the whole country)
//! - `record`: one immutable dataset row and the shared value coercion
//! - `error`: typed errors surfaced to callers

pub mod error;
pub mod metric;
pub mod record;
pub mod region;

pub use error::Error;
pub use metric::{Metric, MetricDescriptor, MetricSelection, Unit};
pub use record::{coerce, Record};
pub use region::Region;

/// Years covered by the bundled dataset, in display order.
pub const YEARS: [i32; 8] = [2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022];

/// Quarters of a year, in display order.
pub const QUARTERS: [u8; 4] = [1, 2, 3, 4];
