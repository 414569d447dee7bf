//! Linked-selection state and render plumbing for the colony dashboard.
//!
//! This crate provides:
//! - `selection`: the selection state machine and its refresh plans
//! - `controller`: the single owner of the selection, driving aggregation
//! - `render`: the seam to the map / heat-map renderers, plus a JSON renderer
//! - `debounce`: quiescence-window coalescing for resize events
//! - `config`: dashboard defaults

pub mod config;
pub mod controller;
pub mod debounce;
pub mod render;
pub mod selection;

pub use config::{DashboardConfig, DefaultRegion};
pub use controller::{DashboardController, Ticket};
pub use debounce::ResizeDebouncer;
pub use render::{JsonRenderer, Renderer};
pub use selection::{Refresh, SelectionState, Transition};

use thiserror::Error;

/// Errors surfaced by the dashboard entry points.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Core(#[from] bees_core::Error),

    #[error("render failed: {0}")]
    Render(#[from] std::io::Error),
}
