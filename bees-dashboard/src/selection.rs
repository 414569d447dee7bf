//! Selection state machine linking the map and the heat map.
//!
//! States:
//!
//! ```text
//! NoSelection ──select_metric(m)──▶ MetricSelected(m) ──select_region(r)──▶ MetricAndRegionSelected(m, r)
//!      ▲                                   │                                          │
//!      └──────── select_metric(sentinel) ──┴──────────────────────────────────────────┘
//! ```
//!
//! Transitions are pure: they take the current state and return the next one
//! together with the [`Refresh`] plan the controller must carry out.

use crate::config::DefaultRegion;
use bees_core::{Error, Metric, MetricSelection, Region};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    NoSelection,
    MetricSelected(Metric),
    MetricAndRegionSelected(Metric, Region),
}

/// Work a transition requires, in execution order: clear, then state
/// averages, then the heat grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    /// Both views lose their data (metric deselected).
    pub clear: bool,
    /// Re-run the state aggregator.
    pub state_averages: bool,
    /// Re-run the cell aggregator.
    pub heat_grid: bool,
}

impl Refresh {
    pub const NONE: Refresh = Refresh {
        clear: false,
        state_averages: false,
        heat_grid: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Refresh::NONE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SelectionState,
    pub refresh: Refresh,
}

impl SelectionState {
    pub fn metric(&self) -> Option<Metric> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::MetricSelected(metric)
            | SelectionState::MetricAndRegionSelected(metric, _) => Some(*metric),
        }
    }

    pub fn region(&self) -> Option<&Region> {
        match self {
            SelectionState::MetricAndRegionSelected(_, region) => Some(region),
            _ => None,
        }
    }

    fn with(metric: Metric, region: Option<Region>) -> Self {
        match region {
            Some(region) => SelectionState::MetricAndRegionSelected(metric, region),
            None => SelectionState::MetricSelected(metric),
        }
    }

    /// Apply a metric selector change.
    ///
    /// The sentinel id clears everything. A real metric keeps the current
    /// region, or takes `default_region` if none was set. Unknown ids fail and
    /// leave the state as it was.
    pub fn select_metric(&self, id: &str, default_region: &DefaultRegion) -> Result<Transition, Error> {
        let metric = match MetricSelection::parse(id)? {
            MetricSelection::NoneSelected => {
                let was_selected = *self != SelectionState::NoSelection;
                return Ok(Transition {
                    next: SelectionState::NoSelection,
                    refresh: Refresh {
                        clear: was_selected,
                        ..Refresh::NONE
                    },
                });
            }
            MetricSelection::Selected(metric) => metric,
        };

        let previous_region = self.region().cloned();
        let region = previous_region.clone().or_else(|| default_region.region());
        let metric_changed = self.metric() != Some(metric);
        let region_changed = region != previous_region;
        Ok(Transition {
            next: SelectionState::with(metric, region.clone()),
            refresh: Refresh {
                clear: false,
                state_averages: metric_changed,
                heat_grid: region.is_some() && (metric_changed || region_changed),
            },
        })
    }

    /// Apply a region click. Without a selected metric this is a no-op.
    pub fn select_region(&self, name: &str) -> Transition {
        let Some(metric) = self.metric() else {
            return self.unchanged();
        };
        let region = Region::from_name(name);
        let region_changed = self.region() != Some(&region);
        Transition {
            next: SelectionState::MetricAndRegionSelected(metric, region),
            refresh: Refresh {
                heat_grid: region_changed,
                ..Refresh::NONE
            },
        }
    }

    /// Viewport resize: same selection, heat map redrawn if it has data.
    pub fn resize(&self) -> Transition {
        Transition {
            next: self.clone(),
            refresh: Refresh {
                heat_grid: self.region().is_some(),
                ..Refresh::NONE
            },
        }
    }

    fn unchanged(&self) -> Transition {
        Transition {
            next: self.clone(),
            refresh: Refresh::NONE,
        }
    }
}
