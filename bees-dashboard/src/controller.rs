//! The dashboard controller.
//!
//! Owns the loaded records, the current [`SelectionState`] and a [`Renderer`].
//! Every UI event goes through one of the `on_*` entry points, which apply a
//! transition and then run only the aggregations its [`Refresh`] plan asks for.
//!
//! Aggregation results are tagged with a [`Ticket`]. A result computed for a
//! selection that has since changed is stale and is dropped on delivery, so a
//! slow computation can never overwrite a newer view.

use crate::config::DashboardConfig;
use crate::render::Renderer;
use crate::selection::{Refresh, SelectionState, Transition};
use crate::DashboardError;
use bees_core::Record;
use bees_data::{aggregate_by_state, aggregate_cells, ensure_unique, HeatGrid, StateAverage};
use log::{debug, info, warn};

/// Snapshot of the selection an aggregation was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    selection: SelectionState,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// State averages for the ticket's metric, `None` without one.
    pub fn state_averages(&self, records: &[Record]) -> Option<StateAverage> {
        let metric = self.selection.metric()?;
        Some(aggregate_by_state(records, metric))
    }

    /// Heat grid for the ticket's metric and region, `None` unless both are set.
    pub fn heat_grid(&self, records: &[Record]) -> Option<HeatGrid> {
        let metric = self.selection.metric()?;
        let region = self.selection.region()?;
        Some(aggregate_cells(records, region, metric))
    }
}

pub struct DashboardController<R: Renderer> {
    records: Vec<Record>,
    selection: SelectionState,
    config: DashboardConfig,
    renderer: R,
    generation: u64,
}

impl<R: Renderer> DashboardController<R> {
    /// Fails with `DuplicateRecord` if two records share a (state, year, quarter).
    pub fn new(records: Vec<Record>, config: DashboardConfig, renderer: R) -> Result<Self, DashboardError> {
        ensure_unique(&records)?;
        info!(
            "[Bees] controller: {} records, default region {:?}",
            records.len(),
            config.default_region
        );
        Ok(Self {
            records,
            selection: SelectionState::NoSelection,
            config,
            renderer,
            generation: 0,
        })
    }

    /// Reset both panels to their placeholders, then apply the configured
    /// initial metric, if any.
    pub fn start(&mut self) -> Result<(), DashboardError> {
        self.renderer.set_description(None)?;
        self.renderer.set_region_caption(None)?;
        if let Some(metric_id) = self.config.initial_metric.clone() {
            self.on_metric_change(&metric_id)?;
        }
        Ok(())
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Metric selector changed. Unknown ids leave everything untouched.
    pub fn on_metric_change(&mut self, metric_id: &str) -> Result<Refresh, DashboardError> {
        let transition = self
            .selection
            .select_metric(metric_id, &self.config.default_region)?;
        self.apply(transition)
    }

    /// A map region was clicked.
    pub fn on_region_click(&mut self, name: &str) -> Result<Refresh, DashboardError> {
        let transition = self.selection.select_region(name);
        self.apply(transition)
    }

    /// Viewport size settled. Redraws the heat map with the same selection.
    pub fn on_resize(&mut self) -> Result<Refresh, DashboardError> {
        let transition = self.selection.resize();
        self.apply(transition)
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
            selection: self.selection.clone(),
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation && ticket.selection == self.selection
    }

    /// Render `averages` if `ticket` is still current. Returns whether it was drawn.
    pub fn deliver_state_averages(&mut self, ticket: &Ticket, averages: StateAverage) -> Result<bool, DashboardError> {
        if !self.is_current(ticket) {
            warn!(
                "[Bees] dropping stale state averages for {} (generation {}, now {})",
                averages.metric, ticket.generation, self.generation
            );
            return Ok(false);
        }
        self.renderer.render_state_averages(&averages)?;
        Ok(true)
    }

    /// Render `grid` if `ticket` is still current. Returns whether it was drawn.
    pub fn deliver_heat_grid(&mut self, ticket: &Ticket, grid: HeatGrid) -> Result<bool, DashboardError> {
        if !self.is_current(ticket) {
            warn!(
                "[Bees] dropping stale heat grid for {} in {} (generation {}, now {})",
                grid.metric, grid.region, ticket.generation, self.generation
            );
            return Ok(false);
        }
        self.renderer.render_heat_grid(&grid)?;
        Ok(true)
    }

    fn apply(&mut self, transition: Transition) -> Result<Refresh, DashboardError> {
        let Transition { next, refresh } = transition;
        let metric_changed = next.metric() != self.selection.metric();
        let region_changed = next.region() != self.selection.region();
        if next != self.selection {
            self.generation += 1;
            debug!(
                "[Bees] selection {:?} -> {:?} (generation {})",
                self.selection, next, self.generation
            );
            self.selection = next;
        }
        debug!("[Bees] refresh plan {:?}", refresh);

        if metric_changed {
            let descriptor = self.selection.metric().map(|m| m.descriptor());
            self.renderer.set_description(descriptor)?;
        }
        if region_changed {
            self.renderer.set_region_caption(self.selection.region())?;
        }
        if refresh.clear {
            self.renderer.clear_state_averages()?;
            self.renderer.clear_heat_grid()?;
        }
        if refresh.state_averages {
            let ticket = self.ticket();
            if let Some(averages) = ticket.state_averages(&self.records) {
                self.deliver_state_averages(&ticket, averages)?;
            }
        }
        if refresh.heat_grid {
            let ticket = self.ticket();
            if let Some(grid) = ticket.heat_grid(&self.records) {
                self.deliver_heat_grid(&ticket, grid)?;
            }
        }
        Ok(refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultRegion;
    use bees_core::metric::NO_METRIC_ID;
    use bees_core::{Error, Metric, MetricDescriptor, Region};
    use std::io;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        States(Metric, Option<f64>),
        Grid(Metric, String, usize),
        ClearStates,
        ClearGrid,
        Description(Option<&'static str>),
        Caption(Option<String>),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer for Recorder {
        fn render_state_averages(&mut self, averages: &StateAverage) -> io::Result<()> {
            self.calls
                .push(Call::States(averages.metric, averages.get("Texas")));
            Ok(())
        }

        fn render_heat_grid(&mut self, grid: &HeatGrid) -> io::Result<()> {
            self.calls.push(Call::Grid(
                grid.metric,
                grid.region.name().to_string(),
                grid.present_cells().count(),
            ));
            Ok(())
        }

        fn clear_state_averages(&mut self) -> io::Result<()> {
            self.calls.push(Call::ClearStates);
            Ok(())
        }

        fn clear_heat_grid(&mut self) -> io::Result<()> {
            self.calls.push(Call::ClearGrid);
            Ok(())
        }

        fn set_description(&mut self, descriptor: Option<&MetricDescriptor>) -> io::Result<()> {
            self.calls.push(Call::Description(descriptor.map(|d| d.id)));
            Ok(())
        }

        fn set_region_caption(&mut self, region: Option<&Region>) -> io::Result<()> {
            self.calls
                .push(Call::Caption(region.map(|r| r.name().to_string())));
            Ok(())
        }
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new("Texas", 2015, 1)
                .unwrap()
                .with_value(Metric::NumColonies, 100.0),
            Record::new("Texas", 2015, 2)
                .unwrap()
                .with_value(Metric::NumColonies, 300.0),
            Record::new("Utah", 2015, 1)
                .unwrap()
                .with_value(Metric::NumColonies, 40.0),
        ]
    }

    fn controller(config: DashboardConfig) -> DashboardController<Recorder> {
        DashboardController::new(records(), config, Recorder::default()).unwrap()
    }

    fn count(calls: &[Call], pred: impl Fn(&Call) -> bool) -> usize {
        calls.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn texas_scenario() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("num_colonies").unwrap();
        dash.on_region_click("Texas").unwrap();
        assert_eq!(
            dash.selection(),
            &SelectionState::MetricAndRegionSelected(
                Metric::NumColonies,
                Region::from_name("Texas")
            )
        );
        let calls = &dash.renderer().calls;
        assert_eq!(
            calls,
            &vec![
                Call::Description(Some("num_colonies")),
                Call::States(Metric::NumColonies, Some(200.0)),
                Call::Caption(Some("Texas".to_string())),
                Call::Grid(Metric::NumColonies, "Texas".to_string(), 2),
            ]
        );
    }

    #[test]
    fn region_click_before_metric_does_nothing() {
        let mut dash = controller(DashboardConfig::default());
        let refresh = dash.on_region_click("Texas").unwrap();
        assert!(refresh.is_empty());
        assert_eq!(dash.selection(), &SelectionState::NoSelection);
        assert!(dash.renderer().calls.is_empty());
    }

    #[test]
    fn sentinel_clears_both_views_and_region() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("num_colonies").unwrap();
        dash.on_region_click("Texas").unwrap();
        let before = dash.renderer().calls.len();
        dash.on_metric_change(NO_METRIC_ID).unwrap();
        assert_eq!(dash.selection(), &SelectionState::NoSelection);
        assert_eq!(
            &dash.renderer().calls[before..],
            &[
                Call::Description(None),
                Call::Caption(None),
                Call::ClearStates,
                Call::ClearGrid,
            ]
        );

        // region is gone: picking a metric again does not bring the heat map back
        dash.on_metric_change("num_colonies").unwrap();
        assert_eq!(dash.selection().region(), None);
    }

    #[test]
    fn metric_change_runs_each_aggregator_once_states_first() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("num_colonies").unwrap();
        dash.on_region_click("Texas").unwrap();
        let before = dash.renderer().calls.len();
        dash.on_metric_change("percent_lost").unwrap();
        let calls = &dash.renderer().calls[before..];
        assert_eq!(count(calls, |c| matches!(c, Call::States(..))), 1);
        assert_eq!(count(calls, |c| matches!(c, Call::Grid(..))), 1);
        let states_at = calls
            .iter()
            .position(|c| matches!(c, Call::States(..)))
            .unwrap();
        let grid_at = calls
            .iter()
            .position(|c| matches!(c, Call::Grid(..)))
            .unwrap();
        assert!(states_at < grid_at);
        // region kept across metric changes, so no caption update
        assert_eq!(count(calls, |c| matches!(c, Call::Caption(..))), 0);
    }

    #[test]
    fn region_change_does_not_rerun_state_averages() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("num_colonies").unwrap();
        dash.on_region_click("Texas").unwrap();
        let before = dash.renderer().calls.len();
        dash.on_region_click("Utah").unwrap();
        let calls = &dash.renderer().calls[before..];
        assert_eq!(count(calls, |c| matches!(c, Call::States(..))), 0);
        assert_eq!(
            calls.last(),
            Some(&Call::Grid(Metric::NumColonies, "Utah".to_string(), 1))
        );
    }

    #[test]
    fn default_region_policy_fills_heat_map() {
        let config = DashboardConfig {
            default_region: DefaultRegion::UnitedStates,
            ..DashboardConfig::default()
        };
        let mut dash = controller(config);
        let refresh = dash.on_metric_change("num_colonies").unwrap();
        assert!(refresh.state_averages && refresh.heat_grid);
        assert_eq!(
            dash.renderer().calls.last(),
            Some(&Call::Grid(
                Metric::NumColonies,
                "United States".to_string(),
                2
            ))
        );
    }

    #[test]
    fn unknown_metric_leaves_state_untouched() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("diseases").unwrap();
        let before = dash.renderer().calls.len();
        let err = dash.on_metric_change("honey").unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Core(Error::UnknownMetric(ref id)) if id == "honey"
        ));
        assert_eq!(dash.selection(), &SelectionState::MetricSelected(Metric::Diseases));
        assert_eq!(dash.renderer().calls.len(), before);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("num_colonies").unwrap();
        dash.on_region_click("Texas").unwrap();

        let old = dash.ticket();
        let old_grid = old.heat_grid(dash.records()).unwrap();
        dash.on_region_click("Utah").unwrap();
        assert!(!dash.is_current(&old));

        let before = dash.renderer().calls.len();
        assert!(!dash.deliver_heat_grid(&old, old_grid).unwrap());
        assert_eq!(dash.renderer().calls.len(), before);

        let current = dash.ticket();
        let grid = current.heat_grid(dash.records()).unwrap();
        assert!(dash.deliver_heat_grid(&current, grid).unwrap());
        assert_eq!(
            dash.renderer().calls.last(),
            Some(&Call::Grid(Metric::NumColonies, "Utah".to_string(), 1))
        );
    }

    #[test]
    fn ticket_for_same_selection_after_round_trip_is_still_stale() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("num_colonies").unwrap();
        let old = dash.ticket();
        dash.on_metric_change("diseases").unwrap();
        dash.on_metric_change("num_colonies").unwrap();
        assert_eq!(old.selection(), dash.selection());
        assert!(!dash.is_current(&old));
    }

    #[test]
    fn resize_redraws_heat_map_only() {
        let mut dash = controller(DashboardConfig::default());
        dash.on_metric_change("num_colonies").unwrap();
        assert!(dash.on_resize().unwrap().is_empty());
        dash.on_region_click("Texas").unwrap();
        let generation = dash.ticket().generation();
        let before = dash.renderer().calls.len();
        dash.on_resize().unwrap();
        assert_eq!(
            &dash.renderer().calls[before..],
            &[Call::Grid(Metric::NumColonies, "Texas".to_string(), 2)]
        );
        assert_eq!(dash.ticket().generation(), generation);
    }

    #[test]
    fn start_applies_initial_metric() {
        let config = DashboardConfig {
            initial_metric: Some("num_colonies".to_string()),
            ..DashboardConfig::default()
        };
        let mut dash = controller(config);
        dash.start().unwrap();
        assert_eq!(
            dash.selection(),
            &SelectionState::MetricSelected(Metric::NumColonies)
        );
        assert_eq!(
            dash.into_renderer().calls,
            vec![
                Call::Description(None),
                Call::Caption(None),
                Call::Description(Some("num_colonies")),
                Call::States(Metric::NumColonies, Some(200.0)),
            ]
        );
    }

    #[test]
    fn duplicate_records_are_rejected() {
        let mut rows = records();
        rows.push(Record::new("Utah", 2015, 1).unwrap());
        let result = DashboardController::new(rows, DashboardConfig::default(), Recorder::default());
        assert!(matches!(
            result,
            Err(DashboardError::Core(Error::DuplicateRecord { quarter: 1, year: 2015, .. }))
        ));
    }
}
