//! Seam between the dashboard and whatever draws the map and the heat map.
//!
//! The controller never draws. It hands finished aggregation results to a
//! [`Renderer`]. [`JsonRenderer`] serializes those calls as one JSON object per
//! line, which is what the `session` subcommand writes to stdout.

use bees_core::region::RegionHandle;
use bees_core::{MetricDescriptor, Region};
use bees_data::{HeatGrid, StateAverage};
use serde::Serialize;
use std::io::{self, Write};

pub trait Renderer {
    /// Draw the per-state bubbles.
    fn render_state_averages(&mut self, averages: &StateAverage) -> io::Result<()>;

    /// Draw the year x quarter heat map.
    fn render_heat_grid(&mut self, grid: &HeatGrid) -> io::Result<()>;

    fn clear_state_averages(&mut self) -> io::Result<()>;

    fn clear_heat_grid(&mut self) -> io::Result<()>;

    /// Metric description panel. `None` resets it to the placeholder.
    fn set_description(&mut self, descriptor: Option<&MetricDescriptor>) -> io::Result<()>;

    /// Heat map caption. `None` resets it to the placeholder.
    fn set_region_caption(&mut self, region: Option<&Region>) -> io::Result<()>;
}

/// One line of [`JsonRenderer`] output.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent<'a> {
    StateAverages {
        #[serde(flatten)]
        averages: &'a StateAverage,
        national_total: f64,
        extent: Option<(f64, f64)>,
    },
    HeatGrid {
        #[serde(flatten)]
        grid: &'a HeatGrid,
    },
    ClearStateAverages,
    ClearHeatGrid,
    Description {
        descriptor: Option<&'a MetricDescriptor>,
    },
    RegionCaption {
        region: Option<&'a str>,
        /// Lets the map look up the region's centroid and label.
        handle: Option<RegionHandle>,
    },
}

/// Writes every render call as a JSON line.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &RenderEvent<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render_state_averages(&mut self, averages: &StateAverage) -> io::Result<()> {
        self.emit(&RenderEvent::StateAverages {
            averages,
            national_total: averages.national_total(),
            extent: averages.value_extent(),
        })
    }

    fn render_heat_grid(&mut self, grid: &HeatGrid) -> io::Result<()> {
        self.emit(&RenderEvent::HeatGrid { grid })
    }

    fn clear_state_averages(&mut self) -> io::Result<()> {
        self.emit(&RenderEvent::ClearStateAverages)
    }

    fn clear_heat_grid(&mut self) -> io::Result<()> {
        self.emit(&RenderEvent::ClearHeatGrid)
    }

    fn set_description(&mut self, descriptor: Option<&MetricDescriptor>) -> io::Result<()> {
        self.emit(&RenderEvent::Description { descriptor })
    }

    fn set_region_caption(&mut self, region: Option<&Region>) -> io::Result<()> {
        self.emit(&RenderEvent::RegionCaption {
            region: region.map(Region::name),
            handle: region.and_then(Region::handle),
        })
    }
}
