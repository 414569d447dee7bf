//! One-shot queries: registry, regions, states, per-state averages, heat map.
//!
//! Each writes JSON lines. The `write_*` functions take any writer so they can
//! be checked without touching stdout.

use bees_core::{Metric, Region};
use bees_dashboard::{JsonRenderer, Renderer};
use bees_data::{aggregate_by_state, aggregate_cells};
use bees_db::Database;
use log::info;
use std::io::{self, Write};

pub fn run_metrics() -> anyhow::Result<()> {
    write_metrics(&mut io::stdout().lock())
}

pub fn run_regions() -> anyhow::Result<()> {
    write_regions(&mut io::stdout().lock())
}

pub fn run_states(db: &Database) -> anyhow::Result<()> {
    write_states(db, &mut io::stdout().lock())
}

pub fn run_averages(db: &Database, metric_id: &str) -> anyhow::Result<()> {
    write_averages(db, metric_id, io::stdout().lock())
}

pub fn run_heatmap(db: &Database, metric_id: &str, region: &str) -> anyhow::Result<()> {
    write_heatmap(db, metric_id, region, io::stdout().lock())
}

pub fn write_metrics(out: &mut impl Write) -> anyhow::Result<()> {
    for metric in Metric::ALL {
        serde_json::to_writer(&mut *out, metric.descriptor())?;
        writeln!(out)?;
    }
    Ok(())
}

/// The whole country followed by the 50 states, each with its map handle.
pub fn write_regions(out: &mut impl Write) -> anyhow::Result<()> {
    for region in Region::all() {
        let line = serde_json::json!({
            "name": region.name(),
            "handle": region.handle(),
        });
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_states(db: &Database, out: &mut impl Write) -> anyhow::Result<()> {
    let states = db.query_states()?;
    info!("[Bees] {} states in dataset", states.len());
    for state in &states {
        serde_json::to_writer(&mut *out, state)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_averages(db: &Database, metric_id: &str, out: impl Write) -> anyhow::Result<()> {
    let metric: Metric = metric_id.parse()?;
    let records = db.query_records()?;
    let averages = aggregate_by_state(&records, metric);
    info!(
        "[Bees] {} averaged over {} states, national total {}",
        metric,
        averages.len(),
        averages.national_total()
    );
    JsonRenderer::new(out).render_state_averages(&averages)?;
    Ok(())
}

pub fn write_heatmap(db: &Database, metric_id: &str, region: &str, out: impl Write) -> anyhow::Result<()> {
    let metric: Metric = metric_id.parse()?;
    let region = Region::from_name(region);
    let records = db.query_region_records(&region)?;
    let grid = aggregate_cells(&records, &region, metric);
    info!(
        "[Bees] heat map of {} for {}: {} of {} cells present",
        metric,
        region,
        grid.present_cells().count(),
        grid.cells.len()
    );
    JsonRenderer::new(out).render_heat_grid(&grid)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse_lines(bytes: &[u8]) -> Vec<Value> {
        std::str::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn metrics_lists_whole_registry() {
        let mut out = Vec::new();
        write_metrics(&mut out).unwrap();
        let lines = parse_lines(&out);
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0]["id"], "num_colonies");
        assert_eq!(lines[0]["unit"], "count");
        assert_eq!(lines[10]["id"], "pesticides");
        assert_eq!(lines[10]["unit"], "percentage");
    }

    #[test]
    fn regions_list_country_then_states() {
        let mut out = Vec::new();
        write_regions(&mut out).unwrap();
        let lines = parse_lines(&out);
        assert_eq!(lines.len(), 51);
        assert_eq!(lines[0]["name"], "United States");
        assert_eq!(lines[0]["handle"], 0);
        assert_eq!(lines[1]["name"], "Alabama");
        assert_eq!(lines[1]["handle"], 1);
        assert_eq!(lines[50]["handle"], 50);
    }

    #[test]
    fn states_from_sample() {
        let db = Database::with_sample().unwrap();
        let mut out = Vec::new();
        write_states(&db, &mut out).unwrap();
        let lines = parse_lines(&out);
        let names: Vec<&str> = lines.iter().map(|l| l["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Alabama", "California", "Texas", "Vermont"]);
        assert_eq!(lines[3]["record_count"], 3);
    }

    #[test]
    fn averages_from_sample() {
        let db = Database::with_sample().unwrap();
        let mut out = Vec::new();
        write_averages(&db, "num_colonies", &mut out).unwrap();
        let lines = parse_lines(&out);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "state_averages");
        assert_eq!(lines[0]["averages"].as_object().unwrap().len(), 4);
        assert!(lines[0]["national_total"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn heatmap_for_partial_state() {
        let db = Database::with_sample().unwrap();
        let mut out = Vec::new();
        write_heatmap(&db, "diseases", "Vermont", &mut out).unwrap();
        let lines = parse_lines(&out);
        let cells = lines[0]["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 32);
        let present = cells.iter().filter(|c| !c["actual_value"].is_null()).count();
        assert_eq!(present, 3);
        // Vermont's diseases field is empty in the sample: present, coerced to zero
        assert_eq!(cells[0]["actual_value"], 0.0);
        assert!(cells[1]["actual_value"].is_null());
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let db = Database::with_sample().unwrap();
        let err = write_averages(&db, "honey", Vec::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<bees_core::Error>(),
            Some(&bees_core::Error::UnknownMetric("honey".to_string()))
        );
    }
}
