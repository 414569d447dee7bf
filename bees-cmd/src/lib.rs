//! Command implementations for the bees CLI.
//!
//! One-shot queries over the colony dataset, plus an interactive session that
//! drives the dashboard controller from UI events on stdin.

use bees_dashboard::{DashboardConfig, DefaultRegion};
use bees_db::Database;
use clap::Subcommand;
use log::info;

pub mod query;
pub mod session;

#[derive(Subcommand)]
pub enum Command {
    /// List the metric registry (id, label, description, unit)
    Metrics,

    /// List the selectable regions with their map handles
    Regions,

    /// List the states present in the dataset
    States {
        /// Dataset CSV (defaults to the bundled sample)
        #[arg(short = 'd', long)]
        data: Option<String>,
    },

    /// Average a metric per state, with the national total
    Averages {
        /// Metric id, e.g. num_colonies
        #[arg(short = 'm', long)]
        metric: String,

        /// Dataset CSV (defaults to the bundled sample)
        #[arg(short = 'd', long)]
        data: Option<String>,
    },

    /// Build the year x quarter heat map of a metric for one region
    Heatmap {
        /// Metric id, e.g. percent_lost
        #[arg(short = 'm', long)]
        metric: String,

        /// State name, or "United States" for the whole country
        #[arg(short = 'r', long, default_value = bees_core::region::UNITED_STATES)]
        region: String,

        /// Dataset CSV (defaults to the bundled sample)
        #[arg(short = 'd', long)]
        data: Option<String>,
    },

    /// Read UI events from stdin and write the render stream to stdout
    ///
    /// Events, one per line: `metric <id>`, `region <name>`, `resize`.
    Session {
        /// Dataset CSV (defaults to the bundled sample)
        #[arg(short = 'd', long)]
        data: Option<String>,

        /// JSON file with dashboard defaults
        #[arg(short = 'c', long)]
        config: Option<String>,

        /// Region used when a metric is picked before any region: none, us, or a state
        #[arg(long)]
        default_region: Option<DefaultRegion>,

        /// Resize quiescence window in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Metric selected at startup
        #[arg(long)]
        initial_metric: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Metrics => query::run_metrics(),
        Command::Regions => query::run_regions(),
        Command::States { data } => {
            let db = open_database(data.as_deref()).await?;
            query::run_states(&db)
        }
        Command::Averages { metric, data } => {
            let db = open_database(data.as_deref()).await?;
            query::run_averages(&db, &metric)
        }
        Command::Heatmap {
            metric,
            region,
            data,
        } => {
            let db = open_database(data.as_deref()).await?;
            query::run_heatmap(&db, &metric, &region)
        }
        Command::Session {
            data,
            config,
            default_region,
            debounce_ms,
            initial_metric,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path).await?,
                None => DashboardConfig::default(),
            };
            if let Some(default_region) = default_region {
                config.default_region = default_region;
            }
            if let Some(debounce_ms) = debounce_ms {
                config.resize_debounce_ms = debounce_ms;
            }
            if initial_metric.is_some() {
                config.initial_metric = initial_metric;
            }
            let db = open_database(data.as_deref()).await?;
            session::run_session(&db, config).await
        }
    }
}

/// Load the dataset from `path`, or the bundled sample when none is given.
pub async fn open_database(path: Option<&str>) -> anyhow::Result<Database> {
    let db = match path {
        Some(path) => bees_db::load_dataset(path).await?,
        None => {
            info!("[Bees] no --data given, using the bundled sample");
            Database::with_sample()?
        }
    };
    info!("[Bees] dataset ready: {} records", db.record_count()?);
    Ok(db)
}

async fn load_config(path: &str) -> anyhow::Result<DashboardConfig> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path, e))?;
    let config = DashboardConfig::from_json(&json)?;
    info!("[Bees] loaded config from {}: {:?}", path, config);
    Ok(config)
}
