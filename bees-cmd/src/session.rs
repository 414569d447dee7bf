//! Interactive session: UI events in on stdin, render stream out on stdout.
//!
//! Resize events are coalesced with a [`ResizeDebouncer`] driven by tokio
//! timers, so a burst of resizes produces one heat map redraw.

use bees_dashboard::{
    DashboardConfig, DashboardController, DashboardError, JsonRenderer, Renderer, ResizeDebouncer,
};
use bees_core::Record;
use bees_db::Database;
use log::{debug, info, warn};
use std::io::{self, Write};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Metric(String),
    Region(String),
    Resize,
}

impl FromStr for SessionEvent {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        match (verb, rest) {
            ("metric", id) if !id.is_empty() => Ok(SessionEvent::Metric(id.to_string())),
            ("region", name) if !name.is_empty() => Ok(SessionEvent::Region(name.to_string())),
            ("resize", "") => Ok(SessionEvent::Resize),
            _ => Err(anyhow::anyhow!("unrecognized event: {:?}", line)),
        }
    }
}

pub async fn run_session(db: &Database, config: DashboardConfig) -> anyhow::Result<()> {
    let records = db.query_records()?;
    let stdin = BufReader::new(tokio::io::stdin());
    drive_session(records, config, stdin, io::stdout().lock()).await?;
    Ok(())
}

/// Run the event loop until `input` closes. Returns the render stream writer.
pub async fn drive_session<I, W>(
    records: Vec<Record>,
    config: DashboardConfig,
    input: I,
    out: W,
) -> anyhow::Result<W>
where
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let renderer = JsonRenderer::new(out);
    let mut debouncer = ResizeDebouncer::new(config.resize_debounce());
    let mut dashboard = DashboardController::new(records, config, renderer)?;
    dashboard.start()?;
    info!(
        "[Bees] session started, resize window {:?}",
        debouncer.window()
    );

    let mut lines = input.lines();
    loop {
        let pending = debouncer.is_pending();
        let wake = debouncer
            .deadline()
            .map(Instant::from_std)
            .unwrap_or_else(Instant::now);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<SessionEvent>() {
                    Ok(event) => handle_event(&mut dashboard, &mut debouncer, event)?,
                    Err(e) => warn!("[Bees] {}", e),
                }
            }
            _ = sleep_until(wake), if pending => {
                if debouncer.poll(Instant::now().into_std()) {
                    dashboard.on_resize()?;
                }
            }
        }
    }

    // Input closed with a resize still settling: let it land.
    if let Some(deadline) = debouncer.deadline() {
        sleep_until(Instant::from_std(deadline)).await;
        if debouncer.poll(deadline) {
            dashboard.on_resize()?;
        }
    }
    info!("[Bees] session ended");
    Ok(dashboard.into_renderer().into_inner())
}

/// Apply one event. Bad metric ids are reported and skipped; render failures
/// end the session.
pub fn handle_event<R: Renderer>(
    dashboard: &mut DashboardController<R>,
    debouncer: &mut ResizeDebouncer,
    event: SessionEvent,
) -> anyhow::Result<()> {
    debug!("[Bees] event {:?}", event);
    let result = match event {
        SessionEvent::Metric(id) => dashboard.on_metric_change(&id),
        SessionEvent::Region(name) => dashboard.on_region_click(&name),
        SessionEvent::Resize => {
            debouncer.note(Instant::now().into_std());
            return Ok(());
        }
    };
    match result {
        Ok(refresh) => {
            debug!("[Bees] applied {:?}", refresh);
            Ok(())
        }
        Err(DashboardError::Core(e)) => {
            warn!("[Bees] ignored event: {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
