use std::time::Duration;

use anyhow::Result;
use tracing::info;

use qisports_core::{AppConfig, Change, Site, SiteContent, TimelineEntry};

/// Scripted headless run
#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub routes: Vec<String>,
    pub scroll: Option<f64>,
    pub duration_ms: u64,
    pub step_ms: u64,
}

/// Run the script and collect every observable state change
///
/// The scroll offset is applied right after the first render. Each route is
/// followed by `duration_ms` of clock time; with no routes the home page
/// simply runs for `duration_ms`.
pub fn simulate(config: AppConfig, options: &SimulateOptions) -> Result<Vec<TimelineEntry>> {
    let mut site = Site::new(config, SiteContent::default())?;
    if let Some(y) = options.scroll {
        site.scroll_to(y);
    }

    let step = Duration::from_millis(options.step_ms.max(1));
    let run = |site: &mut Site| {
        let end = site.now() + Duration::from_millis(options.duration_ms);
        while site.now() < end {
            site.advance(step.min(end - site.now()));
        }
    };

    if options.routes.is_empty() {
        run(&mut site);
    }
    for route in &options.routes {
        site.navigate(route)?;
        run(&mut site);
    }

    site.teardown();
    info!(elapsed_ms = site.now().as_millis() as u64, "Simulation finished");
    Ok(site.take_timeline())
}

pub fn run(config: AppConfig, options: &SimulateOptions, json: bool) -> Result<()> {
    let timeline = simulate(config, options)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
    } else {
        for entry in &timeline {
            println!("{}", format_entry(entry));
        }
    }
    Ok(())
}

fn format_entry(entry: &TimelineEntry) -> String {
    let (kind, value) = match &entry.change {
        Change::Route { location } => ("route", location.clone()),
        Change::Page { page } => ("page", page.title().to_string()),
        Change::Loader { phase } => ("loader", format!("{:?}", phase).to_lowercase()),
        Change::Slide { index } => ("slide", index.to_string()),
        Change::Header { state } => ("header", format!("{:?}", state).to_lowercase()),
    };
    format!("{:>8}ms  {:<7} {}", entry.at_ms, kind, value)
}
