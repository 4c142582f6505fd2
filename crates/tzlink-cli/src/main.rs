//! `tzlink` command-line front end.
//!
//! This binary is the only place that reads the system clock or the host
//! timezone; the engine receives both as explicit arguments. Output is pretty
//! JSON on stdout, logs go to stderr (`RUST_LOG`, default `warn`).

mod cli;

use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tzlink_engine::{
    convert_for_viewer, resolve_host_timezone, EngineConfig, Region, SchedulingEngine,
};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let engine = load_engine(&cli)?;

    let output = run(&engine, cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_engine(cli: &Cli) -> Result<SchedulingEngine> {
    let config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            EngineConfig::from_json(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    debug!(regions = config.regions.len(), "engine config loaded");
    Ok(SchedulingEngine::new(config)?)
}

fn run(engine: &SchedulingEngine, command: Commands) -> Result<Value> {
    let value = match command {
        Commands::Parse {
            text,
            now,
            timezone,
        } => {
            let timezone = match timezone {
                Some(tz) => tz,
                None => resolve_host_timezone().context("pass --timezone explicitly")?,
            };
            let now = now.unwrap_or_else(Utc::now);
            debug!(%now, %timezone, "parsing phrase");
            let parsed = engine.parse_natural_language(&text, now, &timezone)?;
            serde_json::to_value(parsed)?
        }
        Commands::Status { at, regions } => {
            let at = at.unwrap_or_else(Utc::now);
            let statuses = engine.business_hours_status(at, region_override(&regions))?;
            serde_json::to_value(statuses)?
        }
        Commands::Suggest { base, regions } => {
            let base = base.unwrap_or_else(Utc::now);
            let suggestions = engine.optimal_meeting_times(base, region_override(&regions))?;
            serde_json::to_value(suggestions)?
        }
        Commands::Slug { title, date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            Value::String(engine.slug(&title, date))
        }
        Commands::Convert { instant, timezone } => {
            serde_json::to_value(convert_for_viewer(instant, &timezone)?)?
        }
    };
    Ok(value)
}

/// No `--region` flags means "use the configured regions".
fn region_override(regions: &[Region]) -> Option<&[Region]> {
    if regions.is_empty() {
        None
    } else {
        Some(regions)
    }
}
