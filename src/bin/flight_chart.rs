//! Headless chart export.
//!
//! Loads a flight table, plots every numeric column with the configured
//! defaults, and prints the resulting chart as JSON on stdout.
//!
//! Usage: `flight_chart [PATH]`. Without a path the configured data source
//! is used, including its remote fallback.

use anyhow::{Context, Result};

use flightlog::config::ExplorerConfig;
use flightlog::parsers::FlightCsv;
use flightlog::pipeline::{self, ViewParams};
use flightlog::source::{self, DataSource};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = ExplorerConfig::load();
    let data_source = match std::env::args_os().nth(1) {
        Some(path) => DataSource::local(path),
        None => DataSource::from_config(&config),
    };

    let table = source::load_table(&data_source, &FlightCsv::from_config(&config))
        .with_context(|| format!("loading {}", data_source.local_path.display()))?;

    let params = ViewParams::all_columns(&table, &config);
    let chart = pipeline::recompute(&table, &params).context("building chart")?;

    let json = serde_json::to_string_pretty(&chart).context("serializing chart")?;
    println!("{}", json);
    Ok(())
}
