//! Flight Data Explorer - interactive viewer for a flight telemetry time series.
//!
//! Loads the configured flight table (downloading it first if only a remote
//! copy exists) and lets the user pick columns, filter by time, downsample,
//! and normalize them on an overlaid chart.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use flightlog::app::{FlightExplorerApp, APP_TITLE};
use flightlog::config::ExplorerConfig;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ExplorerConfig::load();
    tracing::info!("Data source: {}", config.data_path.display());

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title(APP_TITLE)
            .with_app_id("flightlog")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(|cc| Ok(Box::new(FlightExplorerApp::new(cc, config)))),
    )
}
