//! Main application state and eframe::App implementation.
//!
//! The table is loaded on a background thread and handed over complete via
//! a channel. Every frame the control values are validated into
//! [`ViewParams`] and the chart is taken from the recompute cache, which
//! only re-runs the pipeline when the table generation or a parameter
//! changed.

use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::chart::ChartSpec;
use crate::config::ExplorerConfig;
use crate::parsers::FlightCsv;
use crate::pipeline::RecomputeCache;
use crate::source::{self, DataSource};
use crate::state::{LoadResult, LoadedFlight, LoadingState, Toast, ToastType, ViewState};

pub const APP_TITLE: &str = "Flight Data Explorer";

/// Main application state
pub struct FlightExplorerApp {
    /// Read-only configuration
    pub config: ExplorerConfig,
    /// Source of the current (or next) table
    pub source: DataSource,
    /// The table being explored
    pub flight: Option<LoadedFlight>,
    /// Load or parse failure; nothing is plotted while set
    pub fatal_error: Option<String>,
    /// Control values bound to the widgets
    pub view: ViewState,
    /// Last control values that produced a chart
    pub last_valid_view: ViewState,
    /// Memoized pipeline output
    pub recompute_cache: RecomputeCache,
    /// Chart currently on screen
    pub chart: Option<Arc<ChartSpec>>,
    /// Bucket x under the pointer, for the hover guide
    pub hover_x: Option<f64>,
    /// Notice currently on screen
    pub toast: Option<Toast>,
    /// Track dropped files to prevent duplicates
    pub last_drop_time: Option<Instant>,
    /// Channel for receiving loaded tables from background thread
    pub load_receiver: Option<Receiver<LoadResult>>,
    /// Current loading state
    pub loading_state: LoadingState,
    /// Generation handed to the next loaded table
    next_generation: u64,
}

impl FlightExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ExplorerConfig) -> Self {
        let mut app = Self::with_config(config);
        let source = app.source.clone();
        app.start_loading(source);
        app
    }

    /// App state without a window, nothing loaded yet
    pub fn with_config(config: ExplorerConfig) -> Self {
        Self {
            source: DataSource::from_config(&config),
            view: ViewState {
                normalize: config.default_normalize,
                bin_size: config.default_bin_size,
                ..ViewState::default()
            },
            last_valid_view: ViewState::default(),
            config,
            flight: None,
            fatal_error: None,
            recompute_cache: RecomputeCache::new(),
            chart: None,
            hover_x: None,
            toast: None,
            last_drop_time: None,
            load_receiver: None,
            loading_state: LoadingState::Idle,
            next_generation: 1,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start loading a table in the background
    pub fn start_loading(&mut self, source: DataSource) {
        let filename = source
            .local_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        self.loading_state = LoadingState::Loading(filename);
        self.source = source.clone();

        let generation = self.next_generation;
        self.next_generation += 1;

        let parser = FlightCsv::from_config(&self.config);
        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        self.load_receiver = Some(receiver);

        // Spawn background thread for loading
        thread::spawn(move || {
            let result = Self::load_sync(&source, &parser, generation);
            let _ = sender.send(result);
        });
    }

    /// Open a different file
    pub fn start_loading_file(&mut self, path: PathBuf) {
        self.start_loading(DataSource {
            local_path: path,
            remote_url: None,
        });
    }

    /// Re-read the current source
    pub fn reload(&mut self) {
        let source = self.source.clone();
        self.start_loading(source);
    }

    /// Synchronously load a table (runs in background thread)
    fn load_sync(source: &DataSource, parser: &FlightCsv, generation: u64) -> LoadResult {
        match source::load_table(source, parser) {
            Ok(table) => LoadResult::Success(Box::new(LoadedFlight::new(
                source.local_path.clone(),
                table,
                generation,
            ))),
            Err(e) => {
                tracing::error!("Failed to load {}: {}", source.local_path.display(), e);
                LoadResult::Error(e.to_string())
            }
        }
    }

    /// Check for completed background loads
    pub fn check_loading_complete(&mut self) {
        if let Some(receiver) = &self.load_receiver {
            if let Ok(result) = receiver.try_recv() {
                match result {
                    LoadResult::Success(flight) => self.install_flight(*flight),
                    LoadResult::Error(e) => {
                        self.flight = None;
                        self.chart = None;
                        self.recompute_cache.clear();
                        self.fatal_error = Some(e.clone());
                        self.show_toast(&format!("Error: {}", e), ToastType::Error);
                    }
                }
                self.load_receiver = None;
                self.loading_state = LoadingState::Idle;
            }
        }
    }

    /// Swap in a freshly loaded table
    pub fn install_flight(&mut self, flight: LoadedFlight) {
        tracing::info!(
            "Loaded {} ({} rows, generation {})",
            flight.name,
            flight.table.len(),
            flight.generation
        );

        let same_source = self
            .flight
            .as_ref()
            .is_some_and(|current| current.path == flight.path);
        self.view = if same_source {
            self.view.carry_over(&flight.table, &self.config)
        } else {
            ViewState::for_table(&flight.table, &self.config)
        };
        self.last_valid_view = self.view.clone();
        self.fatal_error = None;
        self.hover_x = None;
        self.show_toast(&format!("Loaded {}", flight.name), ToastType::Success);
        self.flight = Some(flight);
        self.refresh_chart();
    }

    // ========================================================================
    // Recompute
    // ========================================================================

    /// Bring the chart up to date with the current controls.
    ///
    /// A rejected parameter puts the controls back to the last accepted
    /// values and keeps the current chart on screen.
    pub fn refresh_chart(&mut self) {
        let Some(flight) = &self.flight else {
            self.chart = None;
            return;
        };

        let result = self.view.to_params().and_then(|params| {
            self.recompute_cache
                .get_or_compute(flight.generation, &flight.table, &params)
        });

        match result {
            Ok(chart) => {
                self.chart = Some(chart);
                if self.last_valid_view != self.view {
                    self.last_valid_view = self.view.clone();
                }
            }
            Err(e) => {
                tracing::warn!("Rejected view parameters: {}", e);
                self.view = self.last_valid_view.clone();
                self.toast = Some(Toast::rejected(&e));
            }
        }
    }

    /// Show a toast notification
    pub fn show_toast(&mut self, message: &str, toast_type: ToastType) {
        self.toast = Some(Toast::new(message, toast_type));
    }

    /// Handle file drops
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        // Don't accept drops while loading
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            return;
        }

        // Debounce file drops
        if let Some(last_drop) = self.last_drop_time {
            if last_drop.elapsed().as_secs() < 2 {
                return;
            }
        }

        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|f| f.path.clone())
        });

        if let Some(path) = dropped {
            self.last_drop_time = Some(Instant::now());
            self.start_loading_file(path);
        }
    }
}

impl eframe::App for FlightExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loads
        self.check_loading_complete();

        // Handle file drops
        self.handle_dropped_files(ctx);

        // Request repaint while loading (for spinner animation)
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            ctx.request_repaint();
        }

        // Toast notifications
        self.render_toast(ctx);

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            self.render_title_bar(ui);
        });

        // Controls on the left
        egui::SidePanel::left("controls_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                let before = self.view.clone();
                self.render_controls(ui);
                if self.view != before {
                    self.refresh_chart();
                }
            });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart(ui);
        });
    }
}
