//! Core application state types and constants.
//!
//! This module contains the loaded flight, the raw values behind each
//! control widget, and the plumbing types for background loading and toasts.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use strum::{AsRefStr, EnumIter};

use crate::config::ExplorerConfig;
use crate::parsers::Table;
use crate::pipeline::{timebase, InvalidParameterError, TimeAxis, TimeFilter, ViewParams};

// ============================================================================
// Constants
// ============================================================================

/// Supported file extensions (used in file dialogs)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv"];

/// Color palette for chart traces
pub const CHART_COLORS: &[[u8; 3]] = &[
    [71, 108, 155],  // Blue
    [191, 78, 48],   // Rust orange
    [113, 120, 78],  // Olive green
    [253, 193, 73],  // Amber
    [135, 30, 28],   // Dark red
    [159, 166, 119], // Sage green
    [100, 149, 237], // Cornflower blue
    [255, 127, 80],  // Coral
    [144, 238, 144], // Light green
    [204, 121, 167], // Reddish purple
];

/// Color for trace number `index`, cycling through the palette
pub fn trace_color(index: usize) -> [u8; 3] {
    CHART_COLORS[index % CHART_COLORS.len()]
}

// ============================================================================
// Core Types
// ============================================================================

/// The flight table currently being explored
#[derive(Clone)]
pub struct LoadedFlight {
    /// Path the table was read from
    pub path: PathBuf,
    /// Display name for the file
    pub name: String,
    /// Parsed table, shared read-only with every recompute
    pub table: Arc<Table>,
    /// Bumped on every (re)load so memoized charts are invalidated
    pub generation: u64,
}

impl LoadedFlight {
    pub fn new(path: PathBuf, table: Table, generation: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            table: Arc::new(table),
            generation,
        }
    }
}

/// Result from background loading operation
pub enum LoadResult {
    Success(Box<LoadedFlight>),
    Error(String),
}

/// Current state of file loading
pub enum LoadingState {
    /// No loading in progress
    Idle,
    /// Loading a file (contains filename being loaded)
    Loading(String),
}

/// Kind of toast notification (determines color)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastType {
    /// A table was loaded
    Success,
    /// A control value was rejected and rolled back
    Warning,
    /// The table could not be loaded
    Error,
}

impl ToastType {
    /// Background color
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Success => [113, 120, 78],
            ToastType::Warning => [253, 193, 73],
            ToastType::Error => [135, 30, 28],
        }
    }

    /// Text color, dark on amber
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30],
            _ => [255, 255, 255],
        }
    }
}

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// A transient notice shown over the chart
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastType,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastType) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    /// Notice for a control value that was rolled back
    pub fn rejected(error: &InvalidParameterError) -> Self {
        Self::new(format!("Kept previous view: {}", error), ToastType::Warning)
    }

    /// Time left before the toast disappears
    pub fn remaining(&self) -> Duration {
        TOAST_DURATION.saturating_sub(self.shown_at.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }
}

// ============================================================================
// Control State
// ============================================================================

/// Which axis the time filter applies to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum FilterMode {
    #[default]
    #[strum(serialize = "No filter")]
    None,
    #[strum(serialize = "Elapsed seconds")]
    Elapsed,
    #[strum(serialize = "Absolute datetime")]
    Absolute,
}

/// Raw widget values, before validation.
///
/// The UI binds directly to these fields; [`ViewState::to_params`] turns
/// them into validated pipeline parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Selected columns in the order they were picked
    pub selected: Vec<String>,
    pub normalize: bool,
    pub filter_mode: FilterMode,
    /// Elapsed-seconds slider (lo, hi)
    pub elapsed_range: (f64, f64),
    /// Absolute slider (lo, hi) in epoch seconds
    pub absolute_range: (f64, f64),
    /// Slider domains, from the loaded table
    pub elapsed_bounds: (f64, f64),
    pub absolute_bounds: (f64, f64),
    pub x_axis: TimeAxis,
    pub bin_size: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            normalize: true,
            filter_mode: FilterMode::None,
            elapsed_range: (0.0, 0.0),
            absolute_range: (0.0, 0.0),
            elapsed_bounds: (0.0, 0.0),
            absolute_bounds: (0.0, 0.0),
            x_axis: TimeAxis::Elapsed,
            bin_size: 1.0,
        }
    }
}

impl ViewState {
    /// Fresh controls for a newly loaded table: nothing selected, sliders
    /// spanning the full observed range.
    pub fn for_table(table: &Table, config: &ExplorerConfig) -> Self {
        let elapsed_bounds = table.elapsed_range().unwrap_or((0.0, 0.0));
        let absolute_bounds = table
            .timestamp_range()
            .map(|(lo, hi)| (timebase::to_epoch_seconds(lo), timebase::to_epoch_seconds(hi)))
            .unwrap_or((0.0, 0.0));

        Self {
            normalize: config.default_normalize,
            bin_size: config.default_bin_size,
            elapsed_range: elapsed_bounds,
            absolute_range: absolute_bounds,
            elapsed_bounds,
            absolute_bounds,
            ..Self::default()
        }
    }

    /// Keep the selection and filter choices across a reload, dropping
    /// columns that no longer exist and re-spanning the sliders
    pub fn carry_over(&self, table: &Table, config: &ExplorerConfig) -> Self {
        let plottable = table.plottable_columns();
        Self {
            selected: self
                .selected
                .iter()
                .filter(|c| plottable.contains(&c.as_str()))
                .cloned()
                .collect(),
            normalize: self.normalize,
            filter_mode: self.filter_mode,
            x_axis: self.x_axis,
            bin_size: self.bin_size,
            ..Self::for_table(table, config)
        }
    }

    /// Toggle a column in or out of the selection
    pub fn toggle_column(&mut self, name: &str) {
        if let Some(pos) = self.selected.iter().position(|c| c == name) {
            self.selected.remove(pos);
        } else {
            self.selected.push(name.to_string());
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|c| c == name)
    }

    /// Validate the widget values into pipeline parameters
    pub fn to_params(&self) -> Result<ViewParams, InvalidParameterError> {
        let filter = match self.filter_mode {
            FilterMode::None => TimeFilter::None,
            FilterMode::Elapsed => TimeFilter::Elapsed {
                lo: self.elapsed_range.0,
                hi: self.elapsed_range.1,
            },
            FilterMode::Absolute => {
                let lo = timebase::from_epoch_seconds(self.absolute_range.0)
                    .ok_or(InvalidParameterError::NonFiniteBound)?;
                let hi = timebase::from_epoch_seconds(self.absolute_range.1)
                    .ok_or(InvalidParameterError::NonFiniteBound)?;
                TimeFilter::Absolute { lo, hi }
            }
        };

        Ok(ViewParams {
            columns: self.selected.clone(),
            normalize: self.normalize,
            filter,
            x_axis: self.x_axis,
            bin_size: self.bin_size,
        })
    }
}
