//! Time-series processing pipeline.
//!
//! Every user interaction is turned into a [`ViewParams`] and the whole
//! pipeline is re-run over the immutable [`Table`]:
//!
//! ```text
//! Table (elapsed_sec derived at load)
//!   -> range_filter   (optional window on the elapsed or absolute axis)
//!   -> downsample     (first row per bin_size bucket)
//!   -> projection     (per column raw/display values)
//!   -> chart          (render-ready ChartSpec)
//! ```
//!
//! [`recompute`] is a pure function of the table and the parameters, so the
//! result of an older interaction can always be dropped in favour of a newer
//! one.

pub mod downsample;
pub mod projection;
pub mod range_filter;
pub mod timebase;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};
use thiserror::Error;

use crate::chart::{self, ChartSpec};
use crate::config::ExplorerConfig;
use crate::parsers::types::Table;

pub use range_filter::{TimeFilter, TimeWindow};

/// Rejected user-supplied parameter. Recoverable: the caller keeps its
/// previous parameters and asks again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameterError {
    #[error("Bin size must be a positive number of seconds, got {0}")]
    NonPositiveBinSize(f64),

    #[error("Time window is reversed: start {lo} is after end {hi}")]
    ReversedWindow { lo: String, hi: String },

    #[error("Time window bounds must be finite")]
    NonFiniteBound,

    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),

    #[error("Column '{0}' is not numeric and cannot be plotted")]
    NonNumericColumn(String),
}

/// The two time axes a row can be placed on
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum TimeAxis {
    /// Seconds since the first row
    #[default]
    #[strum(serialize = "elapsed_sec")]
    Elapsed,
    /// Wall-clock timestamp of the row
    #[strum(serialize = "date")]
    Absolute,
}

/// Everything one recompute depends on besides the table
#[derive(Clone, Debug, PartialEq)]
pub struct ViewParams {
    /// Selected columns, in selection order
    pub columns: Vec<String>,
    pub normalize: bool,
    pub filter: TimeFilter,
    pub x_axis: TimeAxis,
    /// Downsampling bin width in seconds
    pub bin_size: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            normalize: true,
            filter: TimeFilter::None,
            x_axis: TimeAxis::Elapsed,
            bin_size: 1.0,
        }
    }
}

impl ViewParams {
    /// Defaults from configuration, nothing selected
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            normalize: config.default_normalize,
            bin_size: config.default_bin_size,
            ..Self::default()
        }
    }

    /// Configuration defaults with every plottable column selected
    pub fn all_columns(table: &Table, config: &ExplorerConfig) -> Self {
        Self {
            columns: table
                .plottable_columns()
                .into_iter()
                .map(str::to_string)
                .collect(),
            ..Self::from_config(config)
        }
    }
}

/// Run the full pipeline for one interaction
pub fn recompute(table: &Table, params: &ViewParams) -> Result<ChartSpec, InvalidParameterError> {
    downsample::validate_bin_size(params.bin_size)?;

    let window = params.filter.window(table)?;
    let filtered = range_filter::filter_rows(table, window.as_ref());
    let downsampled = downsample::downsample(&filtered, params.bin_size)?;
    let series = projection::project(
        &downsampled,
        params.x_axis,
        &params.columns,
        params.normalize,
    )?;

    tracing::debug!(
        "Recomputed chart: {} rows -> {} filtered -> {} buckets, {} series",
        table.len(),
        filtered.len(),
        downsampled.len(),
        series.len()
    );

    Ok(chart::assemble(
        series,
        params.x_axis,
        table.timestamp_column(),
        params.normalize,
    ))
}

/// Memoizes the last recompute.
///
/// Keyed on the table generation and the full parameter set, so a reloaded
/// table or any changed selection forces a fresh run.
#[derive(Default)]
pub struct RecomputeCache {
    key: Option<(u64, ViewParams)>,
    chart: Option<Arc<ChartSpec>>,
}

impl RecomputeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached chart for `(generation, params)` or compute it.
    /// A failed recompute leaves the cache untouched.
    pub fn get_or_compute(
        &mut self,
        generation: u64,
        table: &Table,
        params: &ViewParams,
    ) -> Result<Arc<ChartSpec>, InvalidParameterError> {
        if let (Some((cached_generation, cached_params)), Some(chart)) = (&self.key, &self.chart) {
            if *cached_generation == generation && cached_params == params {
                return Ok(Arc::clone(chart));
            }
        }

        let chart = Arc::new(recompute(table, params)?);
        self.key = Some((generation, params.clone()));
        self.chart = Some(Arc::clone(&chart));
        Ok(chart)
    }

    /// Drop the cached result
    pub fn clear(&mut self) {
        self.key = None;
        self.chart = None;
    }
}
