//! Render-ready chart description.
//!
//! [`assemble`] packages projected series with the axis and layout metadata a
//! renderer needs. It does no numeric work. The same [`ChartSpec`] is drawn by
//! the desktop UI and serialized to JSON by the headless binary.

use serde::Serialize;

use crate::pipeline::projection::Series;
use crate::pipeline::timebase;
use crate::pipeline::TimeAxis;

pub const CHART_TITLE: &str = "Selected Data Over Time";
pub const NORMALIZED_Y_LABEL: &str = "Normalized Value (0 to 1)";
pub const RAW_Y_LABEL: &str = "Raw Values";
pub const EMPTY_SELECTION_MESSAGE: &str = "Select at least one column to visualize.";
pub const NO_ROWS_MESSAGE: &str = "No rows in the selected time range.";

/// Trace drawing mode
pub const TRACE_MODE: &str = "lines+markers";
/// Hover mode: one readout for every trace at the hovered x
pub const HOVER_MODE: &str = "x unified";

pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 500;

/// One drawn point. `y` is the displayed value, `raw` the logged one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
    pub raw: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub mode: &'static str,
    pub points: Vec<TracePoint>,
    /// Template for external renderers. `%{raw}` refers to [`TracePoint::raw`].
    pub hover_template: String,
}

impl Trace {
    fn from_series(series: Series) -> Self {
        let hover_template = format!(
            "%{{x}}<br>{}: %{{raw:.3f}}<extra></extra>",
            series.name
        );
        Self {
            points: series
                .points
                .iter()
                .map(|p| TracePoint {
                    x: p.x,
                    y: p.display,
                    raw: p.raw,
                })
                .collect(),
            name: series.name,
            mode: TRACE_MODE,
            hover_template,
        }
    }

    /// Hover line for one point, raw value to 3 decimals
    pub fn hover_text(&self, point: &TracePoint) -> String {
        format!("{}: {:.3}", self.name, point.raw)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub hover_mode: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Everything needed to draw one chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub layout: ChartLayout,
    pub x_axis: TimeAxis,
    pub normalized: bool,
    pub traces: Vec<Trace>,
}

/// Unified hover readout at one x position
#[derive(Clone, Debug, PartialEq)]
pub struct HoverReadout {
    /// The bucket x the pointer snapped to
    pub x: f64,
    /// Formatted x coordinate
    pub header: String,
    /// One `name: raw` line per trace
    pub lines: Vec<String>,
}

impl ChartSpec {
    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|t| t.points.is_empty())
    }

    /// Format an x coordinate on this chart's axis
    pub fn format_x(&self, x: f64) -> String {
        match self.x_axis {
            TimeAxis::Elapsed => timebase::format_elapsed(x),
            TimeAxis::Absolute => timebase::format_epoch_seconds(x),
        }
    }

    /// Readout for the bucket nearest to `x`, or None for an empty chart
    pub fn hover_readout(&self, x: f64) -> Option<HoverReadout> {
        let snapped = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.x))
            .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()))?;

        let lines = self
            .traces
            .iter()
            .filter_map(|trace| {
                trace
                    .points
                    .iter()
                    .find(|p| p.x == snapped)
                    .map(|p| trace.hover_text(p))
            })
            .collect();

        Some(HoverReadout {
            x: snapped,
            header: self.format_x(snapped),
            lines,
        })
    }
}

/// Package projected series into a chart.
///
/// The absolute axis is titled with the table's timestamp column.
pub fn assemble(
    series: Vec<Series>,
    x_axis: TimeAxis,
    timestamp_column: &str,
    normalized: bool,
) -> ChartSpec {
    let x_axis_title = match x_axis {
        TimeAxis::Elapsed => x_axis.as_ref(),
        TimeAxis::Absolute => timestamp_column,
    };
    let y_axis_title = if normalized {
        NORMALIZED_Y_LABEL
    } else {
        RAW_Y_LABEL
    };

    ChartSpec {
        layout: ChartLayout {
            title: CHART_TITLE.to_string(),
            x_axis_title: x_axis_title.to_string(),
            y_axis_title: y_axis_title.to_string(),
            hover_mode: HOVER_MODE,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        },
        x_axis,
        normalized,
        traces: series.into_iter().map(Trace::from_series).collect(),
    }
}
