//! Per-column series projection and min-max normalization.

use serde::Serialize;

use super::downsample::Downsampled;
use super::timebase;
use super::{InvalidParameterError, TimeAxis};
use crate::parsers::types::ColumnData;

/// One point of a projected series
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: f64,
    /// Value as logged
    pub raw: f64,
    /// Value as drawn (equal to `raw` unless normalized)
    pub display: f64,
}

/// A selected column projected onto the bucketed x axis
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
    /// Minimum raw value (NaN when the series has no finite values)
    pub min: f64,
    /// Maximum raw value (NaN when the series has no finite values)
    pub max: f64,
    pub normalized: bool,
}

impl Series {
    pub fn raw_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.raw).collect()
    }

    pub fn display_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.display).collect()
    }
}

/// Min and max of the finite values, or None if there are none
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Scale values into [0, 1].
///
/// A degenerate series (all values equal, a single point, or no finite
/// values at all) maps to all zeros. Infinite values pin to the nearest end
/// of the range and missing values stay NaN.
pub fn normalize_values(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = min_max(values).filter(|(min, max)| max > min) else {
        return vec![0.0; values.len()];
    };

    // Halve the operands when max - min overflows
    let (scale, min_s, range) = if (max - min).is_finite() {
        (1.0, min, max - min)
    } else {
        (0.5, min * 0.5, max * 0.5 - min * 0.5)
    };

    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                v
            } else if v.is_infinite() {
                if v > 0.0 { 1.0 } else { 0.0 }
            } else {
                ((v * scale - min_s) / range).clamp(0.0, 1.0)
            }
        })
        .collect()
}

/// X coordinates of each bucket on the chosen axis
pub fn x_values(downsampled: &Downsampled, axis: TimeAxis) -> Vec<f64> {
    match axis {
        TimeAxis::Elapsed => downsampled.buckets.iter().map(|b| b.value).collect(),
        TimeAxis::Absolute => downsampled
            .table
            .timestamps()
            .iter()
            .map(|&t| timebase::to_epoch_seconds(t))
            .collect(),
    }
}

/// Project each selected column of the downsampled table into a [`Series`]
pub fn project(
    downsampled: &Downsampled,
    x_axis: TimeAxis,
    columns: &[String],
    normalize: bool,
) -> Result<Vec<Series>, InvalidParameterError> {
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let xs = x_values(downsampled, x_axis);

    let series = columns
        .iter()
        .map(|name| {
            let raw = match downsampled.table.column(name).map(|c| &c.data) {
                Some(ColumnData::Numeric(values)) => values.as_slice(),
                Some(ColumnData::Text(_)) => {
                    return Err(InvalidParameterError::NonNumericColumn(name.clone()))
                }
                None if name == downsampled.table.timestamp_column() => {
                    return Err(InvalidParameterError::NonNumericColumn(name.clone()))
                }
                None => return Err(InvalidParameterError::UnknownColumn(name.clone())),
            };

            let (min, max) = min_max(raw).unwrap_or((f64::NAN, f64::NAN));
            let display = if normalize {
                normalize_values(raw)
            } else {
                raw.to_vec()
            };

            let points = xs
                .iter()
                .zip(raw.iter().zip(display))
                .map(|(&x, (&raw, display))| SeriesPoint { x, raw, display })
                .collect();

            Ok(Series {
                name: name.clone(),
                points,
                min,
                max,
                normalized: normalize,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Column errors take precedence over an empty window
    if downsampled.is_empty() {
        return Ok(Vec::new());
    }

    Ok(series)
}
