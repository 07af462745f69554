//! Time-window row filtering.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use super::{InvalidParameterError, TimeAxis};
use crate::parsers::types::Table;

/// A time range as requested by the user, before validation and clamping
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimeFilter {
    #[default]
    None,
    Elapsed {
        lo: f64,
        hi: f64,
    },
    Absolute {
        lo: NaiveDateTime,
        hi: NaiveDateTime,
    },
}

impl TimeFilter {
    /// Validate against the table and build the clamped window.
    /// `Ok(None)` means no filtering.
    pub fn window(&self, table: &Table) -> Result<Option<TimeWindow>, InvalidParameterError> {
        match *self {
            TimeFilter::None => Ok(None),
            TimeFilter::Elapsed { lo, hi } => TimeWindow::elapsed(lo, hi, table).map(Some),
            TimeFilter::Absolute { lo, hi } => TimeWindow::absolute(lo, hi, table).map(Some),
        }
    }
}

/// A closed interval on one of the two time axes.
///
/// Bounds are clamped to the table's observed range. When the requested
/// range lies entirely outside the data, clamping leaves `lo > hi` and the
/// window matches no rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeWindow {
    Elapsed {
        lo: f64,
        hi: f64,
    },
    Absolute {
        lo: NaiveDateTime,
        hi: NaiveDateTime,
    },
}

impl TimeWindow {
    /// Window over elapsed seconds
    pub fn elapsed(lo: f64, hi: f64, table: &Table) -> Result<Self, InvalidParameterError> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(InvalidParameterError::NonFiniteBound);
        }
        if lo > hi {
            return Err(InvalidParameterError::ReversedWindow {
                lo: lo.to_string(),
                hi: hi.to_string(),
            });
        }
        let (lo, hi) = match table.elapsed_range() {
            Some((min, max)) => (lo.max(min), hi.min(max)),
            None => (lo, hi),
        };
        Ok(TimeWindow::Elapsed { lo, hi })
    }

    /// Window over absolute timestamps
    pub fn absolute(
        lo: NaiveDateTime,
        hi: NaiveDateTime,
        table: &Table,
    ) -> Result<Self, InvalidParameterError> {
        if lo > hi {
            return Err(InvalidParameterError::ReversedWindow {
                lo: lo.to_string(),
                hi: hi.to_string(),
            });
        }
        let (lo, hi) = match table.timestamp_range() {
            Some((min, max)) => (lo.max(min), hi.min(max)),
            None => (lo, hi),
        };
        Ok(TimeWindow::Absolute { lo, hi })
    }

    pub fn axis(&self) -> TimeAxis {
        match self {
            TimeWindow::Elapsed { .. } => TimeAxis::Elapsed,
            TimeWindow::Absolute { .. } => TimeAxis::Absolute,
        }
    }

    /// True when clamping left nothing inside the window
    pub fn is_empty(&self) -> bool {
        match self {
            TimeWindow::Elapsed { lo, hi } => lo > hi,
            TimeWindow::Absolute { lo, hi } => lo > hi,
        }
    }

    /// Inclusive membership test for row `row` of `table`
    fn contains_row(&self, table: &Table, row: usize) -> bool {
        match self {
            TimeWindow::Elapsed { lo, hi } => {
                let v = table.elapsed_sec()[row];
                *lo <= v && v <= *hi
            }
            TimeWindow::Absolute { lo, hi } => {
                let t = table.timestamps()[row];
                *lo <= t && t <= *hi
            }
        }
    }
}

/// Keep the rows inside `window`, in their original order.
/// With no window the table is passed through untouched.
pub fn filter_rows<'a>(table: &'a Table, window: Option<&TimeWindow>) -> Cow<'a, Table> {
    let Some(window) = window else {
        return Cow::Borrowed(table);
    };

    let rows: Vec<usize> = if window.is_empty() {
        Vec::new()
    } else {
        (0..table.len())
            .filter(|&row| window.contains_row(table, row))
            .collect()
    };

    tracing::debug!(
        "Range filter on {} axis kept {} of {} rows",
        window.axis().as_ref(),
        rows.len(),
        table.len()
    );

    Cow::Owned(table.take(&rows))
}
