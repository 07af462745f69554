//! Timestamp parsing and the elapsed-time axis.
//!
//! Elapsed seconds are measured from the first row in input order, not from
//! the earliest timestamp. A log whose rows are out of chronological order
//! therefore gets negative elapsed values for rows that happened before the
//! first listed one. Downstream stages keep those values as they are.

use chrono::{DateTime, NaiveDateTime};

/// Parse a timestamp with a `strftime`-style format
pub fn parse_timestamp(value: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), format).ok()
}

/// Signed seconds from `origin` to `t`, with sub-second precision
pub fn seconds_between(origin: NaiveDateTime, t: NaiveDateTime) -> f64 {
    let delta = t - origin;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        // Out of microsecond range (~292k years), fall back to milliseconds
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Elapsed seconds of every timestamp relative to the first one
pub fn elapsed_seconds(timestamps: &[NaiveDateTime]) -> Vec<f64> {
    let Some(&origin) = timestamps.first() else {
        return Vec::new();
    };
    timestamps
        .iter()
        .map(|&t| seconds_between(origin, t))
        .collect()
}

/// Absolute timestamp as seconds since the Unix epoch (naive times are
/// interpreted as UTC). Used as the x coordinate on the absolute axis.
pub fn to_epoch_seconds(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp_micros() as f64 / 1_000_000.0
}

/// Inverse of [`to_epoch_seconds`]. None for non-finite or out-of-range input.
pub fn from_epoch_seconds(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
    let (whole, nanos) = if nanos >= 1_000_000_000 {
        (whole + 1.0, 0)
    } else {
        (whole, nanos)
    };
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.naive_utc())
}

/// Format an absolute x coordinate for axis ticks and hover readouts
pub fn format_epoch_seconds(seconds: f64) -> String {
    match from_epoch_seconds(seconds) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{}", seconds),
    }
}

/// Format an elapsed-seconds x coordinate, trimming float noise such as
/// `0.30000000000000004`
pub fn format_elapsed(seconds: f64) -> String {
    let text = format!("{:.3}", seconds);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
