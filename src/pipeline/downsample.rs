//! Fixed-interval downsampling.
//!
//! Rows are grouped into bins of `bin_size` seconds on the elapsed axis and
//! each bin is represented by the first row (in input order) that falls in
//! it. Nothing is averaged or interpolated.
//!
//! This runs in two passes. Pass one assigns every row its bucket index and
//! does not care about order. Pass two walks the rows in input order and
//! records the first row seen for each bucket in an ordered map, never
//! overwriting an entry. Iterating the map then yields buckets in ascending
//! index order whatever the input order was.

use std::collections::BTreeMap;

use serde::Serialize;

use super::InvalidParameterError;
use crate::parsers::types::Table;

/// Relative tolerance for snapping a bucket ratio onto an integer boundary.
/// Keeps `3.0 / 0.1 = 29.999999999999996` in bucket 30.
const BUCKET_SNAP_TOLERANCE: f64 = 1e-9;

/// One populated time bin and its representative row
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bucket {
    /// `floor(elapsed_sec / bin_size)`
    pub index: i64,
    /// `index * bin_size`, the bucket's x coordinate on the elapsed axis
    pub value: f64,
    /// Row of the input table chosen as representative
    pub row: usize,
}

/// Output of [`downsample`]: one bucket per populated bin, ascending, and a
/// table whose row `i` is the representative of `buckets[i]`
#[derive(Clone, Debug, PartialEq)]
pub struct Downsampled {
    pub bin_size: f64,
    pub buckets: Vec<Bucket>,
    pub table: Table,
}

impl Downsampled {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Reject bin sizes that are zero, negative, or not finite
pub fn validate_bin_size(bin_size: f64) -> Result<(), InvalidParameterError> {
    if bin_size.is_finite() && bin_size > 0.0 {
        Ok(())
    } else {
        Err(InvalidParameterError::NonPositiveBinSize(bin_size))
    }
}

/// Bucket index of an elapsed time. Ratios within floating-point noise of
/// an integer are snapped onto it before flooring.
pub fn bucket_index(elapsed_sec: f64, bin_size: f64) -> i64 {
    let ratio = elapsed_sec / bin_size;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= BUCKET_SNAP_TOLERANCE * nearest.abs().max(1.0) {
        nearest as i64
    } else {
        ratio.floor() as i64
    }
}

/// Downsample `table` to one row per `bin_size`-second bucket
pub fn downsample(table: &Table, bin_size: f64) -> Result<Downsampled, InvalidParameterError> {
    validate_bin_size(bin_size)?;

    // Pass 1: bucket per row
    let indices: Vec<i64> = table
        .elapsed_sec()
        .iter()
        .map(|&e| bucket_index(e, bin_size))
        .collect();

    // Pass 2: first row per bucket, in input order
    let mut first_rows: BTreeMap<i64, usize> = BTreeMap::new();
    for (row, &index) in indices.iter().enumerate() {
        first_rows.entry(index).or_insert(row);
    }

    let buckets: Vec<Bucket> = first_rows
        .into_iter()
        .map(|(index, row)| Bucket {
            index,
            value: index as f64 * bin_size,
            row,
        })
        .collect();

    let rows: Vec<usize> = buckets.iter().map(|b| b.row).collect();
    let table = table.take(&rows);

    tracing::debug!(
        "Downsampled {} rows into {} buckets of {}s",
        indices.len(),
        buckets.len(),
        bin_size
    );

    Ok(Downsampled {
        bin_size,
        buckets,
        table,
    })
}
