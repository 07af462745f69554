//! Tests for series projection and normalization
//!
//! Tests cover:
//! - Raw values preserved alongside display values
//! - Min-max normalization and its inverse
//! - Degenerate series
//! - Absolute and elapsed x values
//! - Column validation

use flightlog::parsers::{FlightCsv, Parseable};
use flightlog::pipeline::downsample::downsample;
use flightlog::pipeline::projection::{normalize_values, project};
use flightlog::pipeline::{timebase, InvalidParameterError, TimeAxis};

use crate::common::float_cmp::{approx_eq, assert_slice_approx_eq};
use crate::common::synthetic;

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

// ============================================
// Normalization Tests
// ============================================

#[test]
fn test_tenth_second_scenario() {
    let table = synthetic::single_column("v", &[0, 50, 120], &[5.0, 5.0, 15.0]);
    let ds = downsample(&table, 0.1).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["v"]), true).unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series[0].display_values(), vec![0.0, 1.0]);
    assert_eq!(series[0].raw_values(), vec![5.0, 15.0]);
    assert_eq!(series[0].min, 5.0);
    assert_eq!(series[0].max, 15.0);
}

#[test]
fn test_normalization_round_trips() {
    let table = synthetic::flight(40, 250);
    let ds = downsample(&table, 0.5).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["altitude", "speed"]), true).unwrap();

    for s in &series {
        for p in &s.points {
            let restored = s.min + p.display * (s.max - s.min);
            assert!(
                (restored - p.raw).abs() < 1e-9,
                "{}: {} restored as {}",
                s.name,
                p.raw,
                restored
            );
        }
    }
}

#[test]
fn test_constant_series_is_zero_not_nan() {
    let table = synthetic::single_column("v", &[0, 1000, 2000], &[7.0, 7.0, 7.0]);
    let ds = downsample(&table, 1.0).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["v"]), true).unwrap();

    assert_eq!(series[0].display_values(), vec![0.0, 0.0, 0.0]);
    assert_eq!(series[0].raw_values(), vec![7.0, 7.0, 7.0]);
}

#[test]
fn test_single_bucket_is_zero() {
    let table = synthetic::single_column("v", &[0, 100], &[3.0, 9.0]);
    let ds = downsample(&table, 1.0).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["v"]), true).unwrap();
    assert_eq!(series[0].display_values(), vec![0.0]);
}

#[test]
fn test_raw_mode_passes_values_through() {
    let table = synthetic::single_column("v", &[0, 1000], &[-4.0, 12.5]);
    let ds = downsample(&table, 1.0).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["v"]), false).unwrap();
    assert_eq!(series[0].display_values(), vec![-4.0, 12.5]);
    assert!(!series[0].normalized);
}

#[test]
fn test_missing_values_stay_missing() {
    let out = normalize_values(&[2.0, f64::NAN, 6.0, 4.0]);
    assert!(approx_eq(out[0], 0.0));
    assert!(out[1].is_nan());
    assert!(approx_eq(out[2], 1.0));
    assert!(approx_eq(out[3], 0.5));
}

#[test]
fn test_normalized_values_never_infinite() {
    for values in [
        vec![1.0],
        vec![0.0, 0.0],
        vec![f64::NAN],
        vec![1e-300, 2e-300],
        vec![-1e300, 1e300],
    ] {
        for v in normalize_values(&values) {
            assert!(!v.is_infinite(), "{:?} produced an infinite value", values);
        }
    }
}

// ============================================
// X Axis Tests
// ============================================

#[test]
fn test_elapsed_x_is_bucket_start() {
    let table = synthetic::single_column("v", &[0, 1300, 2700], &[1.0, 2.0, 3.0]);
    let ds = downsample(&table, 1.0).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["v"]), false).unwrap();
    let xs: Vec<f64> = series[0].points.iter().map(|p| p.x).collect();
    assert_slice_approx_eq(&xs, &[0.0, 1.0, 2.0]);
}

#[test]
fn test_absolute_x_is_representative_timestamp() {
    let table = synthetic::single_column("v", &[0, 1300, 2700], &[1.0, 2.0, 3.0]);
    let ds = downsample(&table, 1.0).unwrap();
    let series = project(&ds, TimeAxis::Absolute, &names(&["v"]), false).unwrap();
    let xs: Vec<f64> = series[0].points.iter().map(|p| p.x).collect();
    let expected: Vec<f64> = [0, 1300, 2700]
        .iter()
        .map(|&ms| timebase::to_epoch_seconds(synthetic::at_ms(ms)))
        .collect();
    assert_slice_approx_eq(&xs, &expected);
}

// ============================================
// Column Selection Tests
// ============================================

#[test]
fn test_infinite_cell_stays_in_unit_range() {
    let table = FlightCsv::default()
        .parse(&synthetic::flight_csv(
            &["alt"],
            &[
                "2024-05-01_12:00:00,1",
                "2024-05-01_12:00:01,3",
                "2024-05-01_12:00:02,inf",
            ],
        ))
        .unwrap();
    let ds = downsample(&table, 1.0).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["alt"]), true).unwrap();

    assert_eq!(series[0].display_values(), vec![0.0, 1.0, 1.0]);
    assert_eq!((series[0].min, series[0].max), (1.0, 3.0));
    assert!(series[0].raw_values()[2].is_infinite());
}

#[test]
fn test_empty_table_projects_no_series() {
    let table = synthetic::flight(5, 1000).take(&[]);
    let ds = downsample(&table, 1.0).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["altitude"]), true).unwrap();
    assert!(series.is_empty());
}

#[test]
fn test_no_columns_is_empty_not_error() {
    let ds = downsample(&synthetic::flight(5, 1000), 1.0).unwrap();
    assert!(project(&ds, TimeAxis::Elapsed, &[], true).unwrap().is_empty());
}

#[test]
fn test_selection_order_is_kept() {
    let ds = downsample(&synthetic::flight(5, 1000), 1.0).unwrap();
    let series = project(&ds, TimeAxis::Elapsed, &names(&["speed", "altitude"]), true).unwrap();
    let order: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(order, vec!["speed", "altitude"]);
}

#[test]
fn test_text_column_rejected() {
    let ds = downsample(&synthetic::flight(5, 1000), 1.0).unwrap();
    assert_eq!(
        project(&ds, TimeAxis::Elapsed, &names(&["mode"]), true).unwrap_err(),
        InvalidParameterError::NonNumericColumn("mode".to_string())
    );
}

#[test]
fn test_timestamp_column_rejected() {
    let ds = downsample(&synthetic::flight(5, 1000), 1.0).unwrap();
    assert_eq!(
        project(&ds, TimeAxis::Elapsed, &names(&["date"]), true).unwrap_err(),
        InvalidParameterError::NonNumericColumn("date".to_string())
    );
}

#[test]
fn test_unknown_column_rejected() {
    let ds = downsample(&synthetic::flight(5, 1000), 1.0).unwrap();
    assert_eq!(
        project(&ds, TimeAxis::Elapsed, &names(&["pitch"]), true).unwrap_err(),
        InvalidParameterError::UnknownColumn("pitch".to_string())
    );
}
