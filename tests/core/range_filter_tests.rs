//! Tests for time-window filtering
//!
//! Tests cover:
//! - Inclusive bounds on both axes
//! - Clamping to the observed range
//! - Windows entirely outside the data
//! - Rejected windows

use flightlog::pipeline::range_filter::filter_rows;
use flightlog::pipeline::{InvalidParameterError, TimeFilter, TimeWindow};

use crate::common::synthetic;

// ============================================
// Elapsed Window Tests
// ============================================

#[test]
fn test_elapsed_window_keeps_bounds() {
    let table = synthetic::flight(11, 1000);
    let window = TimeWindow::elapsed(2.0, 5.0, &table).unwrap();
    let filtered = filter_rows(&table, Some(&window));
    assert_eq!(filtered.elapsed_sec(), &[2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_elapsed_window_single_instant() {
    let table = synthetic::flight(5, 1000);
    let window = TimeWindow::elapsed(3.0, 3.0, &table).unwrap();
    assert_eq!(filter_rows(&table, Some(&window)).len(), 1);
}

#[test]
fn test_full_range_keeps_everything() {
    let table = synthetic::flight(20, 500);
    let window = TimeWindow::elapsed(0.0, 9.5, &table).unwrap();
    assert_eq!(filter_rows(&table, Some(&window)).len(), 20);
}

#[test]
fn test_window_above_max_is_empty() {
    let table = synthetic::flight(5, 1000);
    let window = TimeWindow::elapsed(100.0, 200.0, &table).unwrap();
    assert!(window.is_empty());
    assert!(filter_rows(&table, Some(&window)).is_empty());
}

#[test]
fn test_window_below_min_is_empty() {
    let table = synthetic::flight(5, 1000);
    let window = TimeWindow::elapsed(-20.0, -10.0, &table).unwrap();
    assert!(filter_rows(&table, Some(&window)).is_empty());
}

#[test]
fn test_filter_keeps_text_columns_aligned() {
    let table = synthetic::flight(6, 1000);
    let window = TimeWindow::elapsed(1.0, 2.0, &table).unwrap();
    let filtered = filter_rows(&table, Some(&window));
    assert_eq!(filtered.column("mode").unwrap().data.len(), 2);
}

// ============================================
// Absolute Window Tests
// ============================================

#[test]
fn test_absolute_window() {
    let table = synthetic::flight(10, 1000);
    let window =
        TimeWindow::absolute(synthetic::at_ms(3000), synthetic::at_ms(6000), &table).unwrap();
    let filtered = filter_rows(&table, Some(&window));
    assert_eq!(filtered.elapsed_sec(), &[3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_absolute_and_elapsed_agree() {
    let table = synthetic::flight(10, 1000);
    let by_elapsed = TimeWindow::elapsed(2.0, 7.0, &table).unwrap();
    let by_absolute =
        TimeWindow::absolute(synthetic::at_ms(2000), synthetic::at_ms(7000), &table).unwrap();
    assert_eq!(
        filter_rows(&table, Some(&by_elapsed)).into_owned(),
        filter_rows(&table, Some(&by_absolute)).into_owned()
    );
}

// ============================================
// Validation Tests
// ============================================

#[test]
fn test_reversed_window_is_rejected() {
    let table = synthetic::flight(5, 1000);
    let result = TimeFilter::Elapsed { lo: 3.0, hi: 1.0 }.window(&table);
    assert!(matches!(
        result,
        Err(InvalidParameterError::ReversedWindow { .. })
    ));
}

#[test]
fn test_infinite_bound_is_rejected() {
    let table = synthetic::flight(5, 1000);
    let result = TimeFilter::Elapsed {
        lo: 0.0,
        hi: f64::INFINITY,
    }
    .window(&table);
    assert_eq!(result, Err(InvalidParameterError::NonFiniteBound));
}
