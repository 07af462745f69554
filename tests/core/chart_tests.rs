//! Tests for chart assembly
//!
//! Tests cover:
//! - Layout metadata per display mode
//! - One trace per selected column
//! - Hover readouts showing raw values
//! - JSON output

use flightlog::chart::{
    CHART_TITLE, DEFAULT_HEIGHT, DEFAULT_WIDTH, HOVER_MODE, NORMALIZED_Y_LABEL, RAW_Y_LABEL,
};
use flightlog::parsers::{FlightCsv, Parseable};
use flightlog::pipeline::{recompute, TimeAxis, ViewParams};

use crate::common::assertions::{assert_no_infinite, assert_normalized_range};
use crate::common::synthetic;

fn params(columns: &[&str], normalize: bool) -> ViewParams {
    ViewParams {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        normalize,
        ..ViewParams::default()
    }
}

// ============================================
// Layout Tests
// ============================================

#[test]
fn test_normalized_layout() {
    let chart = recompute(&synthetic::flight(10, 1000), &params(&["altitude"], true)).unwrap();
    assert_eq!(chart.layout.title, CHART_TITLE);
    assert_eq!(chart.layout.y_axis_title, NORMALIZED_Y_LABEL);
    assert_eq!(chart.layout.x_axis_title, "elapsed_sec");
    assert_eq!(chart.layout.hover_mode, HOVER_MODE);
    assert_eq!(
        (chart.layout.width, chart.layout.height),
        (DEFAULT_WIDTH, DEFAULT_HEIGHT)
    );
}

#[test]
fn test_raw_layout_on_absolute_axis() {
    let p = ViewParams {
        x_axis: TimeAxis::Absolute,
        ..params(&["altitude"], false)
    };
    let chart = recompute(&synthetic::flight(10, 1000), &p).unwrap();
    assert_eq!(chart.layout.y_axis_title, RAW_Y_LABEL);
    assert_eq!(chart.layout.x_axis_title, "date");
}

#[test]
fn test_absolute_axis_titled_with_timestamp_column() {
    let parser = FlightCsv {
        timestamp_column: "gps_time".to_string(),
        ..FlightCsv::default()
    };
    let table = parser
        .parse("gps_time,alt\n2024-05-01_12:00:00,1\n2024-05-01_12:00:01,2\n")
        .unwrap();
    let p = ViewParams {
        x_axis: TimeAxis::Absolute,
        ..params(&["alt"], false)
    };
    let chart = recompute(&table, &p).unwrap();
    assert_eq!(chart.layout.x_axis_title, "gps_time");

    let elapsed = recompute(&table, &params(&["alt"], false)).unwrap();
    assert_eq!(elapsed.layout.x_axis_title, "elapsed_sec");
}

// ============================================
// Trace Tests
// ============================================

#[test]
fn test_one_trace_per_column() {
    let chart = recompute(
        &synthetic::flight(30, 200),
        &params(&["altitude", "speed"], true),
    )
    .unwrap();
    assert_eq!(chart.traces.len(), 2);
    assert_eq!(chart.traces[0].name, "altitude");
    assert_eq!(chart.traces[1].name, "speed");
    assert!(chart.traces.iter().all(|t| t.mode == "lines+markers"));
    assert_normalized_range(&chart);
    assert_no_infinite(&chart);
}

#[test]
fn test_traces_share_x_values() {
    let chart = recompute(
        &synthetic::flight(30, 200),
        &params(&["altitude", "speed"], false),
    )
    .unwrap();
    let xs = |i: usize| -> Vec<f64> { chart.traces[i].points.iter().map(|p| p.x).collect() };
    assert_eq!(xs(0), xs(1));
}

#[test]
fn test_empty_selection_has_no_traces() {
    let chart = recompute(&synthetic::flight(5, 1000), &params(&[], true)).unwrap();
    assert!(chart.traces.is_empty());
    assert!(chart.is_empty());
}

// ============================================
// Hover Tests
// ============================================

#[test]
fn test_constant_series_hover_shows_raw() {
    let table = synthetic::single_column("v", &[0, 1000, 2000], &[7.0, 7.0, 7.0]);
    let chart = recompute(&table, &params(&["v"], true)).unwrap();

    let ys: Vec<f64> = chart.traces[0].points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![0.0, 0.0, 0.0]);

    let readout = chart.hover_readout(1.0).unwrap();
    assert_eq!(readout.lines, vec!["v: 7.000"]);
}

#[test]
fn test_hover_readout_on_absolute_axis() {
    let table = synthetic::single_column("v", &[0, 1000], &[1.25, 2.5]);
    let p = ViewParams {
        x_axis: TimeAxis::Absolute,
        ..params(&["v"], false)
    };
    let chart = recompute(&table, &p).unwrap();
    let x = chart.traces[0].points[1].x;

    let readout = chart.hover_readout(x + 0.2).unwrap();
    assert_eq!(readout.header, "2024-05-01 12:00:01");
    assert_eq!(readout.lines, vec!["v: 2.500"]);
}

#[test]
fn test_hover_template_is_per_column() {
    let chart = recompute(&synthetic::flight(5, 1000), &params(&["speed"], true)).unwrap();
    assert_eq!(
        chart.traces[0].hover_template,
        "%{x}<br>speed: %{raw:.3f}<extra></extra>"
    );
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_chart_serializes_to_json() {
    let chart = recompute(&synthetic::flight(3, 1000), &params(&["altitude"], true)).unwrap();
    let json: serde_json::Value = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["layout"]["title"], CHART_TITLE);
    assert_eq!(json["x_axis"], "elapsed");
    assert_eq!(json["traces"][0]["name"], "altitude");
    assert_eq!(json["traces"][0]["points"][2]["raw"], 105.0);
    assert_eq!(json["traces"][0]["points"][2]["y"], 1.0);
    assert!(json["traces"][0]["hover_template"]
        .as_str()
        .unwrap()
        .contains("%{raw:.3f}"));
}
