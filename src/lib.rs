//! FlightLog - an interactive explorer for flight telemetry time series
//!
//! This library loads a timestamped flight table, runs it through a small
//! time-series pipeline and describes the result as a chart that the desktop
//! UI draws and the headless binary prints as JSON.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Flight CSV parsing and the in-memory [`parsers::Table`]
//! - [`pipeline`] - Elapsed time, range filtering, downsampling, projection
//! - [`chart`] - Render-ready chart description and hover readouts
//! - [`source`] - Local file access with remote download fallback
//! - [`config`] - Read-only explorer configuration
//! - [`error`] - Crate-level error type
//! - [`state`] - Loaded flight, control state and UI plumbing types
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components
//!   - `controls` - Title bar and view controls
//!   - `chart` - Chart rendering
//!   - `toast` - Toast notification system

pub mod app;
pub mod chart;
pub mod config;
pub mod error;
pub mod parsers;
pub mod pipeline;
pub mod source;
pub mod state;
pub mod ui;

pub use error::ExplorerError;
