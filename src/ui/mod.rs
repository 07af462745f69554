//! UI rendering modules for the flight explorer.
//!
//! - `controls` - Title bar and the column, normalize, filter, axis and bin controls
//! - `chart` - Chart rendering with the unified hover readout
//! - `toast` - Toast notification system

pub mod chart;
pub mod controls;
pub mod toast;
