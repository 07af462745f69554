pub mod flight_csv;
pub mod types;

pub use flight_csv::FlightCsv;
pub use types::{Column, ColumnData, ColumnKind, ParseError, Parseable, Table};
