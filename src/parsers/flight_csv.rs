//! Flight telemetry CSV parser.
//!
//! The input is a comma-separated table with a header row. One column holds
//! the sample timestamp (by default `date`, formatted `YYYY-MM-DD_HH:MM:SS`);
//! every other column is either numeric or free text. Column types are
//! inferred the way a dataframe loader would: a column is numeric when every
//! non-empty cell parses as a number, and empty numeric cells become NaN.
//! Text columns are kept in the table but are never offered for plotting.

use csv::StringRecord;
use rayon::prelude::*;

use super::types::{Column, ParseError, Parseable, Table};
use crate::config::ExplorerConfig;
use crate::pipeline::timebase;

/// Default name of the timestamp column
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "date";

/// Default timestamp format (`2024-05-01_12:00:00`)
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

/// Flight CSV parser
#[derive(Clone, Debug)]
pub struct FlightCsv {
    pub timestamp_column: String,
    pub timestamp_format: String,
    /// Columns that must be numeric. A malformed cell in one of these is a
    /// parse error instead of demoting the column to text.
    pub numeric_columns: Vec<String>,
}

impl Default for FlightCsv {
    fn default() -> Self {
        Self {
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            numeric_columns: Vec::new(),
        }
    }
}

/// Cell `index` of `record`, empty when the row is short
fn cell_at(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

impl FlightCsv {
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            timestamp_column: config.timestamp_column.clone(),
            timestamp_format: config.timestamp_format.clone(),
            numeric_columns: config.numeric_columns.clone(),
        }
    }

    /// Parse one cell as a number. Empty cells are missing values (NaN).
    fn parse_numeric(cell: &str) -> Option<f64> {
        if cell.is_empty() {
            return Some(f64::NAN);
        }
        cell.parse::<f64>().ok()
    }

    /// Infer the type of one column and collect its values
    fn infer_column(
        &self,
        name: &str,
        index: usize,
        records: &[StringRecord],
    ) -> Result<Column, ParseError> {
        let mut values = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            match Self::parse_numeric(cell_at(record, index)) {
                Some(v) => values.push(v),
                None => {
                    if self.numeric_columns.iter().any(|c| c == name) {
                        return Err(ParseError::NumericCell {
                            row,
                            column: name.to_string(),
                            value: cell_at(record, index).to_string(),
                        });
                    }
                    if row > 0 {
                        tracing::warn!(
                            "Column '{}' has non-numeric value '{}' at row {}, treating as text",
                            name,
                            cell_at(record, index),
                            row
                        );
                    }
                    let text = records.iter().map(|r| cell_at(r, index).to_string()).collect();
                    return Ok(Column::text(name, text));
                }
            }
        }

        Ok(Column::numeric(name, values))
    }
}

impl Parseable for FlightCsv {
    fn parse(&self, file_contents: &str) -> Result<Table, ParseError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file_contents.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let timestamp_index = headers
            .iter()
            .position(|h| *h == self.timestamp_column)
            .ok_or_else(|| ParseError::MissingTimestampColumn(self.timestamp_column.clone()))?;

        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        if records.is_empty() {
            return Err(ParseError::Empty);
        }

        let timestamps = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let value = record.get(timestamp_index).unwrap_or("");
                timebase::parse_timestamp(value, &self.timestamp_format).ok_or_else(|| {
                    ParseError::Timestamp {
                        row,
                        value: value.to_string(),
                        format: self.timestamp_format.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Columns are independent, so type inference runs in parallel
        let columns = headers
            .par_iter()
            .enumerate()
            .filter(|(i, _)| *i != timestamp_index)
            .map(|(i, name)| self.infer_column(name, i, &records))
            .collect::<Result<Vec<_>, _>>()?;

        let table =
            Table::with_timestamp_position(&self.timestamp_column, timestamp_index, timestamps, columns)?;

        tracing::info!(
            "Parsed flight log: {} rows, {} columns ({} plottable)",
            table.len(),
            table.columns().len(),
            table.plottable_columns().len()
        );

        Ok(table)
    }
}
