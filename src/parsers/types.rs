use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::pipeline::timebase;

/// Errors raised while turning raw file contents into a [`Table`]
#[derive(Debug, Error)]
pub enum ParseError {
    /// Structural CSV problem (bad quoting, ragged rows, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The configured timestamp column is not in the header
    #[error("Timestamp column '{0}' not found in header")]
    MissingTimestampColumn(String),

    /// A timestamp cell does not match the configured format
    #[error("Row {row}: timestamp '{value}' does not match format '{format}'")]
    Timestamp {
        row: usize,
        value: String,
        format: String,
    },

    /// A cell in a column declared numeric could not be parsed
    #[error("Row {row}: column '{column}' has non-numeric value '{value}'")]
    NumericCell {
        row: usize,
        column: String,
        value: String,
    },

    /// A column's length disagrees with the timestamp column
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// The file has a header but no data rows
    #[error("File contains no data rows")]
    Empty,
}

/// Kind of a column in the table schema
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Timestamp,
    Numeric,
    Text,
}

/// Column storage. Missing numeric cells are stored as NaN.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Text(_) => ColumnKind::Text,
        }
    }

    fn take(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Text(v) => ColumnData::Text(rows.iter().map(|&r| v[r].clone()).collect()),
        }
    }
}

/// A named non-timestamp column
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }
}

/// A loaded flight table.
///
/// Rows are kept in input order. `elapsed_sec` is derived once at
/// construction and is never re-sorted, so it can go negative when the
/// input is not chronological.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    timestamp_column: String,
    /// Position of the timestamp column in the original header
    timestamp_position: usize,
    timestamps: Vec<NaiveDateTime>,
    elapsed_sec: Vec<f64>,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from parsed columns, deriving `elapsed_sec`.
    /// The timestamp column is placed first in the schema.
    pub fn new(
        timestamp_column: impl Into<String>,
        timestamps: Vec<NaiveDateTime>,
        columns: Vec<Column>,
    ) -> Result<Self, ParseError> {
        Self::with_timestamp_position(timestamp_column, 0, timestamps, columns)
    }

    pub(crate) fn with_timestamp_position(
        timestamp_column: impl Into<String>,
        timestamp_position: usize,
        timestamps: Vec<NaiveDateTime>,
        columns: Vec<Column>,
    ) -> Result<Self, ParseError> {
        for column in &columns {
            if column.data.len() != timestamps.len() {
                return Err(ParseError::ColumnLength {
                    column: column.name.clone(),
                    expected: timestamps.len(),
                    found: column.data.len(),
                });
            }
        }

        let elapsed_sec = timebase::elapsed_seconds(&timestamps);

        Ok(Self {
            timestamp_column: timestamp_column.into(),
            timestamp_position: timestamp_position.min(columns.len()),
            timestamps,
            elapsed_sec,
            columns,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamp_column(&self) -> &str {
        &self.timestamp_column
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn elapsed_sec(&self) -> &[f64] {
        &self.elapsed_sec
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Full schema in header order, including the timestamp column
    pub fn schema(&self) -> Vec<(&str, ColumnKind)> {
        let mut schema: Vec<(&str, ColumnKind)> = self
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.data.kind()))
            .collect();
        schema.insert(
            self.timestamp_position,
            (self.timestamp_column.as_str(), ColumnKind::Timestamp),
        );
        schema
    }

    /// Names of columns that can be plotted (numeric, not the timestamp)
    pub fn plottable_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.data.kind() == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric values for a column, or None if absent or textual
    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Numeric(values)) => Some(values),
            _ => None,
        }
    }

    /// Observed (min, max) of `elapsed_sec`
    pub fn elapsed_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.elapsed_sec.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Chronological (min, max) timestamp
    pub fn timestamp_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.timestamps.iter().min()?;
        let max = self.timestamps.iter().max()?;
        Some((*min, *max))
    }

    /// Select rows by index, in the order given.
    ///
    /// Derived `elapsed_sec` values are carried over, not recomputed, so a
    /// subset keeps the time origin of the full table.
    pub fn take(&self, rows: &[usize]) -> Table {
        Table {
            timestamp_column: self.timestamp_column.clone(),
            timestamp_position: self.timestamp_position,
            timestamps: rows.iter().map(|&r| self.timestamps[r]).collect(),
            elapsed_sec: rows.iter().map(|&r| self.elapsed_sec[r]).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.take(rows),
                })
                .collect(),
        }
    }
}

/// Trait for flight log parsers
pub trait Parseable {
    fn parse(&self, data: &str) -> Result<Table, ParseError>;
}
