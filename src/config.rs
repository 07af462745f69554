//! Explorer configuration.
//!
//! Read once at startup from a JSON file in the platform config directory.
//! Missing or unreadable files fall back to defaults. Nothing is ever written
//! back: user selections live only for the session.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parsers::flight_csv::{DEFAULT_TIMESTAMP_COLUMN, DEFAULT_TIMESTAMP_FORMAT};

/// Default local cache of the flight table
pub const DEFAULT_DATA_PATH: &str = "allData.csv";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Local copy of the flight table
    pub data_path: PathBuf,
    /// Where to fetch the table from when the local copy is missing
    pub remote_url: Option<String>,
    pub timestamp_column: String,
    /// `strftime`-style format of the timestamp column
    pub timestamp_format: String,
    /// Initial downsampling bin width, seconds
    pub default_bin_size: f64,
    pub default_normalize: bool,
    /// Columns that must parse as numbers
    pub numeric_columns: Vec<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            remote_url: None,
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            default_bin_size: 1.0,
            default_normalize: true,
            numeric_columns: Vec::new(),
        }
    }
}

impl ExplorerConfig {
    /// Get the config directory path for the explorer
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("FlightLog"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("FlightLog"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("flightlog"))
        }
    }

    /// Get the path to the config JSON file
    pub fn get_config_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Could not read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
