//! Acquisition of the flight table.
//!
//! The table is read from a local file. When that file does not exist and a
//! remote URL is configured, the file is downloaded first and persisted
//! locally so later sessions read the cached copy.
//! This is blocking - run it on a background thread from the UI.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::parsers::types::{Parseable, Table};

const USER_AGENT: &str = concat!("flightlog/", env!("CARGO_PKG_VERSION"));

/// The source table could not be obtained
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not exist and no remote URL is configured", .path.display())]
    NoSource { path: PathBuf },

    #[error("Download from {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Download from {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to save download to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the flight table comes from
#[derive(Clone, Debug, PartialEq)]
pub struct DataSource {
    pub local_path: PathBuf,
    pub remote_url: Option<String>,
}

impl DataSource {
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            local_path: config.data_path.clone(),
            remote_url: config.remote_url.clone(),
        }
    }

    /// A local file with no remote fallback
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: path.into(),
            remote_url: None,
        }
    }

    /// Make sure the local file exists, downloading it if needed
    pub fn ensure_local(&self) -> std::result::Result<&Path, LoadError> {
        if self.local_path.exists() {
            return Ok(&self.local_path);
        }

        let url = self.remote_url.as_deref().ok_or_else(|| LoadError::NoSource {
            path: self.local_path.clone(),
        })?;

        tracing::info!(
            "{} not found, downloading from {}",
            self.local_path.display(),
            url
        );
        download(url, &self.local_path)?;
        Ok(&self.local_path)
    }

    /// Read the whole table file as text
    pub fn read_to_string(&self) -> std::result::Result<String, LoadError> {
        let path = self.ensure_local()?;
        std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fetch `url` into `dest`.
///
/// The body is streamed into a sibling `.part` file which is renamed into
/// place once complete, so an interrupted download never leaves a truncated
/// table behind.
pub fn download(url: &str, dest: &Path) -> std::result::Result<(), LoadError> {
    let response = match ureq::get(url).header("User-Agent", USER_AGENT).call() {
        Ok(resp) => resp,
        Err(ureq::Error::StatusCode(status)) => {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }
        Err(e) => {
            return Err(LoadError::Network {
                url: url.to_string(),
                message: e.to_string(),
            });
        }
    };

    let persist_err = |source: std::io::Error| LoadError::Persist {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(persist_err)?;
    }

    let mut part_name = dest.as_os_str().to_owned();
    part_name.push(".part");
    let part_path = PathBuf::from(part_name);

    let mut file = File::create(&part_path).map_err(persist_err)?;
    let mut reader = response.into_body().into_reader();
    let mut buffer = [0u8; 8192];
    let mut total = 0usize;

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(n) => {
                file.write_all(&buffer[..n]).map_err(persist_err)?;
                total += n;
            }
            Err(e) => {
                let _ = std::fs::remove_file(&part_path);
                return Err(LoadError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    file.flush().map_err(persist_err)?;
    drop(file);
    std::fs::rename(&part_path, dest).map_err(persist_err)?;

    tracing::info!("Downloaded {} bytes to {}", total, dest.display());
    Ok(())
}

/// Acquire and parse the flight table
pub fn load_table(source: &DataSource, parser: &dyn Parseable) -> Result<Table> {
    let contents = source.read_to_string()?;
    let table = parser.parse(&contents)?;
    Ok(table)
}
