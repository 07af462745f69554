use thiserror::Error;

use crate::parsers::types::ParseError;
use crate::pipeline::InvalidParameterError;
use crate::source::LoadError;

/// Any failure between acquiring the file and producing a chart
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),
}

impl ExplorerError {
    /// Load and parse failures end the session's data; a rejected parameter
    /// only rejects that one interaction.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExplorerError::InvalidParameter(_))
    }
}

pub type Result<T, E = ExplorerError> = std::result::Result<T, E>;
