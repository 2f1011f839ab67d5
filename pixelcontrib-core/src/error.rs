//! Error types shared by the contribution map store, codec and interpolators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContribError {
    #[error("Invalid contribution map data: {0}")]
    Format(String),

    #[error("Unsupported contribution map version {0}")]
    UnsupportedVersion(u32),

    #[error("Truncated data: {needed} bytes needed at offset {offset}, {available} available")]
    TruncatedData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("{what} {index} out of range (limit {limit})")]
    Range {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    #[error("Invalid interpolator configuration: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write contribution maps: {0}")]
    Io(#[from] std::io::Error),
}

impl ContribError {
    /// Shorthand for a [`ContribError::Range`] error.
    pub fn range(what: &'static str, index: usize, limit: usize) -> Self {
        Self::Range { what, index, limit }
    }
}

pub type Result<T> = std::result::Result<T, ContribError>;
