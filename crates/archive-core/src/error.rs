//! Error types for the campaign archive

use thiserror::Error;

/// Main error type for the campaign archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArchiveError {
    /// Whether this error is a failed lookup rather than a storage fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
