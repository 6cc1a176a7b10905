//! Common error types for fdrk

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for fdrk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the form entry and ranking view services
#[derive(Error, Debug)]
pub enum Error {
    /// Score or remark rejected before any table was touched
    #[error("Validation error: {0}")]
    Validation(String),

    /// Selected image path does not exist or is not a readable file
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// Submission table exists but could not be read or written
    #[error("Record store unavailable ({}): {reason}", path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// Copying an image into the managed directory failed
    #[error("Failed to archive image to {}: {source}", target.display())]
    ArchiveWrite {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ranked table is missing or unreadable
    #[error("Ranking unavailable ({}): {reason}", path.display())]
    RankingUnavailable { path: PathBuf, reason: String },

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn store(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::StoreUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn ranking(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::RankingUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
