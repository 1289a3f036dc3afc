//! Error types for head operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or moving HEAD.
#[derive(Debug, Error)]
pub enum RefError {
    /// The HEAD file does not exist (repository not initialized).
    #[error("HEAD missing: {}", .0.display())]
    Missing(PathBuf),

    /// HEAD holds something other than a digest or nothing.
    #[error("corrupt HEAD: {0}")]
    Corrupt(String),

    /// An in-memory backend lock was poisoned.
    #[error("HEAD lock poisoned")]
    Poisoned,

    /// I/O error during file-based operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for head operations.
pub type Result<T> = std::result::Result<T, RefError>;
