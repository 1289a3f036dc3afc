//! Error types for the index crate.

use std::path::PathBuf;

/// Errors that can occur during index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The index file does not exist (repository not initialized).
    #[error("index file missing: {}", .0.display())]
    Missing(PathBuf),

    /// The index file exists but does not decode as a list of entries.
    #[error("corrupt index: {0}")]
    Corrupt(String),

    /// An invalid path was provided.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// I/O error while reading or writing the index file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
