use std::path::PathBuf;

use sprig_types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch for {id}: stored bytes hash to {computed}")]
    HashMismatch { id: ObjectId, computed: ObjectId },

    /// The objects directory does not exist.
    #[error("objects directory missing: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// An in-memory backend lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
