//! Error types for the diff crate.

use sprig_types::ObjectId;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A blob referenced by a commit was not found in the store.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// Loading a commit failed.
    #[error(transparent)]
    Chain(#[from] sprig_chain::ChainError),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] sprig_store::StoreError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
