use sprig_types::ObjectId;

/// Errors produced by commit chain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// No object is stored under the given digest.
    #[error("commit not found: {0}")]
    NotFound(ObjectId),

    /// The stored bytes do not decode as a commit record.
    #[error("corrupt commit {id}: {reason}")]
    Corrupt { id: ObjectId, reason: String },

    /// A commit record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Store(#[from] sprig_store::StoreError),

    #[error("head error: {0}")]
    Head(#[from] sprig_refs::RefError),
}

/// Result alias for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
