use std::path::PathBuf;

use sprig_chain::ChainError;
use sprig_diff::DiffError;
use sprig_index::IndexError;
use sprig_refs::RefError;
use sprig_store::StoreError;
use sprig_types::ObjectId;
use thiserror::Error;

/// Failures reported by repository operations.
///
/// Lower-layer errors are folded into these user-facing categories rather
/// than wrapped, so callers only have one taxonomy to match on.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not a sprig repository ({} is missing); run `sprig init` first", .0.display())]
    NotInitialized(PathBuf),

    #[error("no such file: {}", .0.display())]
    SourceFileNotFound(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The index, HEAD, or a stored commit failed to decode or verify.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    #[error("ambiguous revision {prefix:?}: matches {count} commits")]
    AmbiguousRevision { prefix: String, count: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type SdkResult<T> = Result<T, SdkError>;

impl From<StoreError> for SdkError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => SdkError::ObjectNotFound(id),
            StoreError::HashMismatch { id, computed } => {
                SdkError::CorruptRecord(format!("object {id} hashes to {computed}"))
            }
            StoreError::MissingDirectory(dir) => SdkError::NotInitialized(dir),
            StoreError::Poisoned => SdkError::Internal("object store lock poisoned".into()),
            StoreError::Io(io) => SdkError::Io(io),
        }
    }
}

impl From<IndexError> for SdkError {
    fn from(e: IndexError) -> Self {
        match e {
            IndexError::Missing(path) => SdkError::NotInitialized(path),
            IndexError::Corrupt(reason) => SdkError::CorruptRecord(format!("index: {reason}")),
            IndexError::InvalidPath(path) => SdkError::InvalidPath(path),
            IndexError::Io(io) => SdkError::Io(io),
        }
    }
}

impl From<RefError> for SdkError {
    fn from(e: RefError) -> Self {
        match e {
            RefError::Missing(path) => SdkError::NotInitialized(path),
            RefError::Corrupt(reason) => SdkError::CorruptRecord(format!("HEAD: {reason}")),
            RefError::Poisoned => SdkError::Internal("HEAD lock poisoned".into()),
            RefError::Io(io) => SdkError::Io(io),
        }
    }
}

impl From<ChainError> for SdkError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::NotFound(id) => SdkError::ObjectNotFound(id),
            ChainError::Corrupt { id, reason } => {
                SdkError::CorruptRecord(format!("commit {id}: {reason}"))
            }
            ChainError::Serialization(reason) => SdkError::Internal(reason),
            ChainError::Store(e) => e.into(),
            ChainError::Head(e) => e.into(),
        }
    }
}

impl From<DiffError> for SdkError {
    fn from(e: DiffError) -> Self {
        match e {
            DiffError::ObjectNotFound(id) => SdkError::ObjectNotFound(id),
            DiffError::Chain(e) => e.into(),
            DiffError::Store(e) => e.into(),
        }
    }
}
