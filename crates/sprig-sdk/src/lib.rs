//! High-level SDK for Sprig.
//!
//! [`Repository`] ties the object store, staging index, head pointer, commit
//! chain and diff engine together over one on-disk layout. This is the entry
//! point the `sprig` binary and embedding applications use.

pub mod config;
pub mod error;
pub mod repository;

pub use config::RepoConfig;
pub use error::{SdkError, SdkResult};
pub use repository::{InitStatus, Repository};

// Re-export key types
pub use sprig_chain::Commit;
pub use sprig_diff::{BlobDiff, CommitDiff, DiffSegment, FileChange, FileReport, SegmentKind};
pub use sprig_index::{StagingEntry, StagingIndex};
pub use sprig_types::ObjectId;
