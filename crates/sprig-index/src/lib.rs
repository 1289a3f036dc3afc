//! Staging index for Sprig.
//!
//! The index is the ordered list of `(path, digest)` pairs accumulated by
//! `add` since the last commit. It is persisted as a JSON array and loaded
//! fully into memory for every operation.
//!
//! # Key Types
//!
//! - [`StagingEntry`] -- One staged file: its path and blob digest
//! - [`StagingIndex`] -- The in-memory, order-preserving staging area
//! - [`IndexFile`] -- Load/save of the index at its on-disk location
//!
//! Staging the same path twice appends a second entry; nothing is replaced.
//! [`StagingIndex::latest`] resolves a path to its most recent entry.

pub mod entry;
pub mod error;
pub mod file;
pub mod index;

pub use entry::StagingEntry;
pub use error::{IndexError, IndexResult};
pub use file::IndexFile;
pub use index::StagingIndex;
