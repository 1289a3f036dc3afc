//! Diff engine for Sprig.
//!
//! Computes line-level differences between two versions of a file and the
//! per-file change report for a commit against its parent. Diffing is purely
//! presentational: nothing here writes to the store.
//!
//! # Key Types
//!
//! - [`diff_lines`] / [`DiffSegment`] / [`SegmentKind`] -- LCS line diff
//! - [`BlobDiff`] -- Diff of two raw blobs, with binary detection
//! - [`CommitDiff`] / [`FileReport`] / [`FileChange`] -- What a commit changed

pub mod blob_diff;
pub mod commit_diff;
pub mod error;
pub mod lines;

pub use blob_diff::{diff_blobs, BlobDiff};
pub use commit_diff::{show_commit, CommitDiff, FileChange, FileReport};
pub use error::{DiffError, DiffResult};
pub use lines::{diff_lines, split_lines, DiffSegment, SegmentKind};
