//! Linear commit history for Sprig.
//!
//! A commit is an immutable JSON record naming a snapshot of the staging
//! index, an author, a message, a timestamp and at most one parent. Commits
//! are stored in the same content-addressed store as blobs and identified by
//! the digest of their serialized bytes, so the chain from `HEAD` back to the
//! first commit is a singly linked list that cannot be rewritten in place.
//!
//! - [`Commit`] -- The record and its stable encoding
//! - [`CommitChain`] -- Appending commits and reading them back
//! - [`Log`] -- Lazy newest-first walk from a starting commit

pub mod chain;
pub mod commit;
pub mod error;

pub use chain::{CommitChain, Log};
pub use commit::{now_timestamp, Commit};
pub use error::{ChainError, ChainResult};
