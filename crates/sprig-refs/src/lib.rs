//! Head pointer management for Sprig.
//!
//! Sprig has exactly one reference: `HEAD`, the digest of the most recent
//! commit. It is empty until the first commit and afterwards only ever moves
//! forward, to a commit whose parent is the previous value.
//!
//! # Modules
//!
//! - [`error`] -- Error types for head operations
//! - [`traits`] -- The [`HeadStore`] trait defining the storage interface
//! - [`file`] -- [`FileHeadStore`], the `HEAD` file
//! - [`memory`] -- In-memory [`InMemoryHeadStore`] for tests

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{RefError, Result};
pub use file::FileHeadStore;
pub use memory::InMemoryHeadStore;
pub use traits::HeadStore;
