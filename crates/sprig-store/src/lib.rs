//! Content-addressed object storage for Sprig.
//!
//! This crate implements a hash-keyed object store analogous to git's
//! `.git/objects/` directory, minus compression and fan-out. Every piece of
//! data Sprig persists as an object (file contents and serialized commits)
//! lives in one flat namespace keyed by the SHA-1 digest of its bytes.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] -- one file per object under `objects/`
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writing an object that already exists is a no-op.
//! 3. Nothing is ever deleted; the store is append-only.
//! 4. The store never interprets object contents -- it is a pure key-value store.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use traits::{hash, ObjectStore};
