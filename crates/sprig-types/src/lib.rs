//! Foundation types for Sprig.
//!
//! Every other Sprig crate depends on `sprig-types`. It is deliberately tiny:
//! the only shared vocabulary between the store, the index, the commit chain
//! and the diff engine is the digest that names an object.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Content-addressed identifier (SHA-1 digest of raw bytes)
//! - [`TypeError`] -- Parse failures for textual digests

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
