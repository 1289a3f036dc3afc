//! The [`HeadStore`] trait defining the head pointer interface.

use sprig_types::ObjectId;

use crate::error::Result;

/// Storage backend for the head pointer.
///
/// There are no concurrent writers: callers guarantee at most one operation
/// runs against a repository at a time.
pub trait HeadStore: Send + Sync {
    /// Read the current head.
    ///
    /// Returns `Ok(None)` if no commit has been made yet.
    fn read_head(&self) -> Result<Option<ObjectId>>;

    /// Point head at `id`.
    fn write_head(&self, id: &ObjectId) -> Result<()>;
}
