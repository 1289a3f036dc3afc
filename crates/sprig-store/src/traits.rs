use sprig_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// Compute the content-addressed ID for a byte string.
///
/// Pure and deterministic: this is the digest every backend stores `content`
/// under.
pub fn hash(content: &[u8]) -> ObjectId {
    ObjectId::from_bytes(content)
}

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. Content-addressing guarantees this:
///   the same data always produces the same ID.
/// - `put` of already-present content is a no-op that returns the same ID.
/// - Blobs and serialized commits share one namespace; the store never looks
///   inside the bytes.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>>;

    /// Store `content` and return its content-addressed ID.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    fn put(&self, content: &[u8]) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object that must exist.
    ///
    /// Fails with [`StoreError::NotFound`] if nothing is stored under `id`.
    fn get(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }

    /// Like [`get`](ObjectStore::get), but also re-hashes the bytes and fails
    /// with [`StoreError::HashMismatch`] if they no longer match `id`.
    fn get_verified(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        let data = self.get(id)?;
        let computed = hash(&data);
        if computed != *id {
            return Err(StoreError::HashMismatch { id: *id, computed });
        }
        Ok(data)
    }
}
