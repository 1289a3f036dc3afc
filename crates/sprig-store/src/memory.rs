use std::collections::HashMap;
use std::sync::RwLock;

use sprig_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::traits::{hash, ObjectStore};

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All objects are held in memory behind a
/// `RwLock`. Objects are cloned on read/write.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.objects.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Return a sorted list of all object IDs in the store.
    pub fn all_ids(&self) -> StoreResult<Vec<ObjectId>> {
        let map = self.objects.read().map_err(|_| StoreError::Poisoned)?;
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    /// Overwrite the bytes stored under `id` without re-hashing.
    #[cfg(test)]
    pub(crate) fn insert_raw(&self, id: ObjectId, data: Vec<u8>) -> StoreResult<()> {
        self.objects
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(id, data);
        Ok(())
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let map = self.objects.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn put(&self, content: &[u8]) -> StoreResult<ObjectId> {
        let id = hash(content);
        let mut map = self.objects.write().map_err(|_| StoreError::Poisoned)?;
        map.entry(id).or_insert_with(|| content.to_vec());
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}
