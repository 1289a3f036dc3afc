//! Filesystem-backed object store.
//!
//! Objects live in a single flat directory; each file is named by the
//! 40-character hex digest of its contents and holds the raw bytes verbatim.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sprig_types::ObjectId;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{hash, ObjectStore};

/// An [`ObjectStore`] rooted at an `objects/` directory.
#[derive(Clone, Debug)]
pub struct FsObjectStore {
    dir: PathBuf,
}

impl FsObjectStore {
    /// Open a store over an existing objects directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(StoreError::MissingDirectory(dir));
        }
        Ok(Self { dir })
    }

    /// Create the objects directory (if absent) and open a store over it.
    pub fn create(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory objects are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file that holds (or would hold) `id`.
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.dir.join(id.to_hex())
    }

    /// Return a sorted list of all object IDs in the store.
    ///
    /// Files whose names are not valid digests (stray temp files, editor
    /// backups) are skipped.
    pub fn all_ids(&self) -> StoreResult<Vec<ObjectId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            match name.to_str().map(ObjectId::from_hex) {
                Some(Ok(id)) => ids.push(id),
                _ => debug!(name = ?name, "skipping non-object file"),
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.object_path(id)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn put(&self, content: &[u8]) -> StoreResult<ObjectId> {
        let id = hash(content);
        let path = self.object_path(&id);
        if path.exists() {
            debug!(id = %id.short_hex(), "object already present");
            return Ok(id);
        }

        // A truncated object must never appear under a valid digest.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(id = %id.short_hex(), len = content.len(), "object written");
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FsObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::create(dir.path().join("objects")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsObjectStore::open(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, StoreError::MissingDirectory(_)));
    }

    #[test]
    fn put_writes_file_named_by_digest() {
        let (_dir, store) = temp_store();
        let id = store.put(b"hello").unwrap();

        assert_eq!(id.to_hex(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
        let path = store.dir().join("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
        assert_eq!(fs::read(path).unwrap(), b"hello");
    }

    #[test]
    fn get_roundtrip() {
        let (_dir, store) = temp_store();
        let id = store.put(b"some bytes\n\x00\xff").unwrap();
        assert_eq!(store.get(&id).unwrap(), b"some bytes\n\x00\xff");
        assert!(store.exists(&id).unwrap());
    }

    #[test]
    fn put_twice_leaves_single_object() {
        let (_dir, store) = temp_store();
        let id1 = store.put(b"dup").unwrap();
        let id2 = store.put(b"dup").unwrap();
        assert_eq!(id1, id2);
        assert_eq!(store.all_ids().unwrap(), vec![id1]);
    }

    #[test]
    fn missing_object_is_not_found() {
        let (_dir, store) = temp_store();
        let id = ObjectId::from_bytes(b"absent");
        assert!(store.read(&id).unwrap().is_none());
        assert!(matches!(store.get(&id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn all_ids_skips_stray_files() {
        let (_dir, store) = temp_store();
        let id = store.put(b"real").unwrap();
        fs::write(store.dir().join("README"), b"not an object").unwrap();

        assert_eq!(store.all_ids().unwrap(), vec![id]);
    }

    #[test]
    fn get_verified_detects_corruption() {
        let (_dir, store) = temp_store();
        let id = store.put(b"pristine").unwrap();
        fs::write(store.object_path(&id), b"bit rot").unwrap();

        let err = store.get_verified(&id).unwrap_err();
        assert!(matches!(err, StoreError::HashMismatch { .. }));
    }

    #[test]
    fn reopen_sees_previous_objects() {
        let (dir, store) = temp_store();
        let id = store.put(b"persisted").unwrap();
        drop(store);

        let reopened = FsObjectStore::open(dir.path().join("objects")).unwrap();
        assert_eq!(reopened.get(&id).unwrap(), b"persisted");
    }
}
