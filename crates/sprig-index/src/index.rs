//! The in-memory staging area.
//!
//! [`StagingIndex`] is a plain ordered `Vec<StagingEntry>`. Insertion order
//! is preserved exactly because it becomes the `files` order of the next
//! commit. All operations are in-memory; persistence is [`IndexFile`]'s job.
//!
//! [`IndexFile`]: crate::IndexFile

use sprig_types::ObjectId;

use crate::entry::StagingEntry;
use crate::error::{IndexError, IndexResult};

/// The staging index: files queued for the next commit, in staging order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StagingIndex {
    entries: Vec<StagingEntry>,
}

impl StagingIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from already-ordered entries.
    pub fn from_entries(entries: Vec<StagingEntry>) -> Self {
        Self { entries }
    }

    /// Number of entries in the index (duplicates included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in staging order.
    pub fn entries(&self) -> &[StagingEntry] {
        &self.entries
    }

    /// Consume the index, yielding its entries in staging order.
    pub fn into_entries(self) -> Vec<StagingEntry> {
        self.entries
    }

    /// Append `{path, hash}` to the end of the index.
    ///
    /// Staging a path that is already present adds a second entry rather than
    /// replacing the first.
    pub fn stage(&mut self, path: impl Into<String>, hash: ObjectId) -> IndexResult<()> {
        let path = path.into();
        if path.is_empty() {
            return Err(IndexError::InvalidPath("empty path".to_string()));
        }
        self.entries.push(StagingEntry { path, hash });
        Ok(())
    }

    /// The most recently staged entry for `path`, if any.
    pub fn latest(&self, path: &str) -> Option<&StagingEntry> {
        self.entries.iter().rev().find(|e| e.path == path)
    }

    /// Returns `true` if `path` has been staged at least once.
    pub fn contains(&self, path: &str) -> bool {
        self.latest(path).is_some()
    }

    /// Encode as the on-disk JSON array.
    pub fn to_json(&self) -> IndexResult<Vec<u8>> {
        serde_json::to_vec(&self.entries).map_err(|e| IndexError::Corrupt(e.to_string()))
    }

    /// Decode from the on-disk JSON array.
    pub fn from_json(data: &[u8]) -> IndexResult<Self> {
        let entries: Vec<StagingEntry> =
            serde_json::from_slice(data).map_err(|e| IndexError::Corrupt(e.to_string()))?;
        Ok(Self { entries })
    }
}
