//! Appending to and walking the commit chain.
//!
//! # Invariants
//!
//! - Every commit's `parent` is the head at the moment it was created.
//! - Head only moves after the commit object is durably stored.
//! - Walking from head terminates: each step goes to a strictly older object,
//!   and the first commit has no parent.

use sprig_index::StagingEntry;
use sprig_refs::HeadStore;
use sprig_store::ObjectStore;
use sprig_types::ObjectId;
use tracing::{debug, info};

use crate::commit::Commit;
use crate::error::ChainResult;

/// The commit chain over an object store and a head pointer.
pub struct CommitChain<'a> {
    store: &'a dyn ObjectStore,
    head: &'a dyn HeadStore,
}

impl<'a> CommitChain<'a> {
    pub fn new(store: &'a dyn ObjectStore, head: &'a dyn HeadStore) -> Self {
        Self { store, head }
    }

    /// The current head commit, or `None` before the first commit.
    pub fn head(&self) -> ChainResult<Option<ObjectId>> {
        Ok(self.head.read_head()?)
    }

    /// Record `files` as a new commit on top of head and move head to it.
    ///
    /// An empty `files` list is valid and produces an empty commit.
    pub fn commit(
        &self,
        files: Vec<StagingEntry>,
        message: &str,
        author: &str,
        timestamp: String,
    ) -> ChainResult<ObjectId> {
        let parent = self.head.read_head()?;
        let commit = Commit::new(files, parent, message, author, timestamp);

        let id = self.store.put(&commit.encode()?)?;
        self.head.write_head(&id)?;

        info!(
            id = %id.short_hex(),
            parent = ?parent.map(|p| p.short_hex()),
            files = commit.files.len(),
            "commit created"
        );
        Ok(id)
    }

    /// Load and decode the commit stored under `id`.
    pub fn get_commit(&self, id: &ObjectId) -> ChainResult<Commit> {
        Commit::load(self.store, id)
    }

    /// Walk the history newest-first starting at the current head.
    pub fn log(&self) -> ChainResult<Log<'a>> {
        Ok(self.log_from(self.head()?))
    }

    /// Walk the history newest-first starting at `start`.
    pub fn log_from(&self, start: Option<ObjectId>) -> Log<'a> {
        Log {
            store: self.store,
            next: start,
        }
    }
}

/// Lazy, newest-first iterator over `(id, commit)` pairs.
///
/// The first missing or undecodable commit is yielded as an error and ends
/// the walk.
pub struct Log<'a> {
    store: &'a dyn ObjectStore,
    next: Option<ObjectId>,
}

impl Iterator for Log<'_> {
    type Item = ChainResult<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        match Commit::load(self.store, &id) {
            Ok(commit) => {
                debug!(id = %id.short_hex(), "log step");
                self.next = commit.parent;
                Some(Ok((id, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
