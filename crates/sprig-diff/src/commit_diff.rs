//! What a commit changed relative to its parent.

use serde::Serialize;
use sprig_chain::Commit;
use sprig_store::{ObjectStore, StoreError};
use sprig_types::ObjectId;
use tracing::debug;

use crate::blob_diff::{diff_blobs, BlobDiff};
use crate::error::{DiffError, DiffResult};

/// A commit together with the per-file report of what it recorded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommitDiff {
    pub id: ObjectId,
    pub commit: Commit,
    /// One report per entry of `commit.files`, in the same order.
    pub files: Vec<FileReport>,
}

/// How one recorded file relates to the parent commit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub hash: ObjectId,
    /// Size of the recorded content in bytes.
    pub size: usize,
    pub change: FileChange,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "change", content = "diff", rename_all = "lowercase")]
pub enum FileChange {
    /// The commit has no parent; the file is part of the first commit.
    Initial,
    /// The parent does not record this path.
    Introduced,
    /// The parent records this path; diff from its content to this one.
    Compared(BlobDiff),
}

/// Build the report for the commit stored under `id`.
///
/// A path recorded more than once in the parent is compared against the
/// parent's last entry for it. Nothing is written to the store.
pub fn show_commit(store: &dyn ObjectStore, id: &ObjectId) -> DiffResult<CommitDiff> {
    let commit = Commit::load(store, id)?;
    let parent = commit
        .parent
        .as_ref()
        .map(|p| Commit::load(store, p))
        .transpose()?;
    let parent_files = parent.as_ref().map(Commit::file_map);

    let mut files = Vec::with_capacity(commit.files.len());
    for entry in &commit.files {
        let content = load_blob(store, &entry.hash)?;

        let change = match &parent_files {
            None => FileChange::Initial,
            Some(parent_files) => match parent_files.get(entry.path.as_str()) {
                None => FileChange::Introduced,
                Some(before) => {
                    let old = load_blob(store, &before.hash)?;
                    FileChange::Compared(diff_blobs(&old, &content))
                }
            },
        };

        files.push(FileReport {
            path: entry.path.clone(),
            hash: entry.hash,
            size: content.len(),
            change,
        });
    }

    debug!(id = %id.short_hex(), files = files.len(), "commit diff computed");
    Ok(CommitDiff {
        id: *id,
        commit,
        files,
    })
}

fn load_blob(store: &dyn ObjectStore, id: &ObjectId) -> DiffResult<Vec<u8>> {
    match store.get_verified(id) {
        Ok(data) => Ok(data),
        Err(StoreError::NotFound(_)) => Err(DiffError::ObjectNotFound(*id)),
        Err(e) => Err(e.into()),
    }
}
