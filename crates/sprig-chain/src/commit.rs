use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sprig_index::StagingEntry;
use sprig_store::{ObjectStore, StoreError};
use sprig_types::ObjectId;

use crate::error::{ChainError, ChainResult};

/// Current wall-clock time as an ISO-8601 string, e.g.
/// `2026-10-17T09:30:00.000Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// An immutable commit record.
///
/// Field order is significant: the record is serialized in declaration order
/// and the commit's identity is the SHA-1 of exactly those bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// ISO-8601 wall-clock time at which the commit was made.
    pub timestamp: String,
    pub message: String,
    /// The staging index at commit time, in staging order.
    pub files: Vec<StagingEntry>,
    /// Previous head, or `None` for the first commit.
    pub parent: Option<ObjectId>,
    pub author: String,
}

impl Commit {
    /// Build a commit record.
    pub fn new(
        files: Vec<StagingEntry>,
        parent: Option<ObjectId>,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
            files,
            parent,
            author: author.into(),
        }
    }

    /// Returns `true` for the first commit of a history.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Path lookup table over `files`.
    ///
    /// When a path was staged more than once before the commit, the latest
    /// staging wins.
    pub fn file_map(&self) -> HashMap<&str, &StagingEntry> {
        self.files.iter().map(|e| (e.path.as_str(), e)).collect()
    }

    /// Serialize into the stable on-store form.
    pub fn encode(&self) -> ChainResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ChainError::Serialization(e.to_string()))
    }

    /// Decode a commit previously stored under `id`.
    pub fn decode(id: &ObjectId, data: &[u8]) -> ChainResult<Self> {
        serde_json::from_slice(data).map_err(|e| ChainError::Corrupt {
            id: *id,
            reason: e.to_string(),
        })
    }

    /// Load and decode the commit stored under `id`.
    ///
    /// The stored bytes are re-hashed first; a record that no longer matches
    /// its digest fails with [`StoreError::HashMismatch`].
    pub fn load(store: &dyn ObjectStore, id: &ObjectId) -> ChainResult<Self> {
        let data = match store.get_verified(id) {
            Ok(data) => data,
            Err(StoreError::NotFound(_)) => return Err(ChainError::NotFound(*id)),
            Err(e) => return Err(e.into()),
        };
        Self::decode(id, &data)
    }
}
