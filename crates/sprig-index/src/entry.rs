//! Staging entry type.

use serde::{Deserialize, Serialize};
use sprig_types::ObjectId;

/// An entry in the staging index: a path and the digest of its content at
/// the time it was staged.
///
/// The same type is embedded verbatim in commit records, so its serialized
/// field order (`path`, then `hash`) is part of the commit digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingEntry {
    /// Path as given to `add`, relative to the working directory.
    pub path: String,
    /// Content-addressed ID of the file's blob in the object store.
    pub hash: ObjectId,
}

impl StagingEntry {
    /// Create a new staging entry.
    pub fn new(path: impl Into<String>, hash: ObjectId) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_path_before_hash() {
        let entry = StagingEntry::new("a.txt", ObjectId::from_bytes(b"hello"));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"path":"a.txt","hash":"aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"}"#
        );
    }
}
