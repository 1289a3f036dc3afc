//! On-disk persistence for the staging index.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sprig_types::ObjectId;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::entry::StagingEntry;
use crate::error::{IndexError, IndexResult};
use crate::index::StagingIndex;

/// The staging index file at a fixed path.
///
/// Every call reads or rewrites the whole file. Writes go to a temp file in
/// the same directory which is then renamed over the index, so readers see
/// either the old or the new list, never a torn one.
#[derive(Clone, Debug)]
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    /// Refer to the index file at `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the index file containing an empty list.
    pub fn create(path: impl Into<PathBuf>) -> IndexResult<Self> {
        let file = Self::new(path);
        file.save(&StagingIndex::new())?;
        Ok(file)
    }

    /// Location of the index file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole index into memory.
    pub fn load(&self) -> IndexResult<StagingIndex> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(IndexError::Missing(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        StagingIndex::from_json(&data)
    }

    /// Replace the persisted index with `index`.
    pub fn save(&self, index: &StagingIndex) -> IndexResult<()> {
        let data = index.to_json()?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.persist(&self.path).map_err(|e| IndexError::Io(e.error))?;

        debug!(entries = index.len(), path = %self.path.display(), "index saved");
        Ok(())
    }

    /// Append `{path, hash}` to the persisted index.
    pub fn stage(&self, path: &str, hash: ObjectId) -> IndexResult<()> {
        let mut index = self.load()?;
        if index.contains(path) {
            warn!(path, "path already staged; appending another entry");
        }
        index.stage(path, hash)?;
        self.save(&index)
    }

    /// Hand the current entries to `consume` and clear the persisted index
    /// only if it succeeds.
    ///
    /// If `consume` fails the index file is left untouched, so a failed
    /// commit never loses staged entries.
    pub fn snapshot_and_clear<T, E>(
        &self,
        consume: impl FnOnce(Vec<StagingEntry>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<IndexError>,
    {
        let snapshot = self.load()?.into_entries();
        let out = consume(snapshot)?;
        self.save(&StagingIndex::new())?;
        Ok(out)
    }
}
