//! The `HEAD` file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sprig_types::ObjectId;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{RefError, Result};
use crate::traits::HeadStore;

/// [`HeadStore`] backed by a single file holding a hex digest, or nothing.
///
/// Surrounding whitespace is ignored on read so a hand-edited file with a
/// trailing newline still parses. Writes never add one.
#[derive(Clone, Debug)]
pub struct FileHeadStore {
    path: PathBuf,
}

impl FileHeadStore {
    /// Refer to the head file at `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create an empty head file ("no commits yet").
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        fs::write(&store.path, b"")?;
        Ok(store)
    }

    /// Location of the head file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HeadStore for FileHeadStore {
    fn read_head(&self) -> Result<Option<ObjectId>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RefError::Missing(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|e| RefError::Corrupt(format!("{trimmed:?}: {e}")))
    }

    fn write_head(&self, id: &ObjectId) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(id.to_hex().as_bytes())?;
        tmp.persist(&self.path).map_err(|e| RefError::Io(e.error))?;

        debug!(head = %id.short_hex(), "HEAD moved");
        Ok(())
    }
}
