//! In-memory head store for testing and ephemeral use.

use std::sync::RwLock;

use sprig_types::ObjectId;

use crate::error::{RefError, Result};
use crate::traits::HeadStore;

/// An in-memory implementation of [`HeadStore`].
#[derive(Debug, Default)]
pub struct InMemoryHeadStore {
    head: RwLock<Option<ObjectId>>,
}

impl InMemoryHeadStore {
    /// Create a head store with no commits.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeadStore for InMemoryHeadStore {
    fn read_head(&self) -> Result<Option<ObjectId>> {
        let head = self.head.read().map_err(|_| RefError::Poisoned)?;
        Ok(*head)
    }

    fn write_head(&self, id: &ObjectId) -> Result<()> {
        let mut head = self.head.write().map_err(|_| RefError::Poisoned)?;
        *head = Some(*id);
        Ok(())
    }
}
