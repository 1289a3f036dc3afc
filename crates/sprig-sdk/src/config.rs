//! Repository configuration.

use serde::{Deserialize, Serialize};

/// Default name of the metadata directory inside a working directory.
pub const DEFAULT_REPO_DIR: &str = ".sprig";

/// Author recorded when nothing better is known.
pub const DEFAULT_AUTHOR: &str = "anonymous";

/// Settings that shape where a repository lives and how commits are signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Metadata directory name, relative to the working directory.
    pub repo_dir: String,
    /// Author recorded in new commits.
    pub author: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            repo_dir: DEFAULT_REPO_DIR.into(),
            author: DEFAULT_AUTHOR.into(),
        }
    }
}

impl RepoConfig {
    /// Build a config from the process environment.
    ///
    /// `SPRIG_DIR` overrides the metadata directory. The author comes from
    /// `SPRIG_AUTHOR`, then `USER`, then falls back to [`DEFAULT_AUTHOR`].
    /// Empty variables count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            repo_dir: var("SPRIG_DIR").unwrap_or(defaults.repo_dir),
            author: var("SPRIG_AUTHOR")
                .or_else(|| var("USER"))
                .unwrap_or(defaults.author),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_repo_dir(mut self, repo_dir: impl Into<String>) -> Self {
        self.repo_dir = repo_dir.into();
        self
    }
}
