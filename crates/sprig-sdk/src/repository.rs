//! The on-disk repository.
//!
//! Layout under `<workdir>/<repo_dir>`:
//!
//! ```text
//! objects/   one file per blob or commit, named by its hex digest
//! HEAD       hex digest of the newest commit, or empty
//! index      JSON array of staged {path, hash} entries
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sprig_chain::{now_timestamp, Commit, CommitChain};
use sprig_diff::{show_commit, CommitDiff};
use sprig_index::{IndexFile, StagingEntry, StagingIndex};
use sprig_refs::{FileHeadStore, HeadStore};
use sprig_store::{FsObjectStore, ObjectStore};
use sprig_types::ObjectId;
use tracing::{debug, info, warn};

use crate::config::RepoConfig;
use crate::error::{SdkError, SdkResult};

const OBJECTS_DIR: &str = "objects";
const HEAD_FILE: &str = "HEAD";
const INDEX_FILE: &str = "index";

/// Shortest abbreviated digest accepted by [`Repository::resolve`].
pub const MIN_PREFIX_LEN: usize = 4;

/// Outcome of [`Repository::init`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitStatus {
    /// The layout was created, or completed where entries were missing.
    Created,
    /// The full layout already existed and was left untouched.
    AlreadyInitialized,
}

/// Handle on a repository rooted at a working directory.
///
/// Every operation reads what it needs from disk and writes its result back
/// before returning; the handle itself holds no repository state.
#[derive(Debug)]
pub struct Repository {
    workdir: PathBuf,
    root: PathBuf,
    config: RepoConfig,
    store: FsObjectStore,
    head: FileHeadStore,
    index: IndexFile,
}

impl Repository {
    /// Create the repository layout under `workdir`.
    ///
    /// Returns [`InitStatus::AlreadyInitialized`] without writing anything
    /// when `objects/`, `HEAD` and `index` are all present. Otherwise the
    /// missing entries are created and entries that already exist are kept
    /// as they are. Fails with [`SdkError::InvalidPath`] if the metadata path
    /// exists but is not a directory.
    pub fn init(workdir: impl Into<PathBuf>, config: RepoConfig) -> SdkResult<InitStatus> {
        let workdir = workdir.into();
        let root = workdir.join(&config.repo_dir);
        if root.exists() && !root.is_dir() {
            return Err(SdkError::InvalidPath(format!(
                "{} exists and is not a directory",
                root.display()
            )));
        }

        let objects = root.join(OBJECTS_DIR);
        let head = root.join(HEAD_FILE);
        let index = root.join(INDEX_FILE);
        if objects.is_dir() && head.is_file() && index.is_file() {
            debug!(root = %root.display(), "repository already initialized");
            return Ok(InitStatus::AlreadyInitialized);
        }

        fs::create_dir_all(&root)?;
        FsObjectStore::create(objects)?;
        if !head.exists() {
            FileHeadStore::create(head)?;
        }
        if !index.exists() {
            IndexFile::create(index)?;
        }

        info!(root = %root.display(), "initialized empty repository");
        Ok(InitStatus::Created)
    }

    /// Open an existing repository under `workdir`.
    ///
    /// Fails with [`SdkError::NotInitialized`] if the metadata directory or
    /// its object directory is missing. `HEAD` and `index` are checked lazily
    /// by the operations that need them.
    pub fn open(workdir: impl Into<PathBuf>, config: RepoConfig) -> SdkResult<Self> {
        let workdir = workdir.into();
        let root = workdir.join(&config.repo_dir);
        if !root.is_dir() {
            return Err(SdkError::NotInitialized(root));
        }

        let store = FsObjectStore::open(root.join(OBJECTS_DIR))?;
        let head = FileHeadStore::new(root.join(HEAD_FILE));
        let index = IndexFile::new(root.join(INDEX_FILE));

        Ok(Self {
            workdir,
            root,
            config,
            store,
            head,
            index,
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The metadata directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn store(&self) -> &FsObjectStore {
        &self.store
    }

    // ---- Head and index ----

    pub fn load_head(&self) -> SdkResult<Option<ObjectId>> {
        Ok(self.head.read_head()?)
    }

    pub fn save_head(&self, id: &ObjectId) -> SdkResult<()> {
        Ok(self.head.write_head(id)?)
    }

    pub fn load_index(&self) -> SdkResult<StagingIndex> {
        Ok(self.index.load()?)
    }

    pub fn save_index(&self, index: &StagingIndex) -> SdkResult<()> {
        Ok(self.index.save(index)?)
    }

    // ---- Operations ----

    /// Store the content of `path` and stage it.
    ///
    /// Relative paths are read from the working directory and recorded as
    /// given. Staging a path again appends a second entry; the latest one is
    /// what later lookups by path see.
    pub fn add(&self, path: impl AsRef<Path>) -> SdkResult<StagingEntry> {
        let path = path.as_ref();
        let recorded = path
            .to_str()
            .ok_or_else(|| SdkError::InvalidPath(path.display().to_string()))?;

        let content = match fs::read(self.workdir.join(path)) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SdkError::SourceFileNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };

        let hash = self.store.put(&content)?;
        self.index.stage(recorded, hash)?;

        debug!(path = recorded, hash = %hash.short_hex(), bytes = content.len(), "staged");
        Ok(StagingEntry::new(recorded, hash))
    }

    /// Record the staged entries as a new commit on top of head.
    ///
    /// The index is cleared only after the commit object is stored and head
    /// has moved; on failure the staged entries are kept.
    pub fn commit(&self, message: &str) -> SdkResult<ObjectId> {
        let chain = self.chain();
        self.index.snapshot_and_clear(|files| {
            chain
                .commit(files, message, &self.config.author, now_timestamp())
                .map_err(SdkError::from)
        })
    }

    /// Walk the history newest-first from head.
    pub fn log(&self) -> SdkResult<impl Iterator<Item = SdkResult<(ObjectId, Commit)>> + '_> {
        Ok(self
            .chain()
            .log()?
            .map(|step| step.map_err(SdkError::from)))
    }

    /// Load the commit stored under `id`.
    pub fn get_commit(&self, id: &ObjectId) -> SdkResult<Commit> {
        Ok(self.chain().get_commit(id)?)
    }

    /// Resolve `rev` and report what that commit recorded against its parent.
    pub fn show(&self, rev: &str) -> SdkResult<CommitDiff> {
        let id = self.resolve(rev)?;
        Ok(show_commit(&self.store, &id)?)
    }

    /// The entries currently staged for the next commit.
    pub fn status(&self) -> SdkResult<StagingIndex> {
        self.load_index()
    }

    /// Turn a user-supplied revision into a commit id.
    ///
    /// Accepts `HEAD`, a full digest, or a unique prefix of at least
    /// [`MIN_PREFIX_LEN`] hex digits of a commit reachable from head.
    ///
    /// If the history walk breaks on a missing or corrupt commit, the prefix
    /// is resolved against the commits read before the break; the walk error
    /// is returned only when none of them matched.
    pub fn resolve(&self, rev: &str) -> SdkResult<ObjectId> {
        let rev = rev.trim();
        if rev == HEAD_FILE {
            return self
                .load_head()?
                .ok_or_else(|| SdkError::UnknownRevision("HEAD (no commits yet)".into()));
        }
        if let Ok(id) = rev.parse::<ObjectId>() {
            return Ok(id);
        }
        if rev.len() < MIN_PREFIX_LEN || !rev.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SdkError::UnknownRevision(rev.to_string()));
        }

        let mut matches = Vec::new();
        let mut broken = None;
        for step in self.log()? {
            match step {
                Ok((id, _)) if id.matches_prefix(rev) => matches.push(id),
                Ok(_) => {}
                Err(e) => {
                    warn!(prefix = rev, error = %e, "history walk stopped early");
                    broken = Some(e);
                    break;
                }
            }
        }

        match matches.as_slice() {
            [] => Err(broken.unwrap_or_else(|| SdkError::UnknownRevision(rev.to_string()))),
            [id] => Ok(*id),
            _ => Err(SdkError::AmbiguousRevision {
                prefix: rev.to_string(),
                count: matches.len(),
            }),
        }
    }

    fn chain(&self) -> CommitChain<'_> {
        CommitChain::new(&self.store, &self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RepoConfig {
        RepoConfig::default().with_author("tester")
    }

    fn temp_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path(), config()).unwrap();
        let repo = Repository::open(dir.path(), config()).unwrap();
        (dir, repo)
    }

    #[test]
    fn init_twice_reports_existing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Repository::init(dir.path(), config()).unwrap(), InitStatus::Created);
        assert_eq!(
            Repository::init(dir.path(), config()).unwrap(),
            InitStatus::AlreadyInitialized
        );
    }

    #[test]
    fn init_completes_partial_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".sprig");
        fs::create_dir(&root).unwrap();

        assert_eq!(Repository::init(dir.path(), config()).unwrap(), InitStatus::Created);
        assert!(root.join(OBJECTS_DIR).is_dir());
        assert_eq!(fs::read(root.join(HEAD_FILE)).unwrap(), b"");
        assert_eq!(fs::read_to_string(root.join(INDEX_FILE)).unwrap(), "[]");

        let repo = Repository::open(dir.path(), config()).unwrap();
        assert_eq!(repo.load_head().unwrap(), None);
        assert!(repo.status().unwrap().is_empty());
    }

    #[test]
    fn init_keeps_existing_entries() {
        let (dir, repo) = temp_repo();
        let id = repo.commit("kept").unwrap();
        fs::remove_file(repo.root().join(INDEX_FILE)).unwrap();

        assert_eq!(Repository::init(dir.path(), config()).unwrap(), InitStatus::Created);
        assert_eq!(repo.load_head().unwrap(), Some(id));
        assert!(repo.get_commit(&id).is_ok());
        assert!(repo.status().unwrap().is_empty());
    }

    #[test]
    fn init_rejects_file_in_place_of_repo_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".sprig"), "not a directory").unwrap();

        let err = Repository::init(dir.path(), config()).unwrap_err();
        assert!(matches!(err, SdkError::InvalidPath(_)));
        assert!(matches!(
            Repository::open(dir.path(), config()),
            Err(SdkError::NotInitialized(_))
        ));
    }

    #[test]
    fn init_respects_repo_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config().with_repo_dir(".meta");
        Repository::init(dir.path(), config.clone()).unwrap();
        assert!(dir.path().join(".meta/objects").is_dir());
        assert!(Repository::open(dir.path(), config).is_ok());
        assert!(Repository::open(dir.path(), RepoConfig::default()).is_err());
    }

    #[test]
    fn open_without_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = Repository::open(dir.path(), config()).unwrap_err();
        assert!(matches!(err, SdkError::NotInitialized(_)));
    }

    #[test]
    fn add_missing_file() {
        let (_dir, repo) = temp_repo();
        let err = repo.add("nope.txt").unwrap_err();
        assert!(matches!(err, SdkError::SourceFileNotFound(p) if p == Path::new("nope.txt")));
        assert!(repo.status().unwrap().is_empty());
    }

    #[test]
    fn add_twice_keeps_both_entries() {
        let (dir, repo) = temp_repo();
        let file = dir.path().join("f.txt");
        fs::write(&file, "v1").unwrap();
        repo.add("f.txt").unwrap();
        fs::write(&file, "v2").unwrap();
        repo.add("f.txt").unwrap();

        let status = repo.status().unwrap();
        assert_eq!(status.len(), 2);
        assert_eq!(status.latest("f.txt").unwrap().hash, ObjectId::from_bytes(b"v2"));
    }

    #[test]
    fn commit_uses_configured_author() {
        let (_dir, repo) = temp_repo();
        let id = repo.commit("empty").unwrap();
        assert_eq!(repo.get_commit(&id).unwrap().author, "tester");
    }

    #[test]
    fn failed_commit_keeps_index() {
        let (dir, repo) = temp_repo();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        repo.add("a.txt").unwrap();
        fs::write(repo.root().join(HEAD_FILE), "garbage").unwrap();

        assert!(matches!(repo.commit("broken"), Err(SdkError::CorruptRecord(_))));
        assert_eq!(repo.status().unwrap().len(), 1);
    }

    #[test]
    fn head_and_index_accessors() {
        let (_dir, repo) = temp_repo();
        assert_eq!(repo.load_head().unwrap(), None);

        let id = ObjectId::from_bytes(b"c");
        repo.save_head(&id).unwrap();
        assert_eq!(repo.load_head().unwrap(), Some(id));

        let mut index = StagingIndex::new();
        index.stage("x", id).unwrap();
        repo.save_index(&index).unwrap();
        assert_eq!(repo.load_index().unwrap(), index);
    }

    #[test]
    fn resolve_forms() {
        let (_dir, repo) = temp_repo();
        assert!(matches!(repo.resolve("HEAD"), Err(SdkError::UnknownRevision(_))));

        let id = repo.commit("one").unwrap();
        let hex = id.to_hex();
        assert_eq!(repo.resolve("HEAD").unwrap(), id);
        assert_eq!(repo.resolve(&hex).unwrap(), id);
        assert_eq!(repo.resolve(&hex[..6]).unwrap(), id);
        assert_eq!(repo.resolve(&hex[..6].to_uppercase()).unwrap(), id);
        assert!(matches!(repo.resolve(&hex[..3]), Err(SdkError::UnknownRevision(_))));
        assert!(matches!(repo.resolve("zzzzzz"), Err(SdkError::UnknownRevision(_))));
    }

    #[test]
    fn resolve_only_sees_commits() {
        let (dir, repo) = temp_repo();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let blob = repo.add("a.txt").unwrap().hash;
        repo.commit("one").unwrap();

        let err = repo.resolve(&blob.to_hex()[..8]).unwrap_err();
        assert!(matches!(err, SdkError::UnknownRevision(_)));
    }

    #[test]
    fn resolve_survives_broken_history() {
        let (_dir, repo) = temp_repo();
        let first = repo.commit("one").unwrap();
        let second = repo.commit("two").unwrap();
        fs::remove_file(repo.store().object_path(&first)).unwrap();

        assert_eq!(repo.resolve(&second.to_hex()[..8]).unwrap(), second);
        assert!(matches!(
            repo.resolve(&first.to_hex()[..8]),
            Err(SdkError::ObjectNotFound(id)) if id == first
        ));
    }
}
