//! Content store trait
//!
//! The sync engine only ever talks to a mirror through this trait, so the
//! store's history model stays out of the copy logic.

use std::path::{Path, PathBuf};

use git2::Oid;

use crate::{FileMode, Fingerprint, Result};

/// A file or symlink recorded by the store at the current revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntry {
    /// Mirror-relative path with `/` separators
    pub path: String,
    /// Raw mode bits as recorded (`0o100644`, `0o100755`, `0o120000`)
    pub mode: u32,
    /// Blob hash of the recorded content
    pub oid: Oid,
}

impl TrackedEntry {
    /// The stored fingerprint, or `None` for modes the sync engine does not copy.
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        FileMode::from_raw(self.mode).map(|mode| Fingerprint::new(mode, self.oid))
    }

    /// Location of this entry inside a mirror working tree.
    pub fn mirror_path(&self, workdir: &Path) -> PathBuf {
        workdir.join(&self.path)
    }
}

/// Which tracked entries an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathFilter {
    /// Every tracked entry
    #[default]
    All,
    /// Entries equal to, or beneath, one of these mirror-relative prefixes.
    /// An empty prefix matches everything; an empty list matches nothing.
    Prefixes(Vec<String>),
}

impl PathFilter {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::All => true,
            Self::Prefixes(prefixes) => prefixes.iter().any(|prefix| is_under(path, prefix)),
        }
    }
}

/// True if `path` equals `prefix` or lies beneath it.
pub(crate) fn is_under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    path == prefix
        || (path.len() > prefix.len()
            && path.starts_with(prefix)
            && path.as_bytes()[prefix.len()] == b'/')
}

/// Options for [`ContentStore::remove`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Allow a path to match a whole directory of entries
    pub recursive: bool,
    /// Remove even when the entry has uncommitted changes
    pub force: bool,
}

/// Durable, hash-addressed storage behind one mirror.
pub trait ContentStore {
    /// Root of the mirror working tree.
    fn workdir(&self) -> &Path;

    /// Stage the given mirror-relative paths.
    fn add(&self, paths: &[String]) -> Result<()>;

    /// Unstage and delete the given mirror-relative paths.
    ///
    /// Returns the entries actually removed.
    fn remove(&self, paths: &[String], options: RemoveOptions) -> Result<Vec<String>>;

    /// Human-readable summary of staged, unstaged and untracked changes.
    fn status(&self) -> Result<String>;

    /// Tracked entries matching `filter`, sorted by path.
    fn list_tracked(&self, filter: &PathFilter) -> Result<Vec<TrackedEntry>>;

    /// Fingerprint of a file or symlink anywhere on disk.
    fn hash_of(&self, path: &Path) -> Result<Fingerprint> {
        crate::fingerprint_path(path)
    }

    /// Read a mirror-local configuration value.
    fn config_get(&self, key: &str) -> Result<Option<String>>;

    /// Persist a mirror-local configuration value.
    fn config_set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a mirror-local configuration value. Absent keys are not an error.
    fn config_unset(&self, key: &str) -> Result<()>;
}
