//! [`TestHome`] fixture for confgit scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary confgit base directory plus a temporary "live" filesystem
/// root that backups read from and restores write to.
///
/// # Example
///
/// ```rust,no_run
/// use confgit_test_utils::TestHome;
///
/// let home = TestHome::new();
/// let readme = home.write_live("README", "hello\n");
/// assert!(readme.starts_with(home.live()));
/// ```
pub struct TestHome {
    base: TempDir,
    live: TempDir,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            base: TempDir::new().unwrap(),
            live: TempDir::new().unwrap(),
        }
    }

    /// The confgit base directory (`--base` / `CONFGIT_HOME`).
    pub fn base(&self) -> &Path {
        self.base.path()
    }

    /// The live root. Canonicalized so it compares equal to resolved paths
    /// on platforms where the temp dir sits behind a symlink.
    pub fn live(&self) -> PathBuf {
        fs::canonicalize(self.live.path()).unwrap()
    }

    pub fn live_path(&self, rel: &str) -> PathBuf {
        self.live().join(rel)
    }

    /// Write a live file, creating parent directories.
    pub fn write_live(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.live_path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_live(&self, rel: &str) -> String {
        fs::read_to_string(self.live_path(rel))
            .unwrap_or_else(|e| panic!("read_live: cannot read {rel}: {e}"))
    }

    /// Path inside the mirror of repository `name`.
    pub fn mirror_path(&self, name: &str, rel: &str) -> PathBuf {
        self.base().join("repos").join(name).join(rel)
    }
}
