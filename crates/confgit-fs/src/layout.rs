//! On-disk layout of the confgit base directory
//!
//! ```text
//! <base>/
//!   confgit.json        settings (structured key/value)
//!   repos/
//!     current           name of the active repository
//!     <name>/           one mirror working tree per repository
//! ```

use std::path::{Path, PathBuf};

/// Settings file name inside the base directory.
pub const CONFIG_FILE: &str = "confgit.json";

/// Directory holding one mirror per repository.
pub const REPOS_DIR: &str = "repos";

/// Record naming the active repository, inside [`REPOS_DIR`].
pub const CURRENT_RECORD: &str = "current";

/// Git database directory inside each mirror.
pub const GIT_DIR: &str = ".git";

/// Paths of the persisted state under one base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseLayout {
    base: PathBuf,
}

impl BaseLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join(CONFIG_FILE)
    }

    pub fn repos_dir(&self) -> PathBuf {
        self.base.join(REPOS_DIR)
    }

    pub fn current_record(&self) -> PathBuf {
        self.repos_dir().join(CURRENT_RECORD)
    }

    pub fn repository_dir(&self, name: &str) -> PathBuf {
        self.repos_dir().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_base() {
        let layout = BaseLayout::new("/home/u/.etc/confgit");
        assert_eq!(layout.config_file(), PathBuf::from("/home/u/.etc/confgit/confgit.json"));
        assert_eq!(
            layout.current_record(),
            PathBuf::from("/home/u/.etc/confgit/repos/current")
        );
        assert_eq!(
            layout.repository_dir("laptop"),
            PathBuf::from("/home/u/.etc/confgit/repos/laptop")
        );
    }
}
