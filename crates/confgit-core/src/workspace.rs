//! Entry point tying the base directory, settings and repositories together

use std::fs;
use std::path::{Path, PathBuf};

use confgit_fs::BaseLayout;
use confgit_git::GitStore;

use crate::repository::RepositorySet;
use crate::settings::Settings;
use crate::{Error, Result};

/// Base directory under the home directory when none is given.
pub const DEFAULT_BASE: &str = ".etc/confgit";

/// Name used when the hostname cannot be determined.
pub const FALLBACK_REPOSITORY: &str = "default";

/// An opened confgit base directory.
#[derive(Debug)]
pub struct Workspace {
    layout: BaseLayout,
    settings: Settings,
    repositories: RepositorySet,
}

impl Workspace {
    /// Open (creating if needed) the base directory at `base`.
    ///
    /// Ensures the settings file exists and that a current repository is
    /// selected.
    pub fn open(base: impl Into<PathBuf>) -> Result<Self> {
        let layout = BaseLayout::new(base);
        fs::create_dir_all(layout.base()).map_err(|e| confgit_fs::Error::io(layout.base(), e))?;

        let settings = Settings::load(&layout)?;
        let default_name = settings
            .default_repository
            .clone()
            .unwrap_or_else(hostname);
        let repositories = RepositorySet::open(layout.clone(), default_name)?;
        tracing::debug!(base = %layout.base().display(), "Opened workspace");

        Ok(Self {
            layout,
            settings,
            repositories,
        })
    }

    /// `~/.etc/confgit`
    pub fn default_base() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_BASE))
            .ok_or(Error::NoHomeDirectory)
    }

    pub fn base(&self) -> &Path {
        self.layout.base()
    }

    pub fn layout(&self) -> &BaseLayout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn repositories(&self) -> &RepositorySet {
        &self.repositories
    }

    /// Open the store of the current repository.
    pub fn current_store(&self) -> Result<GitStore> {
        self.repositories.current_store()
    }
}

/// This machine's hostname, or [`FALLBACK_REPOSITORY`].
#[cfg(unix)]
pub fn hostname() -> String {
    nix::unistd::gethostname()
        .ok()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_REPOSITORY.to_string())
}

#[cfg(not(unix))]
pub fn hostname() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_else(|_| FALLBACK_REPOSITORY.to_string())
}
