//! The collection of named mirrors

use std::fs;
use std::path::{Path, PathBuf};

use confgit_fs::layout::CURRENT_RECORD;
use confgit_fs::{BaseLayout, is_real_dir, validate_path_identifier};
use confgit_git::GitStore;

use super::pointer;
use crate::{Error, Result};

/// One named mirror as seen by [`RepositorySet::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub path: PathBuf,
    pub is_current: bool,
}

/// Named mirrors under `<base>/repos/`, exactly one of them current.
///
/// Every successful [`open`](Self::open), [`switch`](Self::switch) and
/// [`remove`](Self::remove) leaves exactly one current repository whose
/// directory holds an initialized store.
#[derive(Debug, Clone)]
pub struct RepositorySet {
    layout: BaseLayout,
    default_name: String,
}

impl RepositorySet {
    /// Open the set, electing and creating a current repository if needed.
    ///
    /// `default_name` is used when no repository exists yet.
    pub fn open(layout: BaseLayout, default_name: impl Into<String>) -> Result<Self> {
        let set = Self {
            layout,
            default_name: default_name.into(),
        };
        let repos_dir = set.layout.repos_dir();
        fs::create_dir_all(&repos_dir).map_err(|e| confgit_fs::Error::io(&repos_dir, e))?;
        set.ensure_current()?;
        Ok(set)
    }

    /// Storage directory of `name`. The directory may not exist.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.layout.repository_dir(name)
    }

    /// Name of the current repository.
    ///
    /// A pointer left dangling by outside changes is repaired first.
    pub fn current(&self) -> Result<String> {
        self.ensure_current()
    }

    /// Open the store of the current repository.
    pub fn current_store(&self) -> Result<GitStore> {
        let name = self.current()?;
        Ok(GitStore::open(&self.path_of(&name))?)
    }

    /// Repositories in directory enumeration order.
    pub fn list(&self) -> Result<Vec<Repository>> {
        let current = pointer::read(&self.layout.current_record())?;
        let repos_dir = self.layout.repos_dir();
        let entries = fs::read_dir(&repos_dir).map_err(|e| confgit_fs::Error::io(&repos_dir, e))?;

        let mut repositories = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| confgit_fs::Error::io(&repos_dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == CURRENT_RECORD || name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            if !is_real_dir(&path) {
                continue;
            }
            let is_current = current.as_deref() == Some(name.as_str());
            repositories.push(Repository {
                name,
                path,
                is_current,
            });
        }
        Ok(repositories)
    }

    /// Make `name` current, creating and initializing it if it does not exist.
    ///
    /// Switching to the repository that is already current does nothing.
    pub fn switch(&self, name: &str) -> Result<()> {
        validate_name(name)?;

        let record = self.layout.current_record();
        let dir = self.path_of(name);
        if pointer::read(&record)?.as_deref() == Some(name) && GitStore::exists_in(&dir) {
            return Ok(());
        }

        self.ensure_store(name, &dir)?;
        pointer::write(&record, name)?;
        tracing::debug!(name, "Switched repository");
        Ok(())
    }

    /// Delete repository `name`.
    ///
    /// The current repository is only removed with `force`; a replacement is
    /// then elected (the first remaining repository, or a fresh default).
    pub fn remove(&self, name: &str, force: bool) -> Result<()> {
        validate_name(name)?;

        let dir = self.path_of(name);
        if !is_real_dir(&dir) {
            return Err(Error::RepositoryNotFound {
                name: name.to_string(),
            });
        }

        let record = self.layout.current_record();
        let was_current = pointer::read(&record)?.as_deref() == Some(name);
        if was_current && !force {
            return Err(Error::CurrentRepositoryInUse {
                name: name.to_string(),
            });
        }

        fs::remove_dir_all(&dir).map_err(|e| confgit_fs::Error::io(&dir, e))?;
        tracing::debug!(name, "Removed repository");

        if was_current {
            pointer::clear(&record)?;
            self.ensure_current()?;
        }
        Ok(())
    }

    /// Make sure the pointer names an initialized repository, electing one
    /// if it does not. Returns the current name.
    fn ensure_current(&self) -> Result<String> {
        if let Some(name) = pointer::read(&self.layout.current_record())?
            && GitStore::exists_in(&self.path_of(&name))
        {
            return Ok(name);
        }

        let elected = self
            .list()?
            .into_iter()
            .map(|repository| repository.name)
            .find(|name| validate_name(name).is_ok())
            .unwrap_or_else(|| self.default_name.clone());
        tracing::debug!(name = %elected, "Electing current repository");

        self.switch(&elected)?;
        Ok(elected)
    }

    /// Create and initialize the store for `name` if missing. A directory
    /// created here is removed again when initialization fails.
    fn ensure_store(&self, name: &str, dir: &Path) -> Result<()> {
        if GitStore::exists_in(dir) {
            return Ok(());
        }

        let created = !is_real_dir(dir);
        let creation_error = |reason: String| Error::RepositoryCreation {
            name: name.to_string(),
            reason,
        };

        if created {
            fs::create_dir(dir).map_err(|e| creation_error(e.to_string()))?;
        }
        if let Err(e) = GitStore::init(dir) {
            if created {
                let _ = fs::remove_dir_all(dir);
            }
            return Err(creation_error(e.to_string()));
        }
        tracing::debug!(name, path = %dir.display(), "Created repository");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    validate_path_identifier(name, "repository name").map_err(|reason| {
        Error::InvalidRepositoryName {
            name: name.to_string(),
            reason,
        }
    })?;
    if name == CURRENT_RECORD {
        return Err(Error::InvalidRepositoryName {
            name: name.to_string(),
            reason: format!("'{CURRENT_RECORD}' is reserved"),
        });
    }
    Ok(())
}
