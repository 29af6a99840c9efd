//! Scope root resolution
//!
//! Every repository records the live subtree it mirrors as a local config
//! value. Mirror-relative paths are always relative to that root, never to
//! `/` unless the root is `/`.

use std::path::{Path, PathBuf};

use confgit_fs::path::{expand_home, normalize_lexically, to_slash};
use confgit_git::ContentStore;

use crate::{Error, Result};

/// Local config key holding the root.
pub const ROOT_CONFIG_KEY: &str = "confgit.root";

/// Root used when none is configured.
pub const DEFAULT_ROOT: &str = "/";

/// A resolved root with path conversion in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    root: PathBuf,
}

impl Scope {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: normalize_lexically(&root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mirror-relative form of `absolute`, with `/` separators.
    ///
    /// Fails with [`Error::OutsideRoot`] when the path escapes the root.
    /// The root itself relativizes to the empty string.
    pub fn relativize(&self, absolute: &Path) -> Result<String> {
        let normalized = normalize_lexically(absolute);
        normalized
            .strip_prefix(&self.root)
            .map(to_slash)
            .map_err(|_| Error::OutsideRoot {
                path: normalized.clone(),
                root: self.root.clone(),
            })
    }

    /// Live location of a mirror-relative path.
    pub fn absolutize(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            return self.root.clone();
        }
        self.root.join(relative)
    }

    /// Rewrite an absolute path under the root into its mirror-relative
    /// form so forwarded commands address the mirrored copy. Other arguments
    /// are returned unchanged.
    pub fn mirror_arg(&self, arg: &str) -> String {
        if !Path::new(arg).is_absolute() {
            return arg.to_string();
        }
        match self.relativize(Path::new(arg)) {
            Ok(relative) if relative.is_empty() => ".".to_string(),
            Ok(relative) => relative,
            Err(_) => arg.to_string(),
        }
    }
}

/// Reads and writes the root of one repository.
pub struct ScopeResolver<'a> {
    store: &'a dyn ContentStore,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self { store }
    }

    /// The configured root, or `/` when unset.
    pub fn get_root(&self) -> Result<PathBuf> {
        let value = self.store.config_get(ROOT_CONFIG_KEY)?;
        Ok(match value {
            Some(root) if !root.is_empty() => {
                expand_home(Path::new(&root), dirs::home_dir().as_deref())
            }
            _ => PathBuf::from(DEFAULT_ROOT),
        })
    }

    /// Persist a new root. A leading `~` is expanded; the result must be
    /// absolute. Returns the stored root.
    pub fn set_root(&self, path: &Path) -> Result<PathBuf> {
        let expanded = expand_home(path, dirs::home_dir().as_deref());
        if !expanded.is_absolute() {
            return Err(Error::InvalidRoot {
                path: path.display().to_string(),
            });
        }

        let root = normalize_lexically(&expanded);
        self.store
            .config_set(ROOT_CONFIG_KEY, &root.to_string_lossy())?;
        tracing::debug!(root = %root.display(), "Set root");
        Ok(root)
    }

    /// Forget the configured root, restoring `/`.
    pub fn clear_root(&self) -> Result<()> {
        self.store.config_unset(ROOT_CONFIG_KEY)?;
        tracing::debug!("Cleared root");
        Ok(())
    }

    pub fn scope(&self) -> Result<Scope> {
        Ok(Scope::new(self.get_root()?))
    }

    pub fn relativize(&self, absolute: &Path) -> Result<String> {
        self.scope()?.relativize(absolute)
    }

    pub fn absolutize(&self, relative: &str) -> Result<PathBuf> {
        Ok(self.scope()?.absolutize(relative))
    }
}
