//! Adding and removing tracked files
//!
//! `add` copies live files into the mirror and stages them. A failed copy
//! aborts the whole command since a partly added tree is worse than none.

use std::path::Path;

use walkdir::WalkDir;

use confgit_fs::layout::GIT_DIR;
use confgit_fs::path::absolute_from;
use confgit_fs::{copy_entry, exists_or_symlink, is_real_dir};
use confgit_git::{ContentStore, RemoveOptions};

use crate::scope::Scope;
use crate::{Error, Result};

/// A path `add` skipped without failing.
#[derive(Debug)]
pub enum AddWarning {
    /// The path is not under the root
    OutsideRoot(Error),
    /// The path does not exist
    Missing(std::path::PathBuf),
}

impl std::fmt::Display for AddWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutsideRoot(e) => write!(f, "{e}"),
            Self::Missing(path) => write!(f, "{}: no such file or directory", path.display()),
        }
    }
}

/// Result of an `add`.
#[derive(Debug, Default)]
pub struct AddOutcome {
    /// Mirror-relative paths copied and staged, in walk order
    pub staged: Vec<String>,
    pub warnings: Vec<AddWarning>,
}

/// Copy `paths` into the mirror and stage them.
///
/// Relative paths are resolved against `cwd`. Directories are walked
/// without following symlinks, skipping `.git`.
pub fn add(store: &dyn ContentStore, scope: &Scope, cwd: &Path, paths: &[String]) -> Result<AddOutcome> {
    let mut outcome = AddOutcome::default();

    for arg in paths {
        let absolute = absolute_from(cwd, Path::new(arg));
        if let Err(e) = scope.relativize(&absolute) {
            tracing::warn!(path = %absolute.display(), "Outside root, skipped");
            outcome.warnings.push(AddWarning::OutsideRoot(e));
            continue;
        }
        if !exists_or_symlink(&absolute) {
            tracing::warn!(path = %absolute.display(), "Missing, skipped");
            outcome.warnings.push(AddWarning::Missing(absolute));
            continue;
        }

        let copied = if is_real_dir(&absolute) {
            copy_tree(store, scope, &absolute)?
        } else {
            vec![copy_one(store, scope, &absolute)?]
        };

        if !copied.is_empty() {
            store.add(&copied)?;
        }
        outcome.staged.extend(copied);
    }

    if outcome.staged.is_empty() && outcome.warnings.is_empty() {
        return Err(Error::NothingToAdd);
    }
    Ok(outcome)
}

fn copy_tree(store: &dyn ContentStore, scope: &Scope, dir: &Path) -> Result<Vec<String>> {
    let mut copied = Vec::new();
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != GIT_DIR);

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            confgit_fs::Error::io(path, e.into())
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        copied.push(copy_one(store, scope, entry.path())?);
    }
    Ok(copied)
}

fn copy_one(store: &dyn ContentStore, scope: &Scope, live: &Path) -> Result<String> {
    let relative = scope.relativize(live)?;
    let mirror = store.workdir().join(&relative);
    copy_entry(live, &mirror)?;
    tracing::debug!(path = %relative, "Added");
    Ok(relative)
}

/// Unstage and delete `paths` from the mirror. Live files are untouched.
///
/// Returns the mirror-relative paths removed.
pub fn remove(
    store: &dyn ContentStore,
    scope: &Scope,
    cwd: &Path,
    paths: &[String],
    options: RemoveOptions,
) -> Result<Vec<String>> {
    let relative = paths
        .iter()
        .map(|arg| scope.relativize(&absolute_from(cwd, Path::new(arg))))
        .collect::<Result<Vec<_>>>()?;
    Ok(store.remove(&relative, options)?)
}
