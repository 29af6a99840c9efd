//! `git2`-backed content store

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use git2::{Config, ConfigLevel, ErrorCode, Repository, Tree};

use crate::store::{ContentStore, PathFilter, RemoveOptions, TrackedEntry, is_under};
use crate::{Error, Result, fingerprint_path, status};

/// Index entries for merge stages other than 0 are conflict markers.
const STAGE_SHIFT: u16 = 12;
const STAGE_MASK: u16 = 0x3;

/// Submodule entries are never copied.
const GITLINK_MODE: u32 = 0o160000;

/// A mirror backed by a git working tree.
pub struct GitStore {
    repo: Repository,
    workdir: PathBuf,
}

impl std::fmt::Debug for GitStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitStore")
            .field("workdir", &self.workdir)
            .finish()
    }
}

impl GitStore {
    /// Initialize a fresh store in `dir`, which must already exist.
    pub fn init(dir: &Path) -> Result<Self> {
        let repo = Repository::init(dir)?;
        tracing::debug!(path = %dir.display(), "Initialized content store");
        Ok(Self {
            repo,
            workdir: dir.to_path_buf(),
        })
    }

    /// Open the store in `dir`. Parent directories are not searched.
    pub fn open(dir: &Path) -> Result<Self> {
        let repo = Repository::open(dir)?;
        Ok(Self {
            repo,
            workdir: dir.to_path_buf(),
        })
    }

    /// True if `dir` holds an initialized store.
    pub fn exists_in(dir: &Path) -> bool {
        Repository::open(dir).is_ok()
    }

    fn local_config(&self) -> Result<Config> {
        Ok(self.repo.config()?.open_level(ConfigLevel::Local)?)
    }

    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// True if the entry differs from HEAD or its working copy differs from the index.
    fn has_uncommitted_changes(&self, head: Option<&Tree<'_>>, entry: &TrackedEntry) -> bool {
        let matches_head = head
            .and_then(|tree| tree.get_path(Path::new(&entry.path)).ok())
            .map(|te| te.id() == entry.oid && te.filemode() as u32 == entry.mode)
            .unwrap_or(false);
        if !matches_head {
            return true;
        }

        let working = entry.mirror_path(&self.workdir);
        if !confgit_fs::exists_or_symlink(&working) {
            return false;
        }
        match (fingerprint_path(&working), entry.fingerprint()) {
            (Ok(actual), Some(stored)) => actual != stored,
            _ => true,
        }
    }

    /// Delete empty directories from `start` up to, not including, the workdir.
    fn prune_empty_parents(&self, start: &Path) {
        let mut dir = start.parent();
        while let Some(current) = dir {
            if current == self.workdir || !current.starts_with(&self.workdir) {
                break;
            }
            if fs::remove_dir(current).is_err() {
                break;
            }
            dir = current.parent();
        }
    }
}

impl ContentStore for GitStore {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn add(&self, paths: &[String]) -> Result<()> {
        let mut index = self.repo.index()?;
        index.read(false)?;
        for path in paths {
            index.add_path(Path::new(path))?;
            tracing::debug!(path = %path, "Staged");
        }
        index.write()?;
        Ok(())
    }

    fn remove(&self, paths: &[String], options: RemoveOptions) -> Result<Vec<String>> {
        let tracked = self.list_tracked(&PathFilter::All)?;
        let mut targets: BTreeMap<&str, &TrackedEntry> = BTreeMap::new();

        for spec in paths {
            let spec_trimmed = spec.trim_end_matches('/');
            let matched: Vec<&TrackedEntry> = tracked
                .iter()
                .filter(|entry| is_under(&entry.path, spec))
                .collect();

            if matched.is_empty() {
                return Err(Error::NotTracked { path: spec.clone() });
            }
            if !options.recursive && matched.iter().any(|entry| entry.path != spec_trimmed) {
                return Err(Error::RecursionRequired { path: spec.clone() });
            }
            targets.extend(matched.into_iter().map(|entry| (entry.path.as_str(), entry)));
        }

        if !options.force {
            let head = self.head_tree()?;
            if let Some(entry) = targets
                .values()
                .find(|entry| self.has_uncommitted_changes(head.as_ref(), entry))
            {
                return Err(Error::LocalModifications {
                    path: entry.path.clone(),
                });
            }
        }

        let mut index = self.repo.index()?;
        index.read(false)?;
        let mut removed = Vec::with_capacity(targets.len());
        for entry in targets.into_values() {
            index.remove_path(Path::new(&entry.path))?;

            let working = entry.mirror_path(&self.workdir);
            match fs::remove_file(&working) {
                Ok(()) => self.prune_empty_parents(&working),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(confgit_fs::Error::io(&working, e).into()),
            }
            tracing::debug!(path = %entry.path, "Removed from store");
            removed.push(entry.path.clone());
        }
        index.write()?;

        Ok(removed)
    }

    fn status(&self) -> Result<String> {
        status::render(&self.repo)
    }

    fn list_tracked(&self, filter: &PathFilter) -> Result<Vec<TrackedEntry>> {
        let mut index = self.repo.index()?;
        index.read(false)?;

        let mut entries: Vec<TrackedEntry> = index
            .iter()
            .filter(|entry| (entry.flags >> STAGE_SHIFT) & STAGE_MASK == 0)
            .filter(|entry| entry.mode != GITLINK_MODE)
            .map(|entry| TrackedEntry {
                path: String::from_utf8_lossy(&entry.path).into_owned(),
                mode: entry.mode,
                oid: entry.id,
            })
            .filter(|entry| !is_under(&entry.path, confgit_fs::layout::GIT_DIR))
            .filter(|entry| filter.matches(&entry.path))
            .collect();

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn config_get(&self, key: &str) -> Result<Option<String>> {
        match self.local_config()?.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn config_set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.local_config()?;
        config.set_str(key, value)?;
        tracing::debug!(key, value, "Set local config");
        Ok(())
    }

    fn config_unset(&self, key: &str) -> Result<()> {
        let mut config = self.local_config()?;
        match config.remove(key) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
