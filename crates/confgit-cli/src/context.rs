//! Per-invocation context
//!
//! Opens the workspace once and resolves command-line paths the same way for
//! every command: relative to the process cwd, then under the current root.

use std::path::{Path, PathBuf};

use colored::Colorize;

use confgit_core::{Scope, ScopeResolver, Workspace};
use confgit_fs::path::absolute_from;
use confgit_git::{GitStore, PathFilter};

use crate::error::Result;

/// The opened workspace plus the directory the command was run from.
pub struct Context {
    workspace: Workspace,
    cwd: PathBuf,
}

impl Context {
    /// Open the workspace at `base`, or at `~/.etc/confgit` when unset.
    pub fn open(base: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let base = match base {
            Some(base) => absolute_from(&cwd, base),
            None => Workspace::default_base()?,
        };
        let workspace = Workspace::open(base)?;
        Ok(Self { workspace, cwd })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Store of the current repository.
    pub fn store(&self) -> Result<GitStore> {
        Ok(self.workspace.current_store()?)
    }

    pub fn scope(store: &GitStore) -> Result<Scope> {
        Ok(ScopeResolver::new(store).scope()?)
    }

    /// Turn command-line paths into a filter over tracked entries.
    ///
    /// No paths means everything. Paths outside the root are reported on
    /// stderr and dropped; if all of them are dropped nothing matches.
    pub fn filter(&self, scope: &Scope, paths: &[String]) -> PathFilter {
        if paths.is_empty() {
            return PathFilter::All;
        }

        let mut prefixes = Vec::with_capacity(paths.len());
        for arg in paths {
            match scope.relativize(&absolute_from(&self.cwd, Path::new(arg))) {
                Ok(relative) => prefixes.push(relative),
                Err(e) => warn(&e),
            }
        }
        PathFilter::Prefixes(prefixes)
    }
}

/// Print a non-fatal problem on stderr.
pub fn warn(message: &dyn std::fmt::Display) {
    eprintln!("{}: {}", "warning".yellow().bold(), message);
}
