//! Hash-based change detection
//!
//! Timestamps are never consulted: a live file only counts as changed when
//! its fingerprint (mode class plus blob hash) differs from the reference.

use std::path::Path;

use confgit_fs::exists_or_symlink;
use confgit_git::{ContentStore, TrackedEntry};

use crate::Result;

/// Outcome of comparing a live path with its mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The live path does not exist (a dangling symlink does exist)
    Missing,
    Unchanged,
    Changed,
}

/// Compares live paths with what a mirror holds.
pub struct ChangeDetector<'a> {
    store: &'a dyn ContentStore,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self { store }
    }

    /// Compare `live` with the fingerprint the store recorded for `entry`.
    pub fn against_stored(&self, entry: &TrackedEntry, live: &Path) -> Result<Change> {
        if !exists_or_symlink(live) {
            return Ok(Change::Missing);
        }
        let actual = self.store.hash_of(live)?;
        Ok(if entry.fingerprint() == Some(actual) {
            Change::Unchanged
        } else {
            Change::Changed
        })
    }

    /// Compare `live` with the file currently at `mirror`.
    ///
    /// The mirror is hashed fresh since its content can change without the
    /// index noticing (a checkout, a manual edit).
    pub fn against_mirror(&self, mirror: &Path, live: &Path) -> Result<Change> {
        if !exists_or_symlink(live) {
            return Ok(Change::Missing);
        }
        let expected = self.store.hash_of(mirror)?;
        let actual = self.store.hash_of(live)?;
        Ok(if expected == actual {
            Change::Unchanged
        } else {
            Change::Changed
        })
    }
}
