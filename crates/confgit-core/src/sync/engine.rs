//! SyncEngine implementation
//!
//! Drives one backup (live filesystem to mirror) or restore (mirror to live
//! filesystem) pass over the tracked entries of a repository. Entries are
//! processed strictly in enumeration order so a prompt always follows its
//! own marker line.

use std::fmt;
use std::path::PathBuf;

use confgit_fs::access::destination_writable;
use confgit_fs::{copy_entry, exists_or_symlink};
use confgit_git::{ContentStore, PathFilter, TrackedEntry};

use super::detector::{Change, ChangeDetector};
use super::policy::{Action, CopyPolicy};
use crate::scope::Scope;
use crate::{Error, Result};

/// Which way a pass copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Live filesystem to mirror
    Backup,
    /// Mirror to live filesystem
    Restore,
}

impl Direction {
    /// Marker printed in front of a changed entry.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Backup => "-->",
            Self::Restore => "<--",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backup => f.write_str("backup"),
            Self::Restore => f.write_str("restore"),
        }
    }
}

/// One tracked entry with both ends of the copy resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    /// Mirror-relative path
    pub path: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub direction: Direction,
    /// False when writing the destination will need elevated privileges
    pub writable: bool,
}

/// Receives per-entry events and answers confirmation prompts.
///
/// The terminal implementation prints colored markers and reads the
/// answer from the user; tests supply fixed answers.
pub trait SyncReporter {
    /// The source of `entry` does not exist.
    fn missing(&mut self, entry: &SyncEntry);

    /// `entry` is about to be written, or would be.
    fn changed(&mut self, entry: &SyncEntry);

    /// Ask whether `entry` should be written. Only called in interactive mode.
    fn confirm(&mut self, entry: &SyncEntry) -> bool;

    /// Detection or copy failed for `entry`; the pass continues.
    fn failed(&mut self, entry: &SyncEntry, error: &Error);
}

/// What change detection concluded for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    MissingSource,
    Unchanged,
    Changed,
}

/// Terminal state of an entry after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing to do, or the entry failed
    Skipped,
    /// The destination was written
    Copied,
    /// Reported as changed but not written
    Reported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub path: String,
    pub verdict: Verdict,
    pub state: SyncState,
    /// Set when detection or the copy failed
    pub error: Option<String>,
}

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub direction: Direction,
    pub outcomes: Vec<EntryOutcome>,
    /// Store status after a backup. Restores never touch the store.
    pub status: Option<String>,
}

impl SyncReport {
    /// Paths that ended in `state`, in pass order.
    pub fn paths_in(&self, state: SyncState) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.state == state)
            .map(|outcome| outcome.path.as_str())
            .collect()
    }

    pub fn copied(&self) -> usize {
        self.count(|o| o.state == SyncState::Copied)
    }

    pub fn changed(&self) -> usize {
        self.count(|o| o.verdict == Verdict::Changed)
    }

    pub fn missing(&self) -> usize {
        self.count(|o| o.verdict == Verdict::MissingSource)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| o.error.is_some())
    }

    fn count(&self, predicate: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Engine for backup and restore passes over one repository.
pub struct SyncEngine<'a> {
    store: &'a dyn ContentStore,
    scope: Scope,
    policy: CopyPolicy,
}

impl<'a> SyncEngine<'a> {
    pub fn new(store: &'a dyn ContentStore, scope: Scope, policy: CopyPolicy) -> Self {
        Self {
            store,
            scope,
            policy,
        }
    }

    pub fn policy(&self) -> CopyPolicy {
        self.policy
    }

    /// Run one pass over the tracked entries matching `filter`.
    ///
    /// Per-entry failures are reported and recorded; only store failures
    /// abort the pass.
    pub fn run(
        &self,
        direction: Direction,
        filter: &PathFilter,
        reporter: &mut dyn SyncReporter,
    ) -> Result<SyncReport> {
        let entries = self.store.list_tracked(filter)?;
        tracing::debug!(%direction, entries = entries.len(), "Starting pass");

        let detector = ChangeDetector::new(self.store);
        let mut outcomes = Vec::with_capacity(entries.len());
        for tracked in &entries {
            if tracked.fingerprint().is_none() {
                continue;
            }
            let entry = self.resolve(tracked, direction);
            outcomes.push(self.process(&detector, tracked, &entry, reporter));
        }

        let status = match direction {
            Direction::Backup => Some(self.store.status()?),
            Direction::Restore => None,
        };

        Ok(SyncReport {
            direction,
            outcomes,
            status,
        })
    }

    fn resolve(&self, tracked: &TrackedEntry, direction: Direction) -> SyncEntry {
        let mirror = tracked.mirror_path(self.store.workdir());
        let live = self.scope.absolutize(&tracked.path);
        let (source, destination) = match direction {
            Direction::Backup => (live, mirror),
            Direction::Restore => (mirror, live),
        };
        let writable = destination_writable(&destination);
        SyncEntry {
            path: tracked.path.clone(),
            source,
            destination,
            direction,
            writable,
        }
    }

    fn process(
        &self,
        detector: &ChangeDetector<'_>,
        tracked: &TrackedEntry,
        entry: &SyncEntry,
        reporter: &mut dyn SyncReporter,
    ) -> EntryOutcome {
        let outcome = |verdict, state, error: Option<&Error>| EntryOutcome {
            path: entry.path.clone(),
            verdict,
            state,
            error: error.map(ToString::to_string),
        };

        if !exists_or_symlink(&entry.source) {
            reporter.missing(entry);
            return outcome(Verdict::MissingSource, SyncState::Skipped, None);
        }

        let verdict = if self.policy.force {
            Verdict::Changed
        } else {
            match self.detect(detector, tracked, entry) {
                Ok(verdict) => verdict,
                Err(e) => {
                    tracing::warn!(path = %entry.path, error = %e, "Change detection failed");
                    reporter.failed(entry, &e);
                    return outcome(Verdict::Changed, SyncState::Skipped, Some(&e));
                }
            }
        };

        match verdict {
            Verdict::Changed => {}
            Verdict::Unchanged | Verdict::MissingSource => {
                return outcome(verdict, SyncState::Skipped, None);
            }
        }

        reporter.changed(entry);
        let write = match self.policy.action(true) {
            Action::Copy => true,
            Action::Skip => false,
            Action::Prompt => reporter.confirm(entry),
        };
        if !write {
            return outcome(verdict, SyncState::Reported, None);
        }

        match copy_entry(&entry.source, &entry.destination) {
            Ok(()) => outcome(verdict, SyncState::Copied, None),
            Err(e) => {
                let e = Error::from(e);
                tracing::warn!(path = %entry.path, error = %e, "Copy failed");
                reporter.failed(entry, &e);
                outcome(verdict, SyncState::Skipped, Some(&e))
            }
        }
    }

    fn detect(
        &self,
        detector: &ChangeDetector<'_>,
        tracked: &TrackedEntry,
        entry: &SyncEntry,
    ) -> Result<Verdict> {
        let change = match entry.direction {
            Direction::Backup => detector.against_stored(tracked, &entry.source)?,
            // The live end is the destination; an absent one must be written.
            Direction::Restore => match detector.against_mirror(&entry.source, &entry.destination)? {
                Change::Missing => Change::Changed,
                other => other,
            },
        };
        Ok(match change {
            Change::Missing => Verdict::MissingSource,
            Change::Unchanged => Verdict::Unchanged,
            Change::Changed => Verdict::Changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(path: &str, verdict: Verdict, state: SyncState) -> EntryOutcome {
        EntryOutcome {
            path: path.to_string(),
            verdict,
            state,
            error: None,
        }
    }

    #[test]
    fn markers_point_in_copy_direction() {
        assert_eq!(Direction::Backup.marker(), "-->");
        assert_eq!(Direction::Restore.marker(), "<--");
    }

    #[test]
    fn report_counts() {
        let report = SyncReport {
            direction: Direction::Backup,
            outcomes: vec![
                outcome("README", Verdict::Unchanged, SyncState::Skipped),
                outcome("VERSION", Verdict::Changed, SyncState::Copied),
                outcome("LICENSE", Verdict::MissingSource, SyncState::Skipped),
                outcome("NOTES", Verdict::Changed, SyncState::Reported),
            ],
            status: None,
        };

        assert_eq!(report.copied(), 1);
        assert_eq!(report.changed(), 2);
        assert_eq!(report.missing(), 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.paths_in(SyncState::Skipped), vec!["README", "LICENSE"]);
    }
}
