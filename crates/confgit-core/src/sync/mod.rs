//! Backup and restore passes
//!
//! - **policy**: how a changed entry turns into a write decision
//! - **detector**: hash-based change detection
//! - **engine**: the per-entry state machine driving a pass

mod detector;
mod engine;
mod policy;

pub use detector::{Change, ChangeDetector};
pub use engine::{
    Direction, EntryOutcome, SyncEngine, SyncEntry, SyncReport, SyncReporter, SyncState, Verdict,
};
pub use policy::{Action, CopyPolicy, WriteMode};
