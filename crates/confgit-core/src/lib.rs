//! Core orchestration layer for confgit
//!
//! This crate sits between the Layer 0 crates and the CLI:
//!
//! - **RepositorySet**: named mirrors behind a single "current" pointer
//! - **ScopeResolver**: the live subtree a repository mirrors
//! - **SyncEngine**: hash-based backup and restore passes under a write policy
//! - **files** / **listing**: add, remove and list tracked entries
//!
//! # Architecture
//!
//! ```text
//!          confgit-cli
//!               |
//!          confgit-core
//!               |
//!      +--------+--------+
//!      |                 |
//!  confgit-fs       confgit-git
//! ```
//!
//! # Example
//!
//! ```no_run
//! use confgit_core::{CopyPolicy, Direction, ScopeResolver, SyncEngine, WriteMode, Workspace};
//! use confgit_git::PathFilter;
//! # struct Quiet;
//! # impl confgit_core::SyncReporter for Quiet {
//! #     fn missing(&mut self, _: &confgit_core::SyncEntry) {}
//! #     fn changed(&mut self, _: &confgit_core::SyncEntry) {}
//! #     fn confirm(&mut self, _: &confgit_core::SyncEntry) -> bool { false }
//! #     fn failed(&mut self, _: &confgit_core::SyncEntry, _: &confgit_core::Error) {}
//! # }
//!
//! fn backup() -> confgit_core::Result<()> {
//!     let workspace = Workspace::open(Workspace::default_base()?)?;
//!     let store = workspace.current_store()?;
//!     let scope = ScopeResolver::new(&store).scope()?;
//!     let engine = SyncEngine::new(&store, scope, CopyPolicy::new(WriteMode::AssumeYes));
//!     let report = engine.run(Direction::Backup, &PathFilter::All, &mut Quiet)?;
//!     println!("{} copied", report.copied());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod files;
pub mod listing;
pub mod repository;
pub mod scope;
pub mod settings;
pub mod sync;
pub mod workspace;

pub use error::{Error, Result};
pub use files::{AddOutcome, AddWarning};
pub use listing::ListEntry;
pub use repository::{Repository, RepositorySet};
pub use scope::{ROOT_CONFIG_KEY, Scope, ScopeResolver};
pub use settings::Settings;
pub use sync::{
    Action, Change, ChangeDetector, CopyPolicy, Direction, EntryOutcome, SyncEngine, SyncEntry,
    SyncReport, SyncReporter, SyncState, Verdict, WriteMode,
};
pub use workspace::{Workspace, hostname};
