//! Content store for confgit mirrors
//!
//! Each mirror is a plain git working tree. This crate exposes the narrow
//! surface the sync engine needs (stage, unstage, list the index with blob
//! hashes, fingerprint live files, read and write local config) behind the
//! [`ContentStore`] trait, implemented in-process with `git2`. Anything else
//! is forwarded to the `git` executable through [`passthrough`].

pub mod error;
pub mod fingerprint;
pub mod git_store;
pub mod passthrough;
pub mod status;
pub mod store;

pub use error::{Error, Result};
pub use fingerprint::{FileMode, Fingerprint, fingerprint_path};
pub use git_store::GitStore;
pub use store::{ContentStore, PathFilter, RemoveOptions, TrackedEntry};
