//! Error types for confgit-core

use std::path::PathBuf;

/// Result type for confgit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in confgit-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Removal of the active repository was refused
    #[error("repository '{name}' is the current repository (use force to remove it)")]
    CurrentRepositoryInUse { name: String },

    /// A path lies outside the configured root
    #[error("{path} is outside of root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("invalid repository name '{name}': {reason}")]
    InvalidRepositoryName { name: String, reason: String },

    /// A new repository could not be initialized; nothing was left behind
    #[error("cannot create repository '{name}': {reason}")]
    RepositoryCreation { name: String, reason: String },

    #[error("root must be an absolute path: {path}")]
    InvalidRoot { path: String },

    #[error("no such repository '{name}'")]
    RepositoryNotFound { name: String },

    /// `add` found nothing to copy
    #[error("nothing to add")]
    NothingToAdd,

    #[error("cannot determine the home directory")]
    NoHomeDirectory,

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from confgit-fs
    #[error(transparent)]
    Fs(#[from] confgit_fs::Error),

    /// Content store error from confgit-git
    #[error(transparent)]
    Store(#[from] confgit_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
