//! Error types for confgit-git

use std::path::PathBuf;

/// Result type for confgit-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in confgit-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] confgit_fs::Error),

    /// The backend process could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend process exited abnormally; stderr is relayed verbatim
    #[error("{command} exited with status {code}{}", stderr_suffix(.stderr))]
    BackendInvocation {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Not a file or symlink: {path}")]
    NotAFile { path: PathBuf },

    #[error("pathspec '{path}' did not match any tracked files")]
    NotTracked { path: String },

    #[error("not removing '{path}' recursively without -r")]
    RecursionRequired { path: String },

    #[error("'{path}' has changes that are not committed (use -f to force removal)")]
    LocalModifications { path: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
