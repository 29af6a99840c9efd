//! Error types for confgit-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from confgit-core
    #[error(transparent)]
    Core(#[from] confgit_core::Error),

    /// Error from confgit-fs
    #[error(transparent)]
    Fs(#[from] confgit_fs::Error),

    /// Error from the content store
    #[error(transparent)]
    Store(#[from] confgit_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Process exit status for this error. A forwarded command that failed
    /// keeps its own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Store(confgit_git::Error::BackendInvocation { code, .. }) if *code > 0 => *code,
            _ => 1,
        }
    }
}
