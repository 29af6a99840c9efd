//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use confgit_core::{CopyPolicy, WriteMode};

/// confgit - Mirror configuration files into per-machine git repositories
#[derive(Parser, Debug)]
#[command(name = "confgit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base directory holding settings and repositories [default: ~/.etc/confgit]
    #[arg(long, global = true, env = "CONFGIT_HOME", value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Anything else is forwarded to git inside the mirror.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List repositories, switch to one, or remove one
    ///
    /// Examples:
    ///   confgit repo              # List, current marked with *
    ///   confgit repo laptop       # Switch (created on first use)
    ///   confgit repo -d desktop   # Remove a non-current repository
    ///   confgit repo -D laptop    # Remove even if current
    Repo {
        /// Repository name
        name: Option<String>,

        /// Remove the repository
        #[arg(short = 'd', requires = "name")]
        remove: bool,

        /// Remove the repository even if it is current
        #[arg(short = 'D', requires = "name", conflicts_with = "remove")]
        force_remove: bool,
    },

    /// Show, set or reset the root the mirror is relative to
    Root {
        /// New root (absolute, `~` allowed)
        path: Option<PathBuf>,

        /// Reset the root to /
        #[arg(short = 'd', conflicts_with = "path")]
        reset: bool,
    },

    /// Copy files into the mirror and stage them
    Add {
        /// Files or directories to add
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Remove files from the mirror (live files are kept)
    Rm {
        /// Allow removing directories
        #[arg(short)]
        recursive: bool,

        /// Remove even with uncommitted changes
        #[arg(short)]
        force: bool,

        /// Files or directories to remove
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Copy changed live files into the mirror
    Backup(SyncArgs),

    /// Copy changed mirror files back to the live filesystem
    Restore(SyncArgs),

    /// List tracked files with their live mode, owner and group
    List {
        /// Show modes in octal
        #[arg(short = '8')]
        octal: bool,

        /// Limit to these paths
        paths: Vec<String>,
    },

    /// Print the path of the current mirror
    Path {
        /// Subdirectory inside the mirror
        subdir: Option<String>,
    },

    /// Show the mirror as a tree (requires `tree`)
    Tree {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Browse the mirror history (requires `tig`)
    Tig {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   confgit completions bash > ~/.local/share/bash-completion/completions/confgit
    ///   confgit completions zsh > ~/.zfunc/_confgit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Run any other git command inside the mirror
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Options shared by backup and restore.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    /// Show what would be copied without copying
    #[arg(short = 'n', long, conflicts_with = "yes")]
    pub dry_run: bool,

    /// Copy without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Treat every file as changed
    #[arg(short, long)]
    pub force: bool,

    /// Limit to these paths
    pub paths: Vec<String>,
}

impl SyncArgs {
    pub fn policy(&self) -> CopyPolicy {
        let mode = if self.dry_run {
            WriteMode::DryRun
        } else if self.yes {
            WriteMode::AssumeYes
        } else {
            WriteMode::Interactive
        };
        CopyPolicy::new(mode).with_force(self.force)
    }
}
