//! Repository listing, switching and removal

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// What `confgit repo` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoAction {
    List,
    Switch(String),
    Remove { name: String, force: bool },
}

impl RepoAction {
    pub fn from_args(name: Option<String>, remove: bool, force_remove: bool) -> Self {
        match name {
            None => Self::List,
            Some(name) if remove || force_remove => Self::Remove {
                name,
                force: force_remove,
            },
            Some(name) => Self::Switch(name),
        }
    }
}

pub fn run_repo(context: &Context, action: RepoAction) -> Result<()> {
    let repositories = context.workspace().repositories();
    match action {
        RepoAction::List => {
            for repository in repositories.list()? {
                if repository.is_current {
                    println!("{} {}", "*".green().bold(), repository.name.green());
                } else {
                    println!("  {}", repository.name);
                }
            }
        }
        RepoAction::Switch(name) => {
            repositories.switch(&name)?;
            tracing::debug!(%name, "Switched repository");
        }
        RepoAction::Remove { name, force } => {
            repositories.remove(&name, force)?;
            println!("{} repository {}", "Removed".green().bold(), name.cyan());
        }
    }
    Ok(())
}
