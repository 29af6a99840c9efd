//! Commands that run inside the mirror: path, tree, tig and git passthrough

use confgit_git::{ContentStore, passthrough};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Print the canonical path of the current mirror, or of `subdir` in it.
pub fn run_path(context: &Context, subdir: Option<&str>) -> Result<()> {
    let store = context.store()?;
    let mut path = store.workdir().to_path_buf();
    if let Some(subdir) = subdir {
        path.push(subdir);
    }
    let path = dunce::canonicalize(&path)
        .map_err(|e| CliError::user(format!("{}: {}", path.display(), e)))?;
    println!("{}", path.display());
    Ok(())
}

pub fn run_tree(context: &Context, args: &[String]) -> Result<()> {
    let store = context.store()?;
    let mut full = vec!["-I".to_string(), ".git".to_string()];
    full.extend_from_slice(args);
    passthrough::run_program(store.workdir(), "tree", &full)?;
    Ok(())
}

pub fn run_tig(context: &Context, args: &[String]) -> Result<()> {
    let store = context.store()?;
    passthrough::run_program(store.workdir(), "tig", args)?;
    Ok(())
}

/// Forward `args` to git inside the mirror. Absolute live paths under the
/// root are rewritten to their mirror-relative form.
pub fn run_external(context: &Context, args: &[String]) -> Result<()> {
    let store = context.store()?;
    let scope = Context::scope(&store)?;
    let args: Vec<String> = args.iter().map(|arg| scope.mirror_arg(arg)).collect();
    tracing::debug!(?args, "Forwarding to git");
    passthrough::run_git(store.workdir(), &args)?;
    Ok(())
}
