//! add and rm

use confgit_git::RemoveOptions;

use crate::context::{Context, warn};
use crate::error::Result;

pub fn run_add(context: &Context, paths: &[String]) -> Result<()> {
    let store = context.store()?;
    let scope = Context::scope(&store)?;

    let outcome = confgit_core::files::add(&store, &scope, context.cwd(), paths)?;
    for warning in &outcome.warnings {
        warn(warning);
    }
    Ok(())
}

pub fn run_rm(context: &Context, paths: &[String], recursive: bool, force: bool) -> Result<()> {
    let store = context.store()?;
    let scope = Context::scope(&store)?;

    let removed = confgit_core::files::remove(
        &store,
        &scope,
        context.cwd(),
        paths,
        RemoveOptions { recursive, force },
    )?;
    for path in removed {
        println!("rm '{path}'");
    }
    Ok(())
}
