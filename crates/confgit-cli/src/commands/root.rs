//! Show, set or reset the root of the current repository

use std::path::Path;

use confgit_core::ScopeResolver;

use crate::context::Context;
use crate::error::Result;

pub fn run_root(context: &Context, path: Option<&Path>, reset: bool) -> Result<()> {
    let store = context.store()?;
    let resolver = ScopeResolver::new(&store);

    if reset {
        resolver.clear_root()?;
    } else if let Some(path) = path {
        resolver.set_root(path)?;
    } else {
        println!("{}", resolver.get_root()?.display());
    }
    Ok(())
}
