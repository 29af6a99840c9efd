//! list

use confgit_core::listing;

use crate::context::Context;
use crate::error::Result;

pub fn run_list(context: &Context, paths: &[String], octal: bool) -> Result<()> {
    let store = context.store()?;
    let scope = Context::scope(&store)?;
    let filter = context.filter(&scope, paths);

    for entry in listing::list(&store, &scope, &filter)? {
        println!("{}", entry.render(octal));
    }
    Ok(())
}
