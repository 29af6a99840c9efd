//! backup and restore

use colored::Colorize;

use confgit_core::{Direction, SyncEngine};

use crate::cli::SyncArgs;
use crate::context::Context;
use crate::error::Result;
use crate::interactive::TerminalReporter;

pub fn run_sync(context: &Context, direction: Direction, args: &SyncArgs) -> Result<()> {
    let store = context.store()?;
    let scope = Context::scope(&store)?;
    let filter = context.filter(&scope, &args.paths);
    let policy = args.policy();

    let mut reporter = TerminalReporter::new(policy.is_interactive());
    let engine = SyncEngine::new(&store, scope, policy);
    let report = engine.run(direction, &filter, &mut reporter)?;

    tracing::debug!(
        %direction,
        copied = report.copied(),
        changed = report.changed(),
        missing = report.missing(),
        failed = report.failed(),
        "Pass finished"
    );

    if let Some(status) = &report.status {
        println!();
        print!("{status}");
        if !status.ends_with('\n') {
            println!();
        }
    }
    if report.failed() > 0 {
        eprintln!(
            "{} {} of {} entries could not be copied",
            "warning:".yellow().bold(),
            report.failed(),
            report.outcomes.len()
        );
    }
    reporter.finish()
}
