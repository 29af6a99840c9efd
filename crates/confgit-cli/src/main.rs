//! confgit CLI
//!
//! Mirrors configuration files between the live filesystem and per-machine
//! git repositories.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use confgit_core::Direction;

use cli::{Cli, Commands};
use commands::repo::RepoAction;
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
            Ok(())
        }
        Some(cmd) => {
            let context = Context::open(cli.base.as_deref())?;
            execute_command(&context, cmd)
        }
        None => {
            println!(
                "{} Mirror configuration files into git",
                "confgit".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "confgit --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(context: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Repo {
            name,
            remove,
            force_remove,
        } => commands::run_repo(context, RepoAction::from_args(name, remove, force_remove)),
        Commands::Root { path, reset } => commands::run_root(context, path.as_deref(), reset),
        Commands::Add { paths } => commands::run_add(context, &paths),
        Commands::Rm {
            recursive,
            force,
            paths,
        } => commands::run_rm(context, &paths, recursive, force),
        Commands::Backup(args) => commands::run_sync(context, Direction::Backup, &args),
        Commands::Restore(args) => commands::run_sync(context, Direction::Restore, &args),
        Commands::List { octal, paths } => commands::run_list(context, &paths, octal),
        Commands::Path { subdir } => commands::run_path(context, subdir.as_deref()),
        Commands::Tree { args } => commands::run_tree(context, &args),
        Commands::Tig { args } => commands::run_tig(context, &args),
        Commands::External(args) => commands::run_external(context, &args),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

fn cmd_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "confgit", &mut std::io::stdout());
}
