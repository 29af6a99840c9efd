//! Forward commands to external programs inside a mirror
//!
//! Anything the typed command table does not handle is handed to the `git`
//! executable verbatim. A few named external tools (a tree printer, a
//! history browser) go through the same path.

use std::path::Path;
use std::process::Command;

use crate::{Error, Result};

const GIT: &str = "git";

/// Run `git <args>` in `workdir` with inherited stdio.
pub fn run_git(workdir: &Path, args: &[String]) -> Result<()> {
    run_program(workdir, GIT, args)
}

/// Run `program <args>` in `workdir` with inherited stdio.
///
/// The child writes straight to the terminal, so a failure carries only the
/// exit code.
pub fn run_program(workdir: &Path, program: &str, args: &[String]) -> Result<()> {
    let command = describe(program, args);
    tracing::debug!(command = %command, dir = %workdir.display(), "Running");

    let status = Command::new(program)
        .args(args)
        .current_dir(workdir)
        .status()
        .map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::BackendInvocation {
            command,
            code: status.code().unwrap_or(-1),
            stderr: String::new(),
        })
    }
}

fn describe(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let temp = TempDir::new().unwrap();
        let err = run_program(temp.path(), "confgit-no-such-program", &[]).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn describe_joins_program_and_args() {
        assert_eq!(
            describe("git", &["log".to_string(), "--oneline".to_string()]),
            "git log --oneline"
        );
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_carries_the_code() {
        let temp = TempDir::new().unwrap();
        let err = run_program(temp.path(), "sh", &["-c".to_string(), "exit 3".to_string()])
            .unwrap_err();
        match err {
            Error::BackendInvocation { code, .. } => assert_eq!(code, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
