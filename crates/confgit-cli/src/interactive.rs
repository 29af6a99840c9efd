//! Terminal reporting for backup and restore
//!
//! Prints one colored marker line per reported entry and asks for
//! confirmation with dialoguer when attached to a terminal. Piped stdin is
//! read line by line so answers can be scripted.

use std::io::{self, BufRead, IsTerminal, Write};

use colored::{ColoredString, Colorize};
use dialoguer::Confirm;
use dialoguer::console::Term;

use confgit_core::{SyncEntry, SyncReporter};

use crate::context::warn;
use crate::error::Result;

/// [`SyncReporter`] writing to the terminal.
///
/// A prompt that fails stops further prompting; every later entry is
/// answered no and the error is returned by [`TerminalReporter::finish`].
pub struct TerminalReporter {
    interactive: bool,
    tty: bool,
    prompt_error: Option<dialoguer::Error>,
}

impl TerminalReporter {
    /// `interactive` must match the policy of the pass so marker lines are
    /// not printed twice when a prompt follows.
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            tty: io::stdin().is_terminal() && io::stdout().is_terminal(),
            prompt_error: None,
        }
    }

    /// Surface a prompt failure once the pass is over.
    pub fn finish(self) -> Result<()> {
        match self.prompt_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn marker_line(entry: &SyncEntry) -> String {
        let marker = entry.direction.marker();
        let marker: ColoredString = if entry.writable {
            marker.blue().bold()
        } else {
            marker.magenta().bold()
        };
        format!("{} {}", marker, entry.path)
    }

    fn confirm_tty(line: &str) -> std::result::Result<bool, dialoguer::Error> {
        let answer = Confirm::new()
            .with_prompt(line)
            .default(false)
            .wait_for_newline(true)
            .interact_on_opt(&Term::stdout())?;
        Ok(answer.unwrap_or(false))
    }

    fn confirm_piped(line: &str) -> bool {
        print!("{line} [y/N] ");
        // A failed flush only garbles the prompt; the answer is still read
        let _ = io::stdout().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) => {
                println!();
                false
            }
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn(&e);
                false
            }
        }
    }
}

impl SyncReporter for TerminalReporter {
    fn missing(&mut self, entry: &SyncEntry) {
        println!("{} {}", "[?]".red().bold(), entry.path);
    }

    fn changed(&mut self, entry: &SyncEntry) {
        if !self.interactive {
            println!("{}", Self::marker_line(entry));
        }
    }

    fn confirm(&mut self, entry: &SyncEntry) -> bool {
        if self.prompt_error.is_some() {
            return false;
        }
        let line = Self::marker_line(entry);
        if !self.tty {
            return Self::confirm_piped(&line);
        }
        match Self::confirm_tty(&line) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(path = %entry.path, error = %e, "Prompt failed");
                self.prompt_error = Some(e);
                false
            }
        }
    }

    fn failed(&mut self, entry: &SyncEntry, error: &confgit_core::Error) {
        warn(&format!("{}: {}", entry.path, error));
    }
}

/// `y` or `yes`, any case. Everything else, including a bare newline, is no.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
