//! Human-readable working tree summary
//!
//! Mirrors the long format of `git status` closely enough for a user
//! reading it after a backup pass: branch header, staged changes, unstaged
//! changes, untracked files, and a one-line verdict.

use std::fmt::Write as _;

use git2::{ErrorCode, Repository, Status, StatusEntry, StatusOptions};

use crate::Result;

const STAGED: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE);

const UNSTAGED: Status = Status::WT_MODIFIED
    .union(Status::WT_DELETED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE);

/// Render the status of `repo` as multi-line text.
pub fn render(repo: &Repository) -> Result<String> {
    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .renames_head_to_index(true);
    let statuses = repo.statuses(Some(&mut options))?;

    let mut staged = Vec::new();
    let mut unstaged = Vec::new();
    let mut untracked = Vec::new();
    for entry in statuses.iter() {
        let status = entry.status();
        if status.intersects(STAGED) {
            staged.push(describe_staged(&entry, status));
        }
        if status.intersects(UNSTAGED) {
            unstaged.push(describe_unstaged(&entry, status));
        }
        if status.contains(Status::WT_NEW) {
            untracked.push(entry_path(&entry));
        }
    }

    let (branch, unborn) = branch_header(repo)?;

    let mut out = String::new();
    let _ = writeln!(out, "{branch}");
    if unborn {
        let _ = writeln!(out, "\nNo commits yet");
    }

    write_section(&mut out, "Changes to be committed:", &staged);
    write_section(&mut out, "Changes not staged for commit:", &unstaged);
    if !untracked.is_empty() {
        let _ = writeln!(out, "\nUntracked files:");
        for path in &untracked {
            let _ = writeln!(out, "\t{path}");
        }
    }

    let summary = verdict(
        !staged.is_empty(),
        !unstaged.is_empty(),
        !untracked.is_empty(),
        unborn,
    );
    if !summary.is_empty() {
        let _ = write!(out, "\n{summary}\n");
    }
    Ok(out)
}

fn branch_header(repo: &Repository) -> Result<(String, bool)> {
    match repo.head() {
        Ok(head) if repo.head_detached()? => {
            let short = head
                .target()
                .map(|oid| oid.to_string()[..7].to_string())
                .unwrap_or_default();
            Ok((format!("HEAD detached at {short}"), false))
        }
        Ok(head) => Ok((
            format!("On branch {}", head.shorthand().unwrap_or("HEAD")),
            false,
        )),
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD")?;
            let name = head
                .symbolic_target()
                .map(|target| target.trim_start_matches("refs/heads/").to_string())
                .unwrap_or_else(|| "HEAD".to_string());
            Ok((format!("On branch {name}"), true))
        }
        Err(e) => Err(e.into()),
    }
}

fn write_section(out: &mut String, title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}");
    for line in lines {
        let _ = writeln!(out, "\t{line}");
    }
}

fn verdict(staged: bool, unstaged: bool, untracked: bool, unborn: bool) -> &'static str {
    match (staged, unstaged, untracked) {
        (true, _, _) => "",
        (false, true, _) => "no changes added to commit",
        (false, false, true) => "nothing added to commit but untracked files present",
        (false, false, false) if unborn => "nothing to commit",
        (false, false, false) => "nothing to commit, working tree clean",
    }
}

fn entry_path(entry: &StatusEntry<'_>) -> String {
    entry.path().unwrap_or_default().to_string()
}

fn labelled(label: &str, path: &str) -> String {
    format!("{:<12}{path}", format!("{label}:"))
}

fn describe_staged(entry: &StatusEntry<'_>, status: Status) -> String {
    if status.contains(Status::INDEX_RENAMED)
        && let Some(delta) = entry.head_to_index()
    {
        let old = delta.old_file().path().map(|p| p.display().to_string());
        let new = delta.new_file().path().map(|p| p.display().to_string());
        if let (Some(old), Some(new)) = (old, new) {
            return labelled("renamed", &format!("{old} -> {new}"));
        }
    }

    let label = if status.contains(Status::INDEX_NEW) {
        "new file"
    } else if status.contains(Status::INDEX_DELETED) {
        "deleted"
    } else if status.contains(Status::INDEX_TYPECHANGE) {
        "typechange"
    } else {
        "modified"
    };
    labelled(label, &entry_path(entry))
}

fn describe_unstaged(entry: &StatusEntry<'_>, status: Status) -> String {
    let label = if status.contains(Status::WT_DELETED) {
        "deleted"
    } else if status.contains(Status::WT_TYPECHANGE) {
        "typechange"
    } else if status.contains(Status::WT_RENAMED) {
        "renamed"
    } else {
        "modified"
    };
    labelled(label, &entry_path(entry))
}
