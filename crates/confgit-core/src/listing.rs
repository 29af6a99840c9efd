//! Listing tracked entries with their live attributes

use std::fs;
use std::path::PathBuf;

use confgit_git::{ContentStore, PathFilter};

use crate::Result;
use crate::scope::Scope;

/// Placeholder for the owner and group of a missing live file.
const ABSENT: &str = "-";

/// A tracked entry as it currently exists on the live filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Absolute live path
    pub path: PathBuf,
    /// Raw `st_mode`, `None` if the live file is missing
    pub mode: Option<u32>,
    pub user: String,
    pub group: String,
}

impl ListEntry {
    /// `<mode>\t<user>\t<group>\t<path>`
    pub fn render(&self, octal: bool) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            format_mode(self.mode, octal),
            self.user,
            self.group,
            self.path.display()
        )
    }
}

/// Live attributes of every tracked entry matching `filter`.
pub fn list(store: &dyn ContentStore, scope: &Scope, filter: &PathFilter) -> Result<Vec<ListEntry>> {
    let entries = store.list_tracked(filter)?;
    Ok(entries
        .iter()
        .map(|entry| inspect(scope.absolutize(&entry.path)))
        .collect())
}

fn inspect(path: PathBuf) -> ListEntry {
    match fs::symlink_metadata(&path) {
        Ok(meta) => {
            let (mode, user, group) = owner_of(&meta);
            ListEntry {
                path,
                mode: Some(mode),
                user,
                group,
            }
        }
        Err(_) => ListEntry {
            path,
            mode: None,
            user: ABSENT.to_string(),
            group: ABSENT.to_string(),
        },
    }
}

#[cfg(unix)]
fn owner_of(meta: &fs::Metadata) -> (u32, String, String) {
    use nix::unistd::{Gid, Group, Uid, User};
    use std::os::unix::fs::MetadataExt;

    let user = User::from_uid(Uid::from_raw(meta.uid()))
        .ok()
        .flatten()
        .map(|u| u.name)
        .unwrap_or_else(|| meta.uid().to_string());
    let group = Group::from_gid(Gid::from_raw(meta.gid()))
        .ok()
        .flatten()
        .map(|g| g.name)
        .unwrap_or_else(|| meta.gid().to_string());
    (meta.mode(), user, group)
}

#[cfg(not(unix))]
fn owner_of(meta: &fs::Metadata) -> (u32, String, String) {
    let mode = if meta.file_type().is_symlink() {
        0o120777
    } else if meta.permissions().readonly() {
        0o100444
    } else {
        0o100644
    };
    (mode, ABSENT.to_string(), ABSENT.to_string())
}

/// Render a mode as `ls -l` does, or in octal. Missing files render as
/// blanks of the same width.
pub fn format_mode(mode: Option<u32>, octal: bool) -> String {
    match (mode, octal) {
        (Some(bits), true) => format!("{bits:o}"),
        (Some(bits), false) => mode_string(bits),
        (None, true) => " ".repeat(6),
        (None, false) => " ".repeat(10),
    }
}

/// `ls -l` style mode string, e.g. `-rw-r--r--`.
pub fn mode_string(bits: u32) -> String {
    let kind = match bits & 0o170000 {
        0o010000 => 'p',
        0o020000 => 'c',
        0o040000 => 'd',
        0o060000 => 'b',
        0o100000 => '-',
        0o120000 => 'l',
        0o140000 => 's',
        0o160000 => 'w',
        _ => '?',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let triple = (bits >> shift) & 0o7;
        out.push(if triple & 0o4 != 0 { 'r' } else { '-' });
        out.push(if triple & 0o2 != 0 { 'w' } else { '-' });
        out.push(if triple & 0o1 != 0 { 'x' } else { '-' });
    }

    if bits & 0o1000 != 0 {
        let sticky = if bits & 0o001 != 0 { 't' } else { 'T' };
        out.pop();
        out.push(sticky);
    }
    out
}
