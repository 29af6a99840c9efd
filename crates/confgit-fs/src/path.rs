//! Lexical path handling
//!
//! Paths are never canonicalized here: symlinked configuration files must be
//! addressed by the name the user sees, not by their target.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// A `..` that would climb above the root of an absolute path is dropped,
/// matching how the kernel resolves `/..`. For relative paths leading `..`
/// components are preserved.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Make `path` absolute against `base` and normalize it lexically.
pub fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// Expand a leading `~` to `home`.
///
/// Only the bare `~` and `~/...` forms are recognized; `~user` is returned
/// unchanged.
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };

    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => home.join(components.as_path()),
        _ => path.to_path_buf(),
    }
}

/// Render a relative path with `/` separators, the form the content store uses.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// True if `path` exists, counting a dangling symlink as existing.
pub fn exists_or_symlink(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// True if `path` is a directory and not a symlink to one.
pub fn is_real_dir(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|meta| meta.file_type().is_dir())
        .unwrap_or(false)
}

/// Validate that `name` is safe to use as a single directory component.
///
/// Rejects empty names, path separators, `.`/`..`, hidden names (reserved for
/// temporary files), leading or trailing whitespace and control characters.
/// `kind` is used in the error message.
pub fn validate_path_identifier(name: &str, kind: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err(format!("{kind} must not be empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!("{kind} '{name}' must not contain path separators"));
    }
    if name.starts_with('.') {
        return Err(format!("{kind} '{name}' must not start with '.'"));
    }
    if name.trim() != name {
        return Err(format!(
            "{kind} '{name}' must not start or end with whitespace"
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(format!("{kind} {name:?} must not contain control characters"));
    }
    Ok(())
}
