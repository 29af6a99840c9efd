//! Write-permission checks against the real user id
//!
//! `access(2)` is used instead of inspecting mode bits so ACLs, read-only
//! mounts and root's override are all taken into account. It checks the
//! real (not effective) uid, which is what matters when the tool runs under
//! `sudo` to restore files owned by another user.

use std::path::Path;

/// True if the real user may write to the existing entry at `path`.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}

/// True if a copy to `path` can proceed without elevated privileges.
///
/// An existing destination must itself be writable, or be removable from a
/// writable parent (the copier unlinks locked destinations first). A missing
/// destination needs its nearest existing ancestor directory to be writable.
pub fn destination_writable(path: &Path) -> bool {
    if crate::exists_or_symlink(path) {
        if is_writable(path) {
            return true;
        }
        return path.parent().map(is_writable).unwrap_or(false);
    }

    let mut ancestor = path.parent();
    while let Some(dir) = ancestor {
        if crate::exists_or_symlink(dir) {
            return dir.is_dir() && is_writable(dir);
        }
        ancestor = dir.parent();
    }
    false
}
