//! Content fingerprints
//!
//! A fingerprint pairs git's file-mode class with the blob hash of the
//! content, so it can be compared directly with what the index records.
//! Flipping a file between regular and executable changes the fingerprint
//! even when the bytes are identical.

use std::fmt;
use std::fs;
use std::path::Path;

use git2::{ObjectType, Oid};

use crate::{Error, Result};

/// File-mode class as recorded by git.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// `100644`
    Regular,
    /// `100755`
    Executable,
    /// `120000`
    Symlink,
}

impl FileMode {
    /// Map a raw index mode to a class. Gitlinks and trees yield `None`.
    pub fn from_raw(mode: u32) -> Option<Self> {
        match mode {
            0o100644 => Some(Self::Regular),
            0o100755 => Some(Self::Executable),
            0o120000 => Some(Self::Symlink),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::Regular => 0o100644,
            Self::Executable => 0o100755,
            Self::Symlink => 0o120000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "100644",
            Self::Executable => "100755",
            Self::Symlink => "120000",
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode class plus blob hash, rendered as `"<mode> <hash>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    mode: FileMode,
    oid: Oid,
}

impl Fingerprint {
    pub fn new(mode: FileMode, oid: Oid) -> Self {
        Self { mode, oid }
    }

    /// Fingerprint of in-memory content.
    pub fn of_bytes(mode: FileMode, bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(mode, Oid::hash_object(ObjectType::Blob, bytes)?))
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn oid(&self) -> Oid {
        self.oid
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mode, self.oid)
    }
}

/// Fingerprint the file or symlink at `path`.
///
/// A symlink is hashed over its target text, never over what it points at,
/// so dangling links fingerprint fine.
pub fn fingerprint_path(path: &Path) -> Result<Fingerprint> {
    let meta = fs::symlink_metadata(path).map_err(|e| confgit_fs::Error::io(path, e))?;
    let file_type = meta.file_type();

    if file_type.is_symlink() {
        let target = fs::read_link(path).map_err(|e| confgit_fs::Error::io(path, e))?;
        return Fingerprint::of_bytes(FileMode::Symlink, &link_target_bytes(&target));
    }

    if !file_type.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let mode = if is_executable(&meta) {
        FileMode::Executable
    } else {
        FileMode::Regular
    };
    let content = fs::read(path).map_err(|e| confgit_fs::Error::io(path, e))?;
    Fingerprint::of_bytes(mode, &content)
}

#[cfg(unix)]
fn link_target_bytes(target: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    target.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn link_target_bytes(target: &Path) -> Vec<u8> {
    target.to_string_lossy().replace('\\', "/").into_bytes()
}

/// Git only looks at the owner execute bit.
#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    false
}
