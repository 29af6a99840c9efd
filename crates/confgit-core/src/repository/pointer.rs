//! The `current` record
//!
//! A small text file holding the active repository's name. Older layouts
//! used a symlink named `current` pointing at the repository directory; those
//! are still read and get replaced by a record on the next write.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use confgit_fs::io::write_text;

use crate::Result;

/// Read the active repository name, or `None` if no pointer exists.
pub(crate) fn read(record: &Path) -> Result<Option<String>> {
    let meta = match fs::symlink_metadata(record) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(confgit_fs::Error::io(record, e).into()),
    };

    let name = if meta.file_type().is_symlink() {
        let target = fs::read_link(record).map_err(|e| confgit_fs::Error::io(record, e))?;
        target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        confgit_fs::io::read_text(record)?
            .trim_end_matches(['\n', '\r'])
            .to_string()
    };

    Ok(if name.is_empty() { None } else { Some(name) })
}

/// Atomically point the record at `name`.
pub(crate) fn write(record: &Path, name: &str) -> Result<()> {
    write_text(record, &format!("{name}\n"))?;
    tracing::debug!(record = %record.display(), name, "Updated current repository");
    Ok(())
}

/// Delete the record. A missing record is not an error.
pub(crate) fn clear(record: &Path) -> Result<()> {
    match fs::remove_file(record) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(confgit_fs::Error::io(record, e).into()),
    }
}
