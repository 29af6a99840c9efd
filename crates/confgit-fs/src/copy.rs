//! Attribute-preserving copy of a single file or symlink
//!
//! Regular files keep their content, permission bits and access/modification
//! times. Symlinks are recreated with the verbatim target string; their own
//! times and modes are left alone since most filesystems cannot carry them.

use std::fs;
use std::path::Path;

use filetime::{FileTime, set_file_times};

use crate::{Error, Result, access, exists_or_symlink};

/// Copy `from` to `to`, preserving entry type and attributes.
///
/// Missing parent directories of `to` are created. An existing destination
/// the real user cannot write to is unlinked before copying, so restored
/// files that were locked down (mode 0444 and friends) can be replaced.
///
/// Callers decide how to treat failures: the sync pass reports them and moves
/// on, while `add` aborts.
pub fn copy_entry(from: &Path, to: &Path) -> Result<()> {
    let err = |source: std::io::Error| Error::copy(from, to, source);

    let source_meta = fs::symlink_metadata(from).map_err(err)?;
    let source_type = source_meta.file_type();

    if source_type.is_dir() {
        return Err(err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "source is a directory",
        )));
    }

    if let Some(parent) = to.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(err)?;
    }

    prepare_destination(to, source_type.is_symlink()).map_err(err)?;

    if source_type.is_symlink() {
        let target = fs::read_link(from).map_err(err)?;
        make_symlink(&target, to).map_err(err)?;
        tracing::debug!(from = %from.display(), to = %to.display(), target = %target.display(), "Copied symlink");
        return Ok(());
    }

    fs::copy(from, to).map_err(err)?;

    let accessed = FileTime::from_last_access_time(&source_meta);
    let modified = FileTime::from_last_modification_time(&source_meta);
    set_file_times(to, accessed, modified).map_err(err)?;
    fs::set_permissions(to, source_meta.permissions()).map_err(err)?;

    tracing::debug!(from = %from.display(), to = %to.display(), "Copied file");
    Ok(())
}

/// Clear the way for the copy.
///
/// Symlinks at the destination are always removed: writing through one
/// would modify its target instead of the mirror. Locked files are removed
/// so the copy does not fail on permissions.
fn prepare_destination(to: &Path, source_is_symlink: bool) -> std::io::Result<()> {
    if !exists_or_symlink(to) {
        return Ok(());
    }

    let meta = fs::symlink_metadata(to)?;
    if meta.file_type().is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "destination is a directory",
        ));
    }

    if meta.file_type().is_symlink() || source_is_symlink || !access::is_writable(to) {
        fs::remove_file(to)?;
    }
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    let resolved = link.parent().map(|p| p.join(target));
    match resolved {
        Some(path) if path.is_dir() => std::os::windows::fs::symlink_dir(target, link),
        _ => std::os::windows::fs::symlink_file(target, link),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn mode_of(path: &Path) -> u32 {
        fs::symlink_metadata(path).unwrap().permissions().mode() & 0o7777
    }

    #[test]
    fn copies_content_mode_and_mtime() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("live/.profile");
        let to = temp.path().join("mirror/home/.profile");
        fs::create_dir_all(from.parent().unwrap()).unwrap();
        fs::write(&from, "export EDITOR=vi\n").unwrap();
        fs::set_permissions(&from, fs::Permissions::from_mode(0o750)).unwrap();
        let mtime = FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_mtime(&from, mtime).unwrap();

        copy_entry(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(&to).unwrap(), "export EDITOR=vi\n");
        assert_eq!(mode_of(&to), 0o750);
        let copied = FileTime::from_last_modification_time(&fs::metadata(&to).unwrap());
        assert_eq!(copied, mtime);
    }

    #[test]
    fn recreates_symlink_with_verbatim_target() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("link");
        let to = temp.path().join("mirror/link");
        std::os::unix::fs::symlink("../relative/target", &from).unwrap();

        copy_entry(&from, &to).unwrap();

        assert!(fs::symlink_metadata(&to).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_link(&to).unwrap(),
            Path::new("../relative/target")
        );
    }

    #[test]
    fn replaces_existing_symlink_without_touching_its_target() {
        let temp = TempDir::new().unwrap();
        let victim = temp.path().join("victim");
        fs::write(&victim, "keep me").unwrap();
        let to = temp.path().join("dest");
        std::os::unix::fs::symlink(&victim, &to).unwrap();
        let from = temp.path().join("src");
        fs::write(&from, "new").unwrap();

        copy_entry(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(&victim).unwrap(), "keep me");
        assert!(!fs::symlink_metadata(&to).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&to).unwrap(), "new");
    }

    #[test]
    fn overwrites_read_only_destination() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("src");
        let to = temp.path().join("dest");
        fs::write(&from, "fresh").unwrap();
        fs::write(&to, "stale").unwrap();
        fs::set_permissions(&to, fs::Permissions::from_mode(0o444)).unwrap();

        copy_entry(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(&to).unwrap(), "fresh");
    }

    #[test]
    fn directory_source_is_a_copy_error() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("dir");
        fs::create_dir(&from).unwrap();

        let err = copy_entry(&from, &temp.path().join("dest")).unwrap_err();
        assert!(matches!(err, Error::Copy { .. }));
    }

    #[test]
    fn missing_source_is_a_copy_error() {
        let temp = TempDir::new().unwrap();
        let to = temp.path().join("dest");

        let err = copy_entry(&temp.path().join("absent"), &to).unwrap_err();

        assert!(matches!(err, Error::Copy { .. }));
        assert!(!exists_or_symlink(&to));
    }
}
