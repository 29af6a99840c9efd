//! Tests for RepositorySet

use std::collections::BTreeMap;
use std::fs;

use confgit_core::{Error, RepositorySet};
use confgit_fs::BaseLayout;
use confgit_git::GitStore;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn open_set(temp: &TempDir, default_name: &str) -> RepositorySet {
    RepositorySet::open(BaseLayout::new(temp.path()), default_name).unwrap()
}

fn snapshot(set: &RepositorySet) -> BTreeMap<String, bool> {
    set.list()
        .unwrap()
        .into_iter()
        .map(|repository| (repository.name, repository.is_current))
        .collect()
}

fn expected(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
    pairs
        .iter()
        .map(|(name, current)| (name.to_string(), *current))
        .collect()
}

fn assert_single_current(set: &RepositorySet) {
    let repositories = set.list().unwrap();
    let current: Vec<_> = repositories.iter().filter(|r| r.is_current).collect();
    assert_eq!(current.len(), 1, "{repositories:?}");
    assert!(GitStore::exists_in(&current[0].path));
}

#[test]
fn open_creates_default_repository() {
    let temp = TempDir::new().unwrap();

    let set = open_set(&temp, "A");

    assert_eq!(snapshot(&set), expected(&[("A", true)]));
    assert_eq!(set.current().unwrap(), "A");
    assert!(GitStore::exists_in(&set.path_of("A")));
    assert_eq!(
        fs::read_to_string(temp.path().join("repos/current")).unwrap(),
        "A\n"
    );
}

#[test]
fn reopening_keeps_the_current_repository() {
    let temp = TempDir::new().unwrap();
    open_set(&temp, "A").switch("B").unwrap();

    let set = open_set(&temp, "A");

    assert_eq!(set.current().unwrap(), "B");
}

#[test]
fn switch_then_remove_non_current() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");

    set.switch("B").unwrap();
    assert_eq!(snapshot(&set), expected(&[("A", false), ("B", true)]));

    set.remove("A", false).unwrap();
    assert_eq!(snapshot(&set), expected(&[("B", true)]));
    assert!(!set.path_of("A").exists());
}

#[test]
fn switch_to_current_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    fs::write(set.path_of("A").join("marker"), "kept").unwrap();

    set.switch("A").unwrap();

    assert_eq!(snapshot(&set), expected(&[("A", true)]));
    assert!(set.path_of("A").join("marker").exists());
}

#[test]
fn switch_reuses_existing_repository() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    set.switch("B").unwrap();
    fs::write(set.path_of("A").join("README"), "hello").unwrap();

    set.switch("A").unwrap();

    assert_eq!(set.current().unwrap(), "A");
    assert_eq!(
        fs::read_to_string(set.path_of("A").join("README")).unwrap(),
        "hello"
    );
}

#[test]
fn remove_current_without_force_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    set.switch("B").unwrap();
    let before = snapshot(&set);

    let err = set.remove("B", false).unwrap_err();

    assert!(matches!(err, Error::CurrentRepositoryInUse { ref name } if name == "B"));
    assert_eq!(snapshot(&set), before);
    assert_eq!(set.current().unwrap(), "B");
}

#[test]
fn force_remove_current_elects_remaining_repository() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    set.switch("B").unwrap();

    set.remove("B", true).unwrap();

    assert_eq!(snapshot(&set), expected(&[("A", true)]));
    assert_single_current(&set);
}

#[test]
fn force_remove_only_repository_creates_fresh_default() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    set.switch("B").unwrap();
    set.remove("A", false).unwrap();

    set.remove("B", true).unwrap();

    assert_eq!(snapshot(&set), expected(&[("A", true)]));
    assert_single_current(&set);
}

#[test]
fn force_remove_recreates_default_with_same_name() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    fs::write(set.path_of("A").join("README"), "old").unwrap();

    set.remove("A", true).unwrap();

    assert_eq!(set.current().unwrap(), "A");
    assert!(!set.path_of("A").join("README").exists());
    assert_single_current(&set);
}

#[test]
fn remove_unknown_repository_fails() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");

    let err = set.remove("nope", true).unwrap_err();

    assert!(matches!(err, Error::RepositoryNotFound { .. }));
    assert_eq!(snapshot(&set), expected(&[("A", true)]));
}

#[test]
fn invalid_names_are_rejected_without_side_effects() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");

    for name in ["", "current", "../escape", ".hidden"] {
        let err = set.switch(name).unwrap_err();
        assert!(matches!(err, Error::InvalidRepositoryName { .. }), "{name}");
    }

    assert_eq!(snapshot(&set), expected(&[("A", true)]));
    assert!(!temp.path().join("escape").exists());
}

#[test]
fn names_with_surrounding_whitespace_are_rejected() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "alpha");

    for name in ["beta ", " beta", "beta\n"] {
        let err = set.switch(name).unwrap_err();
        assert!(matches!(err, Error::InvalidRepositoryName { .. }), "{name:?}");
        assert!(!set.path_of(name).exists(), "{name:?}");
    }

    assert_eq!(set.current().unwrap(), "alpha");
    assert_eq!(snapshot(&set), expected(&[("alpha", true)]));
}

#[test]
fn switched_name_with_inner_space_stays_current() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "alpha");

    set.switch("my laptop").unwrap();

    assert_eq!(set.current().unwrap(), "my laptop");
    assert_eq!(
        snapshot(&set),
        expected(&[("alpha", false), ("my laptop", true)])
    );
    assert_eq!(open_set(&temp, "alpha").current().unwrap(), "my laptop");
}

#[test]
fn creation_failure_leaves_pointer_alone() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    fs::write(set.path_of("C"), "a file in the way").unwrap();

    let err = set.switch("C").unwrap_err();

    assert!(matches!(err, Error::RepositoryCreation { ref name, .. } if name == "C"));
    assert_eq!(set.current().unwrap(), "A");
    assert_eq!(
        fs::read_to_string(set.path_of("C")).unwrap(),
        "a file in the way"
    );
    assert_eq!(snapshot(&set), expected(&[("A", true)]));
}

#[test]
fn list_ignores_pointer_hidden_entries_and_files() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    fs::create_dir(temp.path().join("repos/.trash")).unwrap();
    fs::write(temp.path().join("repos/notes.txt"), "").unwrap();

    assert_eq!(snapshot(&set), expected(&[("A", true)]));
}

#[test]
fn dangling_pointer_is_repaired() {
    let temp = TempDir::new().unwrap();
    let set = open_set(&temp, "A");
    set.switch("B").unwrap();
    fs::remove_dir_all(set.path_of("B")).unwrap();

    let reopened = open_set(&temp, "A");

    assert_eq!(reopened.current().unwrap(), "A");
    assert_single_current(&reopened);
}

#[cfg(unix)]
#[test]
fn legacy_symlink_pointer_is_honoured() {
    let temp = TempDir::new().unwrap();
    let repos = temp.path().join("repos");
    fs::create_dir_all(repos.join("laptop")).unwrap();
    GitStore::init(&repos.join("laptop")).unwrap();
    std::os::unix::fs::symlink("laptop", repos.join("current")).unwrap();

    let set = open_set(&temp, "A");

    assert_eq!(set.current().unwrap(), "laptop");
    assert_eq!(snapshot(&set), expected(&[("laptop", true)]));

    set.switch("desktop").unwrap();
    assert!(
        !fs::symlink_metadata(repos.join("current"))
            .unwrap()
            .file_type()
            .is_symlink()
    );
    assert_eq!(
        snapshot(&set),
        expected(&[("desktop", true), ("laptop", false)])
    );
}
