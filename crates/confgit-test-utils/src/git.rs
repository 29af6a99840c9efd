//! Commit helpers for mirror repositories.

use std::path::Path;

use git2::{Oid, Repository, Signature};

/// Commit whatever is staged in the repository at `dir`.
///
/// Uses a fixed identity so tests do not depend on the user's git config.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_staged(dir: &Path, message: &str) -> Oid {
    let repo = Repository::open(dir)
        .unwrap_or_else(|e| panic!("commit_staged: cannot open {}: {e}", dir.display()));
    let mut index = repo
        .index()
        .unwrap_or_else(|e| panic!("commit_staged: cannot read index: {e}"));
    let tree_id = index
        .write_tree()
        .unwrap_or_else(|e| panic!("commit_staged: cannot write tree: {e}"));
    let tree = repo
        .find_tree(tree_id)
        .unwrap_or_else(|e| panic!("commit_staged: cannot find tree: {e}"));
    let signature = Signature::now("Test User", "test@example.com")
        .unwrap_or_else(|e| panic!("commit_staged: bad signature: {e}"));

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )
    .unwrap_or_else(|e| panic!("commit_staged: commit failed: {e}"))
}

/// Paths recorded in the index of the repository at `dir`.
///
/// # Panics
/// Panics if the repository cannot be opened.
pub fn index_paths(dir: &Path) -> Vec<String> {
    let repo = Repository::open(dir)
        .unwrap_or_else(|e| panic!("index_paths: cannot open {}: {e}", dir.display()));
    let index = repo
        .index()
        .unwrap_or_else(|e| panic!("index_paths: cannot read index: {e}"));
    index
        .iter()
        .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
        .collect()
}
