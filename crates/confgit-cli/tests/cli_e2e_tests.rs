//! End-to-end tests for the `confgit` binary.
//!
//! Every test points `CONFGIT_HOME` at a temporary base directory and sets
//! the root of the current repository to a temporary live tree.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use confgit_test_utils::TestHome;
use confgit_test_utils::git::commit_staged;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn confgit(home: &TestHome) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("confgit"));
    cmd.env("CONFGIT_HOME", home.base())
        .env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .current_dir(home.live());
    cmd
}

fn host() -> String {
    confgit_core::hostname()
}

fn mirror(home: &TestHome, rel: &str) -> PathBuf {
    home.mirror_path(&host(), rel)
}

/// Root the current repository at the live tree and track `files`, committed.
fn tracked(files: &[(&str, &str)]) -> TestHome {
    let home = TestHome::new();
    confgit(&home)
        .arg("root")
        .arg(home.live())
        .assert()
        .success();

    let mut add = confgit(&home);
    add.arg("add");
    for (rel, content) in files {
        home.write_live(rel, content);
        add.arg(rel);
    }
    add.assert().success();
    commit_staged(&mirror(&home, ""), "initial");
    home
}

// ============================================================================
// Help and defaults
// ============================================================================

#[test]
fn help_describes_the_tool() {
    let home = TestHome::new();
    confgit(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mirror configuration files"))
        .stdout(predicate::str::contains("backup"));
}

#[test]
fn no_command_prints_hint_without_touching_base() {
    let home = TestHome::new();
    confgit(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("confgit --help"));
    assert!(!home.base().join("repos").exists());
}

#[test]
fn completions_are_generated() {
    let home = TestHome::new();
    confgit(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confgit"));
}

// ============================================================================
// repo
// ============================================================================

#[test]
fn repo_lists_switches_and_removes() {
    let home = TestHome::new();

    confgit(&home)
        .arg("repo")
        .assert()
        .success()
        .stdout(format!("* {}\n", host()));

    confgit(&home).args(["repo", "zz-laptop"]).assert().success();
    confgit(&home)
        .arg("repo")
        .assert()
        .success()
        .stdout(predicate::str::contains("* zz-laptop"))
        .stdout(predicate::str::contains(format!("  {}", host())));

    confgit(&home)
        .args(["repo", "-d", "zz-laptop"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
    assert!(home.base().join("repos/zz-laptop").is_dir());

    confgit(&home)
        .args(["repo", "-D", "zz-laptop"])
        .assert()
        .success();
    confgit(&home)
        .arg("repo")
        .assert()
        .success()
        .stdout(format!("* {}\n", host()));
}

#[test]
fn repo_rejects_bad_names() {
    let home = TestHome::new();
    confgit(&home)
        .args(["repo", "../escape"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// root
// ============================================================================

#[test]
fn root_show_set_reset() {
    let home = TestHome::new();

    confgit(&home).arg("root").assert().success().stdout("/\n");

    confgit(&home)
        .arg("root")
        .arg(home.live())
        .assert()
        .success();
    confgit(&home)
        .arg("root")
        .assert()
        .success()
        .stdout(format!("{}\n", home.live().display()));

    confgit(&home).args(["root", "-d"]).assert().success();
    confgit(&home).arg("root").assert().success().stdout("/\n");
}

#[test]
fn relative_root_is_refused() {
    let home = TestHome::new();
    confgit(&home)
        .args(["root", "not/absolute"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// add / rm / list / path
// ============================================================================

#[test]
fn add_copies_into_the_mirror() {
    let home = tracked(&[("etc/hosts", "127.0.0.1 localhost\n")]);
    assert_eq!(
        fs::read_to_string(mirror(&home, "etc/hosts")).unwrap(),
        "127.0.0.1 localhost\n"
    );
}

#[test]
fn add_outside_root_warns() {
    let home = tracked(&[("README", "hello\n")]);
    let outside = tempfile::TempDir::new().unwrap();
    fs::write(outside.path().join("x"), "x").unwrap();

    confgit(&home)
        .arg("add")
        .arg(outside.path().join("x"))
        .assert()
        .success()
        .stderr(predicate::str::contains("warning"));
}

#[test]
fn rm_prints_removed_paths_and_keeps_live_files() {
    let home = tracked(&[("README", "hello\n")]);

    confgit(&home)
        .args(["rm", "README"])
        .assert()
        .success()
        .stdout("rm 'README'\n");

    assert!(!mirror(&home, "README").exists());
    assert_eq!(home.read_live("README"), "hello\n");
}

#[test]
fn list_prints_live_paths() {
    let home = tracked(&[("README", "hello\n")]);

    confgit(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            home.live_path("README").display().to_string(),
        ));

    #[cfg(unix)]
    confgit(&home)
        .args(["list", "-8"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("100"));
}

#[test]
fn path_prints_the_mirror() {
    let home = tracked(&[("etc/hosts", "x\n")]);
    let expected = fs::canonicalize(mirror(&home, "etc")).unwrap();

    confgit(&home)
        .args(["path", "etc"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

// ============================================================================
// backup / restore
// ============================================================================

#[test]
fn backup_unchanged_is_silent_about_entries() {
    let home = tracked(&[("README", "hello\n")]);

    confgit(&home)
        .args(["backup", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-->").not())
        .stdout(predicate::str::contains("nothing to commit"));
}

#[test]
fn backup_dry_run_reports_without_writing() {
    let home = tracked(&[("VERSION", "0.1.0\n")]);
    home.write_live("VERSION", "0.1.0-rc1\n");

    confgit(&home)
        .args(["backup", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--> VERSION"));

    assert_eq!(fs::read_to_string(mirror(&home, "VERSION")).unwrap(), "0.1.0\n");
}

#[test]
fn backup_yes_copies_changed_files() {
    let home = tracked(&[("VERSION", "0.1.0\n"), ("README", "hello\n")]);
    home.write_live("VERSION", "0.1.0-rc1\n");

    confgit(&home)
        .args(["backup", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--> VERSION"))
        .stdout(predicate::str::contains("--> README").not())
        .stdout(predicate::str::contains("Changes not staged for commit"));

    assert_eq!(
        fs::read_to_string(mirror(&home, "VERSION")).unwrap(),
        "0.1.0-rc1\n"
    );
}

#[test]
fn backup_reports_missing_sources() {
    let home = tracked(&[("VERSION", "0.1.0\n")]);
    fs::remove_file(home.live_path("VERSION")).unwrap();

    confgit(&home)
        .args(["backup", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[?] VERSION"));

    assert_eq!(fs::read_to_string(mirror(&home, "VERSION")).unwrap(), "0.1.0\n");
}

#[test]
fn interactive_backup_reads_answer_from_stdin() {
    let home = tracked(&[("VERSION", "0.1.0\n")]);
    home.write_live("VERSION", "0.1.0-rc1\n");

    confgit(&home)
        .arg("backup")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("--> VERSION [y/N]"));
    assert_eq!(fs::read_to_string(mirror(&home, "VERSION")).unwrap(), "0.1.0\n");

    confgit(&home)
        .arg("backup")
        .write_stdin("y\n")
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(mirror(&home, "VERSION")).unwrap(),
        "0.1.0-rc1\n"
    );
}

#[test]
fn interactive_backup_treats_eof_as_no() {
    let home = tracked(&[("VERSION", "0.1.0\n")]);
    home.write_live("VERSION", "0.1.0-rc1\n");

    confgit(&home).arg("backup").assert().success();

    assert_eq!(fs::read_to_string(mirror(&home, "VERSION")).unwrap(), "0.1.0\n");
}

#[test]
fn backup_filter_limits_the_pass() {
    let home = tracked(&[("a/one", "1\n"), ("b/two", "2\n")]);
    home.write_live("a/one", "1 changed\n");
    home.write_live("b/two", "2 changed\n");

    confgit(&home)
        .args(["backup", "-y", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--> a/one"))
        .stdout(predicate::str::contains("b/two").not());
}

#[test]
fn restore_writes_live_files() {
    let home = tracked(&[("etc/motd", "welcome\n")]);
    fs::remove_file(home.live_path("etc/motd")).unwrap();

    confgit(&home)
        .args(["restore", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<-- etc/motd"));

    assert_eq!(home.read_live("etc/motd"), "welcome\n");
}

#[test]
fn dry_run_and_yes_conflict() {
    let home = TestHome::new();
    confgit(&home)
        .args(["restore", "-n", "-y"])
        .assert()
        .failure();
}

// ============================================================================
// Passthrough
// ============================================================================

#[test]
fn unknown_commands_run_git_in_the_mirror() {
    let home = tracked(&[("etc/hosts", "x\n")]);

    confgit(&home)
        .arg("ls-files")
        .assert()
        .success()
        .stdout("etc/hosts\n");
}

#[test]
fn passthrough_rewrites_absolute_live_paths() {
    let home = tracked(&[("etc/hosts", "x\n"), ("etc/motd", "y\n")]);

    confgit(&home)
        .arg("ls-files")
        .arg(home.live_path("etc/motd"))
        .assert()
        .success()
        .stdout("etc/motd\n");
}

#[test]
fn failing_git_command_keeps_its_status() {
    let home = tracked(&[("README", "x\n")]);

    confgit(&home)
        .args(["rev-parse", "--verify", "no-such-ref"])
        .assert()
        .failure()
        .code(128)
        .stderr(predicate::str::contains("error"));
}
