// tests/git_integration_test.rs
//
// Runs against the real git binary; every test returns early when git is not
// installed.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;
use release_tools::config::Config;
use release_tools::git::{Repository, SystemGit};
use release_tools::release::{run_release, ReleaseArgs};
use release_tools::ReleaseError;
use serial_test::serial;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A repository at `<tmp>/proj` on branch `main` with one commit
fn init_repo() -> (TempDir, PathBuf) {
    std::env::set_var("GIT_AUTHOR_NAME", "Release Test");
    std::env::set_var("GIT_AUTHOR_EMAIL", "release@example.com");
    std::env::set_var("GIT_COMMITTER_NAME", "Release Test");
    std::env::set_var("GIT_COMMITTER_EMAIL", "release@example.com");
    std::env::set_var("GIT_EDITOR", "true");

    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("proj");
    fs::create_dir_all(&dir).unwrap();

    git(&dir, &["init", "-q"]);
    git(&dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(&dir, &["config", "tag.gpgSign", "false"]);
    git(&dir, &["config", "commit.gpgSign", "false"]);
    fs::write(dir.join("main.c"), "int main(void) { return 0; }\n").unwrap();
    git(&dir, &["add", "main.c"]);
    git(&dir, &["commit", "-q", "-m", "initial"]);
    (tmp, dir)
}

#[test]
#[serial]
fn test_branch_tags_and_times() {
    if !git_available() {
        return;
    }
    let (_tmp, dir) = init_repo();
    git(&dir, &["tag", "-a", "-m", "r1", "proj-r1"]);
    git(&dir, &["tag", "-a", "-m", "dev", "PROJ-r2dev1"]);
    git(&dir, &["tag", "-a", "-m", "other", "other-r9"]);

    let repo = SystemGit::open(&dir);
    assert_eq!(repo.current_branch().unwrap().as_deref(), Some("main"));

    let mut tags = repo.list_tags("proj-r[1-9]*").unwrap();
    tags.sort();
    assert_eq!(tags, vec!["PROJ-r2dev1", "proj-r1"]);

    let head_time: i64 = git(&dir, &["log", "-1", "--format=%ct"]).parse().unwrap();
    assert_eq!(repo.tag_commit_time("proj-r1").unwrap(), Some(head_time));
    assert_eq!(repo.tag_commit_time("proj-r77").unwrap(), None);
}

#[test]
#[serial]
fn test_detached_head_has_no_branch() {
    if !git_available() {
        return;
    }
    let (_tmp, dir) = init_repo();
    git(&dir, &["checkout", "-q", "--detach"]);

    let repo = SystemGit::open(&dir);
    assert_eq!(repo.current_branch().unwrap(), None);
}

#[test]
#[serial]
fn test_not_a_repository() {
    if !git_available() {
        return;
    }
    let tmp = TempDir::new().unwrap();
    std::env::set_var("GIT_CEILING_DIRECTORIES", tmp.path());

    let repo = SystemGit::open(tmp.path());
    let result = repo.current_branch();
    std::env::remove_var("GIT_CEILING_DIRECTORIES");

    assert!(matches!(result, Err(ReleaseError::NotARepository(_))));
}

#[test]
#[serial]
fn test_has_changes_tracks_working_tree() {
    if !git_available() {
        return;
    }
    let (_tmp, dir) = init_repo();
    let repo = SystemGit::open(&dir);
    assert!(!repo.has_changes().unwrap());

    fs::write(dir.join("main.c"), "int main(void) { return 1; }\n").unwrap();
    assert!(repo.has_changes().unwrap());
}

#[test]
#[serial]
fn test_full_release_then_same_day_re_release() {
    if !git_available() {
        return;
    }
    let (_tmp, dir) = init_repo();
    let repo = SystemGit::open(&dir);
    let config = Config::default();
    let now = Utc::now();

    let args = ReleaseArgs {
        work_dir: dir.clone(),
        revision: String::new(),
        message: "first cut".to_string(),
    };
    let outcome = run_release(&repo, &args, &config, now).unwrap();

    assert_eq!(outcome.tag_name(), "proj-r1");
    assert!(outcome.warnings.is_empty());
    assert_eq!(
        git(&dir, &["log", "-1", "--format=%s"]),
        format!("proj - {}: first cut", outcome.version())
    );
    assert_eq!(git(&dir, &["tag", "-l", "proj-r*"]), "proj-r1");
    assert!(dir.join("version.h").exists());
    assert!(!dir.join("version.h.bak").exists());
    let commits = git(&dir, &["rev-list", "--count", "HEAD"]);

    // same revision at the same instant regenerates an identical file, so the
    // release commit is amended
    let again = ReleaseArgs {
        revision: "1".to_string(),
        ..args
    };
    let outcome = run_release(&repo, &again, &config, now).unwrap();
    assert!(outcome.resolution.re_release);
    assert_eq!(git(&dir, &["rev-list", "--count", "HEAD"]), commits);
    assert_eq!(
        git(&dir, &["rev-parse", "proj-r1^{commit}"]),
        git(&dir, &["rev-parse", "HEAD"])
    );
}

#[test]
#[serial]
fn test_make_release_reports_same_day_re_release() {
    if !git_available() {
        return;
    }
    let (_tmp, dir) = init_repo();
    let make_release = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_make-release"))
            .args(args)
            .current_dir(&dir)
            .output()
            .expect("Failed to execute make-release")
    };

    let first = make_release(&["-m", "first cut"]);
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert!(!String::from_utf8_lossy(&first.stdout).contains("re-releasing"));

    let again = make_release(&["-r", "1", "-m", "again"]);
    assert!(again.status.success(), "{}", String::from_utf8_lossy(&again.stderr));
    let stdout = String::from_utf8_lossy(&again.stdout);
    assert!(stdout.contains("re-releasing proj-r1"), "got: {}", stdout);
}

#[test]
#[serial]
fn test_make_release_outside_repository_fails() {
    let tmp = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_make-release"))
        .args(["-m", "nothing to release"])
        .current_dir(tmp.path())
        .env("GIT_CEILING_DIRECTORIES", tmp.path())
        .output()
        .expect("Failed to execute make-release");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "got: {}", stderr);
    assert!(!tmp.path().join("version.h").exists());
}

#[test]
fn test_make_release_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_make-release"))
        .arg("--help")
        .output()
        .expect("Failed to execute make-release");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--revision"));
    assert!(stdout.contains("--message"));
}
