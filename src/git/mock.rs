use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::git::{CommitMode, Repository};

/// Mock repository for testing without actual git operations
///
/// Mutating operations are recorded so tests can assert on them.
#[derive(Debug, Default)]
pub struct MockRepository {
    branch: Option<String>,
    tags: BTreeMap<String, i64>,
    changes: bool,
    fail_commit: bool,
    fail_tag: bool,
    staged: Mutex<Vec<PathBuf>>,
    commits: Mutex<Vec<(CommitMode, i64)>>,
    created_tags: Mutex<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create an empty mock on branch `main` with pending changes
    pub fn new() -> Self {
        MockRepository {
            branch: Some("main".to_string()),
            changes: true,
            ..Default::default()
        }
    }

    /// Set the checked-out branch; `None` simulates a detached HEAD
    pub fn set_branch(&mut self, branch: Option<&str>) {
        self.branch = branch.map(str::to_string);
    }

    /// Add a tag whose commit was made at `commit_time` (epoch seconds)
    pub fn add_tag(&mut self, name: impl Into<String>, commit_time: i64) {
        self.tags.insert(name.into(), commit_time);
    }

    pub fn set_changes(&mut self, changes: bool) {
        self.changes = changes;
    }

    pub fn fail_commit(&mut self, fail: bool) {
        self.fail_commit = fail;
    }

    pub fn fail_tag(&mut self, fail: bool) {
        self.fail_tag = fail;
    }

    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn commits(&self) -> Vec<(CommitMode, i64)> {
        self.commits.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created_tags.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

/// Just enough of `git tag -l -i` globbing: a literal prefix, optionally
/// followed by `[1-9]`, then `*`.
fn glob_matches(pattern: &str, name: &str) -> bool {
    let literal_end = pattern.find(&['[', '*'][..]).unwrap_or(pattern.len());
    let literal = &pattern[..literal_end];
    let head = match name.get(..literal.len()) {
        Some(head) if head.eq_ignore_ascii_case(literal) => head,
        _ => return false,
    };
    let rest = &name[head.len()..];
    if pattern[literal_end..].starts_with("[1-9]") {
        matches!(rest.chars().next(), Some('1'..='9'))
    } else {
        true
    }
}

fn failed(command: &str) -> ReleaseError {
    ReleaseError::CommandFailed {
        command: command.to_string(),
        code: 1,
        output: "mock failure".to_string(),
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self
            .tags
            .keys()
            .filter(|name| glob_matches(pattern, name))
            .cloned()
            .collect())
    }

    fn tag_commit_time(&self, tag: &str) -> Result<Option<i64>> {
        Ok(self.tags.get(tag).copied())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        if let Ok(mut staged) = self.staged.lock() {
            staged.push(path.to_path_buf());
        }
        Ok(())
    }

    fn has_changes(&self) -> Result<bool> {
        Ok(self.changes)
    }

    fn commit(&self, mode: &CommitMode, author_date: i64) -> Result<()> {
        if self.fail_commit {
            return Err(failed("git commit"));
        }
        if let Ok(mut commits) = self.commits.lock() {
            commits.push((mode.clone(), author_date));
        }
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.fail_tag {
            return Err(failed("git tag"));
        }
        if let Ok(mut tags) = self.created_tags.lock() {
            tags.push((name.to_string(), message.to_string()));
        }
        Ok(())
    }
}
