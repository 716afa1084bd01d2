use std::path::Path;

use crate::error::{ReleaseError, Result};
use crate::git::runner::{Capture, CommandRunner};
use crate::git::CommitMode;

/// [Repository](super::Repository) backed by the system `git` binary
#[derive(Debug, Clone)]
pub struct SystemGit {
    runner: CommandRunner,
}

impl SystemGit {
    /// Operate on the repository containing `work_dir`
    pub fn open<P: AsRef<Path>>(work_dir: P) -> Self {
        SystemGit {
            runner: CommandRunner::new("git", work_dir),
        }
    }

    pub fn work_dir(&self) -> &Path {
        self.runner.work_dir()
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.runner.run(args, Capture::Combined)?;
        Ok(output.check(&self.runner.describe(args))?.text)
    }
}

fn commit_args(mode: &CommitMode, date_arg: &str) -> Vec<String> {
    let mut args = vec!["commit".to_string()];
    match mode {
        CommitMode::Amend => args.push("--amend".to_string()),
        CommitMode::Message(msg) => {
            args.extend(["-m".to_string(), msg.clone()]);
        }
        CommitMode::Edit(msg) => {
            args.extend(["-m".to_string(), msg.clone(), "-e".to_string()]);
        }
    }
    args.extend([date_arg.to_string(), "--".to_string(), ".".to_string()]);
    args
}

impl super::Repository for SystemGit {
    fn current_branch(&self) -> Result<Option<String>> {
        let args = ["branch", "--show-current"];
        let output = self.runner.run(&args, Capture::Combined)?;
        if !output.success() {
            return Err(ReleaseError::NotARepository(
                self.work_dir().display().to_string(),
            ));
        }

        let branch = output.text.trim();
        if branch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(branch.to_string()))
        }
    }

    fn list_tags(&self, pattern: &str) -> Result<Vec<String>> {
        let text = self.run_checked(&["tag", "-l", "-i", pattern])?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn tag_commit_time(&self, tag: &str) -> Result<Option<i64>> {
        let output = self
            .runner
            .run(&["log", "-1", "--format=%ct", tag], Capture::Combined)?;
        if !output.success() {
            tracing::debug!(tag, output = %output.text.trim(), "cannot read tag time");
            return Ok(None);
        }
        Ok(output.text.trim().parse::<i64>().ok())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        self.run_checked(&["add", path.as_ref()])?;
        Ok(())
    }

    fn has_changes(&self) -> Result<bool> {
        let args = [
            "diff-index",
            "--ignore-cr-at-eol",
            "--quiet",
            "HEAD",
            "--",
            ".",
        ];
        let output = self.runner.run(&args, Capture::Combined)?;
        // exit 1 means differences; anything else non-zero (e.g. no HEAD yet)
        // is treated the same so a fresh commit is made
        if !output.success() && output.code != Some(1) {
            tracing::debug!(output = %output.text.trim(), "diff-index failed");
        }
        Ok(!output.success())
    }

    fn commit(&self, mode: &CommitMode, author_date: i64) -> Result<()> {
        let date_arg = format!("--date={}", author_date);
        let owned = commit_args(mode, &date_arg);
        let args: Vec<&str> = owned.iter().map(String::as_str).collect();

        // amend and edit both open the editor on the user's terminal
        let capture = match mode {
            CommitMode::Message(_) => Capture::Combined,
            CommitMode::Amend | CommitMode::Edit(_) => Capture::Inherit,
        };
        let output = self.runner.run(&args, capture)?;
        output.check(&self.runner.describe(&args))?;
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        self.run_checked(&["tag", "-a", "-f", "-m", message, name])?;
        Ok(())
    }
}
