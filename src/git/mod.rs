//! Git operations abstraction layer
//!
//! The release workflow talks to source control only through the
//! [Repository] trait. Two implementations exist:
//!
//! - [system::SystemGit]: runs the `git` binary through a [runner::CommandRunner]
//! - [mock::MockRepository]: in-memory repository for tests
//!
//! ```rust
//! # use release_tools::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_tools::Result<()> {
//! if let Some(branch) = repo.current_branch()? {
//!     let tags = repo.list_tags("proj-r[1-9]*")?;
//!     println!("{} tags on {}", tags.len(), branch);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod runner;
pub mod system;

pub use mock::MockRepository;
pub use runner::{Capture, CommandOutput, CommandRunner};
pub use system::SystemGit;

use std::path::Path;

use crate::error::Result;

/// How the version commit is recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMode {
    /// Fold the change into the previous commit, opening the editor
    Amend,
    /// New commit with the given message
    Message(String),
    /// New commit, opening the editor pre-filled with the message
    Edit(String),
}

/// Source control operations needed to cut a release
///
/// Implementations map launch failures to
/// [GitUnavailable](crate::error::ReleaseError::GitUnavailable) and
/// unexpected non-zero exits to
/// [CommandFailed](crate::error::ReleaseError::CommandFailed).
pub trait Repository: Send + Sync {
    /// Name of the checked-out branch, `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Tag names matching `pattern` (a `git tag -l` glob, case-insensitive)
    fn list_tags(&self, pattern: &str) -> Result<Vec<String>>;

    /// Commit time (seconds since the epoch) of the commit `tag` points at,
    /// `None` if the tag is unknown or its time cannot be read
    fn tag_commit_time(&self, tag: &str) -> Result<Option<i64>>;

    /// Stage a path for the next commit
    fn stage(&self, path: &Path) -> Result<()>;

    /// True if the working tree differs from HEAD
    fn has_changes(&self) -> Result<bool>;

    /// Commit the current directory with the given author date
    fn commit(&self, mode: &CommitMode, author_date: i64) -> Result<()>;

    /// Create or move an annotated tag at HEAD
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;
}
