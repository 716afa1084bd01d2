use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the release and install tools
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid revision format: '{0}'")]
    InvalidRevisionFormat(String),

    #[error("Cannot perform a release with a detached HEAD")]
    DetachedHead,

    #[error("{0} is not in a git repository")]
    NotARepository(String),

    #[error("Cannot run {program}: {source}")]
    GitUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with exit code {code}: {output}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Backwards revisions are not allowed: requested {requested}, latest is {latest}")]
    BackwardsRevision { requested: String, latest: String },

    #[error("No revision left after {latest}")]
    RevisionExhausted { latest: String },

    #[error("Re-release of {tag} only supported on the same day it was tagged")]
    ReReleaseWindowExpired { tag: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot open configuration file {}: {source}", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot access {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-tools
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a revision format error for the offending text
    pub fn invalid_revision(text: impl Into<String>) -> Self {
        ReleaseError::InvalidRevisionFormat(text.into())
    }

    /// Create a backwards revision error from the displayed forms
    pub fn backwards(requested: impl Into<String>, latest: impl Into<String>) -> Self {
        ReleaseError::BackwardsRevision {
            requested: requested.into(),
            latest: latest.into(),
        }
    }

    /// Create an error for a counter that cannot be incremented past `latest`
    pub fn exhausted(latest: impl Into<String>) -> Self {
        ReleaseError::RevisionExhausted {
            latest: latest.into(),
        }
    }

    /// Create a re-release error for the tag being re-released
    pub fn re_release(tag: impl Into<String>) -> Self {
        ReleaseError::ReReleaseWindowExpired { tag: tag.into() }
    }
}
