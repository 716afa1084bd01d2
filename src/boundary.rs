use std::fmt;

/// Non-fatal problems reported to the user while the run carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The source path has no parent directory to match rules against
    MissingParentDirectory { source: String },
    /// One install rule could not be carried out
    InstallFailed {
        file: String,
        destination: String,
        reason: String,
    },
    /// The release commit was made but tagging it failed
    TagNotCreated { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MissingParentDirectory { source } => {
                write!(
                    f,
                    "Source '{}' should include its parent directory; matching rules for '.'",
                    source
                )
            }
            BoundaryWarning::InstallFailed {
                file,
                destination,
                reason,
            } => {
                write!(f, "Failed to install {} -> {}: {}", file, destination, reason)
            }
            BoundaryWarning::TagNotCreated { tag, reason } => {
                write!(
                    f,
                    "Tag '{}' creation failed, please fix manually: {}",
                    tag, reason
                )
            }
        }
    }
}
