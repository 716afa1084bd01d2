//! Domain logic - pure revision and version rules independent of git operations

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use tag::{Tag, TagPattern};
pub use version::ReleaseVersion;
