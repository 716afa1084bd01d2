pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod install;
pub mod logging;
pub mod release;
pub mod resolver;
pub mod ui;

pub use error::{ReleaseError, Result};
