//! User interface module - console output for both tools.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_installed, display_release, display_status,
    display_success, display_warning,
};
