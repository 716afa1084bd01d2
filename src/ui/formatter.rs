//! Pure formatting functions for UI output.
//!
//! Each `format_*` function builds the line; the matching `display_*`
//! function prints it to the right stream.

use std::path::Path;

use console::style;

use crate::boundary::BoundaryWarning;

/// `installed <file> -> <dest>`, unstyled since build scripts read it
pub fn format_installed(file: &str, destination: &Path) -> String {
    format!("installed {} -> {}", file, destination.display())
}

/// Print the success line for one installed file.
pub fn display_installed(file: &str, destination: &Path) {
    println!("{}", format_installed(file, destination));
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    display_warning(&warning.to_string());
}

/// Summary lines for a finished release.
pub fn format_release(project: &str, version: &str, tag: &str, amended: bool) -> Vec<String> {
    let commit = if amended {
        "amended previous commit"
    } else {
        "new commit"
    };
    vec![
        format!("{} version {} ({})", project, version, commit),
        format!("tag {}", tag),
    ]
}

/// Display the outcome of a release.
pub fn display_release(project: &str, version: &str, tag: &str, amended: bool) {
    for line in format_release(project, version, tag, amended) {
        display_success(&line);
    }
}
