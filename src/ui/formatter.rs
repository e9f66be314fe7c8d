//! Pure formatting functions for UI output.
//!
//! Everything the user sees about the release goes through here; colors are
//! dropped automatically when the stream is not a terminal.

use console::style;

/// Format an error message in red.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").for_stderr().red().bold(), message)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Line printed after the document has been bumped.
pub fn format_bump(old_version: &str, new_version: &str) -> String {
    format!(
        "Version bumped from {} to {}",
        style(old_version).red(),
        style(new_version).green()
    )
}

/// Display the version change written to the document.
pub fn display_bump(old_version: &str, new_version: &str) {
    println!("{}", format_bump(old_version, new_version));
}

/// Display the outcome of a revert.
pub fn display_reverted() {
    println!("{}", style("Changes reverted").yellow());
}
