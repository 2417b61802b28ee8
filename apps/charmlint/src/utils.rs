//! Small helpers shared by the binary.

use owo_colors::OwoColorize;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for error messages printed to stderr.
pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Prefix for informational notes printed to stderr.
pub fn note_prefix() -> String {
    if use_colors() {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}
