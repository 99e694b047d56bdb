//! Status message functions for terminal output.

use crate::ui::colors_enabled;
use owo_colors::OwoColorize;

/// Print a success message to stderr.
pub fn success(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {}", message);
    }
}

/// Print an info message to stderr.
///
/// # Examples
///
/// ```no_run
/// use livedev::ui::info;
///
/// info("Serving /srv/site");
/// ```
pub fn info(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {}", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        // These should not panic
        success("Success message");
        info("Info message");
        warning("Warning message");
    }
}
