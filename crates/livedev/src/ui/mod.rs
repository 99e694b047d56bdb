//! Terminal output for startup and shutdown messages.
//!
//! Runtime events go through `tracing`; these helpers cover the handful of
//! user-facing lines printed around them.

mod messages;

pub use messages::{info, success, warning};

use std::sync::atomic::{AtomicBool, Ordering};

static COLORS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    // NO_COLOR environment variable disables colors
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    // FORCE_COLOR enables colors even in non-TTY
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support based on environment and the `--no-color` flag.
///
/// Should be called early in main, before any message is printed.
pub fn init_colors(no_color: bool) {
    COLORS_ENABLED.store(!no_color && should_use_color(), Ordering::Relaxed);
}

/// Whether status messages are colored.
pub fn colors_enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_should_use_color_no_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::remove_var("FORCE_COLOR");
        }
        assert!(!should_use_color());
        unsafe { std::env::remove_var("NO_COLOR") };
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_color());
        unsafe { std::env::remove_var("FORCE_COLOR") };
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color_overrides_force() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        // NO_COLOR takes precedence
        assert!(!should_use_color());
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_init_colors_flag_disables() {
        unsafe { std::env::set_var("FORCE_COLOR", "1") };
        init_colors(true);
        assert!(!colors_enabled());

        init_colors(false);
        assert!(colors_enabled());
        unsafe { std::env::remove_var("FORCE_COLOR") };
    }
}
