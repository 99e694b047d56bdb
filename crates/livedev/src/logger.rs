//! Logging infrastructure for livedev.
//!
//! Structured logging on top of the `tracing` ecosystem. Change detection,
//! broadcasts and client connections are logged at info level; raw events,
//! debounce decisions and registry changes at debug.
//!
//! # Example
//!
//! ```rust,no_run
//! use livedev::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Serving");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by `--verbose`.
const VERBOSE_FILTER: &str = "livedev=debug,tower_http=debug";

/// Filter used by `--quiet`.
const QUIET_FILTER: &str = "livedev=error";

/// Filter used when neither flag nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "livedev=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Must be called once at the start of the program, before any logging
/// occurs.
///
/// # Verbosity Levels
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for livedev and the HTTP layer
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: Custom filter
/// 4. Default: INFO for livedev
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = build_filter(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so only
    // filter selection is tested here.

    #[test]
    fn test_verbose_filter_enables_debug() {
        let filter = build_filter(true, false);
        assert!(filter.to_string().contains("livedev=debug"));
    }

    #[test]
    fn test_quiet_filter_errors_only() {
        let filter = build_filter(false, true);
        assert_eq!(filter.to_string(), QUIET_FILTER);
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let filter = build_filter(true, true);
        assert!(filter.to_string().contains("livedev=debug"));
    }
}
