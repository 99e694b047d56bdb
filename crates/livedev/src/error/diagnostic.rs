//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Server(msg) => miette::miette!(
            "Server error: {}\n\nHint: Is another process already listening on that address? Try a different --addr",
            msg
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report
fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidValue { field, value, hint } => miette::miette!(
            "Invalid configuration value for '{}': {}\n\nHint: {}",
            field,
            value,
            hint
        ),
        _ => miette::miette!("Configuration error: {}", err),
    }
}
