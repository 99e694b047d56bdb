//! Error handling for the livedev CLI.
//!
//! This module provides a small error hierarchy built on `thiserror`. Every
//! variant is meant to be actionable: where the user can do something about
//! it, the message ends with a `Hint:` line.
//!
//! # Architecture
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain-specific errors** (`ConfigError`) provide detailed context
//! - **Error conversion** is automatic via `#[from]` attributes

mod diagnostic;

pub use diagnostic::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
///
/// This is the primary error type returned by the serve command and the
/// components it starts.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Served or watched directory does not exist
    #[error("Directory not found: {}\n\nHint: Pass an existing directory with --dir", .0.display())]
    DirectoryNotFound(PathBuf),

    /// HTTP server errors (bind failure, accept loop failure)
    #[error("Server error: {0}")]
    Server(String),

    /// OS change notification errors
    #[error("File watcher error: {0}\n\nHint: Try --strategy poll if file notifications are unavailable")]
    Watch(#[from] notify::Error),

    /// Directory traversal errors while taking a snapshot
    #[error("Failed to scan directory: {0}")]
    Snapshot(#[from] walkdir::Error),
}

/// Configuration-specific errors.
///
/// These errors occur while loading and validating `livedev.toml`,
/// `LIVEDEV_*` environment variables and command-line overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the expected location
    #[error("Config file not found: {}\n\nHint: Create a livedev.toml file or check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("livedev.toml"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("livedev.toml"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "poll_interval_ms".to_string(),
            value: "1".to_string(),
            hint: "Use at least 10 milliseconds".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'poll_interval_ms'"));
        assert!(msg.contains("Hint: Use at least 10 milliseconds"));
    }

    #[test]
    fn test_directory_not_found_has_hint() {
        let err = CliError::DirectoryNotFound(PathBuf::from("/no/such/site"));
        let msg = err.to_string();
        assert!(msg.contains("/no/such/site"));
        assert!(msg.contains("Hint: Pass an existing directory"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::NotFound(PathBuf::from("test.toml"));
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
    }

    #[test]
    fn test_watch_error_suggests_polling() {
        let err = CliError::from(notify::Error::generic("inotify limit reached"));
        let msg = err.to_string();
        assert!(msg.contains("inotify limit reached"));
        assert!(msg.contains("--strategy poll"));
    }
}
