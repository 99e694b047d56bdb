use crate::cli::parse_addr;
use crate::config::LivedevConfig;
use crate::error::{CliError, ConfigError, Result};
use std::net::SocketAddr;

/// Shortest accepted polling interval in milliseconds.
pub const MIN_POLL_INTERVAL_MS: u64 = 10;

/// Longest accepted polling interval in milliseconds.
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// Longest accepted keep-alive interval in seconds.
pub const MAX_KEEP_ALIVE_SECS: u64 = 3_600;

impl LivedevConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if !self.root.is_dir() {
            return Err(CliError::DirectoryNotFound(self.root.clone()));
        }

        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_ms".to_string(),
                value: self.poll_interval_ms.to_string(),
                hint: format!(
                    "Polling interval must be between {} and {} milliseconds",
                    MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS
                ),
            }
            .into());
        }

        if !(1..=MAX_KEEP_ALIVE_SECS).contains(&self.keep_alive_secs) {
            return Err(ConfigError::InvalidValue {
                field: "keep_alive_secs".to_string(),
                value: self.keep_alive_secs.to_string(),
                hint: format!(
                    "Keep-alive interval must be between 1 and {} seconds",
                    MAX_KEEP_ALIVE_SECS
                ),
            }
            .into());
        }

        Ok(())
    }

    /// Parse the configured listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        parse_addr(&self.addr).map_err(|hint| {
            ConfigError::InvalidValue {
                field: "addr".to_string(),
                value: self.addr.clone(),
                hint,
            }
            .into()
        })
    }
}
