//! Development server configuration.
//!
//! Resolves a loaded [`LivedevConfig`] into runtime values: a parsed socket
//! address, a canonical root and durations.

use crate::cli::ServeArgs;
use crate::config::LivedevConfig;
use crate::dev::watcher::WatchStrategy;
use crate::error::{CliError, Result};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Development server configuration.
#[derive(Debug, Clone)]
pub struct DevConfig {
    /// Server socket address (IP + port)
    pub addr: SocketAddr,

    /// Canonical absolute directory to serve and watch
    pub root: PathBuf,

    /// Change detection strategy
    pub strategy: WatchStrategy,

    /// Debounce window for change events
    pub debounce: Duration,

    /// Interval between snapshots (poll strategy only)
    pub poll_interval: Duration,

    /// Interval between event stream keep-alive comments
    pub keep_alive: Duration,

    /// Open browser automatically on start
    pub open: bool,
}

impl DevConfig {
    /// Create DevConfig from CLI arguments.
    ///
    /// Loads and merges every configuration source, then validates the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns error if a source is malformed, a value is out of range or the
    /// root directory does not exist
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let config = LivedevConfig::load(args)?;
        Self::from_config(&config)
    }

    /// Validate a loaded configuration and resolve runtime values.
    pub fn from_config(config: &LivedevConfig) -> Result<Self> {
        config.validate()?;

        let addr = config.socket_addr()?;
        let root = config
            .root
            .canonicalize()
            .map_err(|_| CliError::DirectoryNotFound(config.root.clone()))?;

        Ok(Self {
            addr,
            root,
            strategy: config.strategy,
            debounce: Duration::from_millis(config.debounce_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            keep_alive: Duration::from_secs(config.keep_alive_secs),
            open: config.open,
        })
    }

    /// Get the server URL as a string.
    ///
    /// Wildcard listen addresses are shown as loopback so the URL can be
    /// opened in a browser.
    pub fn server_url(&self) -> String {
        let ip = match self.addr.ip() {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip,
        };
        format!("http://{}", SocketAddr::new(ip, self.addr.port()))
    }
}
