//! Configuration system for livedev with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod validation;

use crate::dev::watcher::WatchStrategy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::DEFAULT_CONFIG_FILE;
pub use validation::{MAX_KEEP_ALIVE_SECS, MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS};

/// livedev configuration - loaded from livedev.toml, `LIVEDEV_*` variables
/// or CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LivedevConfig {
    /// Listen address (e.g., "127.0.0.1:8080", ":8080")
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Directory to serve and watch
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Change detection strategy (events, poll)
    #[serde(default)]
    pub strategy: WatchStrategy,

    /// Debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Polling interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Event stream keep-alive interval in seconds
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// Open the browser after startup
    #[serde(default)]
    pub open: bool,
}

impl Default for LivedevConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            root: default_root(),
            strategy: WatchStrategy::default(),
            debounce_ms: default_debounce_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            keep_alive_secs: default_keep_alive_secs(),
            open: false,
        }
    }
}
