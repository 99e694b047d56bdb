use crate::cli::ServeArgs;
use crate::config::LivedevConfig;
use crate::dev::watcher::WatchStrategy;
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "livedev.toml";

/// Prefix of environment variable overrides (`LIVEDEV_DEBOUNCE_MS=50`).
const ENV_PREFIX: &str = "LIVEDEV_";

/// Keys read from the environment; anything else under the prefix is ignored.
const ENV_KEYS: &[&str] = &[
    "addr",
    "root",
    "strategy",
    "debounce_ms",
    "poll_interval_ms",
    "keep_alive_secs",
    "open",
];

/// CLI flags that were actually given.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<WatchStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debounce_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    poll_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keep_alive_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    open: Option<bool>,
}

impl From<&ServeArgs> for CliOverrides {
    fn from(args: &ServeArgs) -> Self {
        Self {
            addr: args.addr.map(|addr| addr.to_string()),
            root: args.root.clone(),
            strategy: args.strategy.map(Into::into),
            debounce_ms: args.debounce_ms,
            poll_interval_ms: args.poll_interval_ms,
            keep_alive_secs: args.keep_alive_secs,
            // A bare flag can only switch it on
            open: args.open.then_some(true),
        }
    }
}

impl LivedevConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// Relative paths in the config file are resolved against the working
    /// directory, not the file's location.
    pub fn load(args: &ServeArgs) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = Self::config_file(args.config.as_deref())? {
            tracing::debug!(path = %path.display(), "Loading config file");
            figment = figment.merge(Toml::file(path));
        }

        // Merge environment variables (LIVEDEV_ADDR, LIVEDEV_DEBOUNCE_MS, etc.)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS));

        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: "Check livedev.toml syntax and LIVEDEV_* environment variables".to_string(),
            }
            .into()
        })
    }

    /// Pick the config file: an explicit path must exist, the default one is
    /// optional.
    fn config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        match explicit {
            Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
            Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                Ok(default_path.is_file().then(|| default_path.to_path_buf()))
            }
        }
    }
}
