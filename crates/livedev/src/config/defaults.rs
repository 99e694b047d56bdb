use crate::dev::debouncer::DEFAULT_DEBOUNCE_MS;
use crate::dev::state::DEFAULT_KEEP_ALIVE_SECS;
use crate::dev::watcher::DEFAULT_POLL_INTERVAL_MS;
use std::path::PathBuf;

pub fn default_addr() -> String {
    "127.0.0.1:8080".to_string()
}

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

pub fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub fn default_keep_alive_secs() -> u64 {
    DEFAULT_KEEP_ALIVE_SECS
}
