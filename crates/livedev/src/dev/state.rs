//! Shared state for the development server.

use crate::dev::hub::ReloadHub;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Default keep-alive interval for the event stream, in seconds.
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 25;

const MIN_KEEP_ALIVE: Duration = Duration::from_millis(1);
const MAX_KEEP_ALIVE: Duration = Duration::from_secs(crate::config::MAX_KEEP_ALIVE_SECS);

/// Shared development server state.
///
/// Immutable apart from the hub, which carries its own locking.
pub struct DevServerState {
    /// Directory being served
    root: PathBuf,

    /// Connected browsers
    hub: Arc<ReloadHub>,

    /// Interval between keep-alive comments on the event stream
    keep_alive: Duration,
}

impl DevServerState {
    /// Create new dev server state.
    ///
    /// # Arguments
    ///
    /// * `root` - Absolute directory to serve
    /// * `hub` - Hub shared with the reload dispatcher
    pub fn new(root: PathBuf, hub: Arc<ReloadHub>) -> Self {
        Self {
            root,
            hub,
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
        }
    }

    /// Override the keep-alive interval.
    ///
    /// Clamped to between 1 ms and one hour so stream timers stay valid.
    #[must_use]
    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive.clamp(MIN_KEEP_ALIVE, MAX_KEEP_ALIVE);
        self
    }

    /// Directory being served.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reload hub.
    pub fn hub(&self) -> &Arc<ReloadHub> {
        &self.hub
    }

    /// Keep-alive interval for event streams.
    pub fn keep_alive(&self) -> Duration {
        self.keep_alive
    }

    /// Get number of connected clients.
    pub fn client_count(&self) -> usize {
        self.hub.client_count()
    }
}

/// Shared state handle for passing around the application.
pub type SharedState = Arc<DevServerState>;
