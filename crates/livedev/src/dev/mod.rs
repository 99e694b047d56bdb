//! Development server module.
//!
//! Provides the live-reload server:
//! - Change detection by OS events or snapshot polling
//! - Leading-edge debouncing of change bursts
//! - A broadcast hub fanning reload notices out to every browser
//! - Server-Sent Events and WebSocket session endpoints
//! - Static file serving with reload script injection

pub mod config;
pub mod debouncer;
pub mod hub;
pub mod inject;
pub mod reload;
pub mod server;
pub mod session;
pub mod state;
pub mod static_files;
pub mod watcher;

// Re-exports
pub use config::DevConfig;
pub use debouncer::Debouncer;
pub use hub::{BroadcastReport, ClientId, ReloadHub, ReloadNotice};
pub use reload::ReloadDispatcher;
pub use server::DevServer;
pub use session::{ClientSession, SessionState};
pub use state::{DevServerState, SharedState};
pub use watcher::{ChangeEvent, DirectorySnapshot, FileWatcher, WatchStrategy};
