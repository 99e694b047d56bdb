//! livedev - serve a directory and reload the browser when it changes.
//!
//! # Architecture
//!
//! - [`dev`] - Change detection, debouncing, the reload hub and the HTTP
//!   server with its SSE and WebSocket session endpoints
//! - [`config`] - Layered configuration (defaults, `livedev.toml`,
//!   `LIVEDEV_*` environment, CLI flags)
//! - [`cli`] - Command-line definition
//! - [`commands`] - The serve command wiring everything together
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status lines on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use livedev::dev::{ReloadHub, ReloadNotice};
//!
//! let hub = ReloadHub::new();
//! let (_id, mut notices) = hub.register();
//! hub.broadcast(ReloadNotice::now());
//! assert!(notices.try_recv().is_ok());
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result};
