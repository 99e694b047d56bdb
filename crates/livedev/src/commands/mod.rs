//! Command implementations for livedev.
//!
//! - [`serve`] - Serve a directory with live reload

pub mod serve;

pub use serve::execute as serve_execute;
