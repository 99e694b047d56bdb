//! Command-line interface definition for livedev.
//!
//! Uses clap v4's derive macros. The binary has a single job, serving a
//! directory with live reload, so the serve arguments are flattened into the
//! top-level parser instead of living behind a subcommand.

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;

pub use commands::ServeArgs;
pub use enums::*;
pub use validation::parse_addr;

/// livedev - Static file server that reloads the browser on change
#[derive(Parser, Debug)]
#[command(
    name = "livedev",
    version,
    about = "Serve a directory and reload the browser when files change",
    long_about = "livedev serves a directory over HTTP, injects a small reload script into\n\
                  every HTML page, and tells connected browsers to reload whenever a file\n\
                  under the directory is added, modified or removed."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows raw change events, client registration and debounce decisions.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. Useful for logging to
    /// files or systems that don't support colored terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Serve options
    #[command(flatten)]
    pub serve: ServeArgs,
}
