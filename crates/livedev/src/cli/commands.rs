use crate::cli::enums::Strategy;
use crate::cli::validation::parse_addr;
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Arguments for serving a directory.
///
/// Every option is optional so that unset flags fall through to the config
/// file, environment variables and built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    ///
    /// Accepts HOST:PORT, `:PORT` for all interfaces, or a bare port for
    /// loopback. `localhost` resolves to 127.0.0.1.
    ///
    /// Examples:
    ///   livedev --addr 127.0.0.1:3000
    ///   livedev --addr :8080
    #[arg(short = 'a', long, value_name = "HOST:PORT", value_parser = parse_addr)]
    pub addr: Option<SocketAddr>,

    /// Directory to serve and watch
    ///
    /// Defaults to the current directory.
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Change detection strategy
    ///
    /// - events: OS file notifications (default)
    /// - poll: periodic directory snapshots, for network or container mounts
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Debounce window in milliseconds
    ///
    /// Changes arriving within this window after a reload was sent are
    /// dropped.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Polling interval in milliseconds (poll strategy only)
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Interval between keep-alive comments on the event stream, in seconds
    #[arg(long, value_name = "SECS")]
    pub keep_alive_secs: Option<u64>,

    /// Path to config file
    ///
    /// Defaults to livedev.toml in the current directory when present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Open the browser after the server starts
    #[arg(long)]
    pub open: bool,
}
