//! Serve command implementation.
//!
//! Orchestrates the server lifecycle:
//! - Configuration loading and validation
//! - Change detection on the served directory
//! - HTTP server with SSE and WebSocket reload endpoints
//! - Debounced reload broadcasts on file changes
//! - Shutdown on Ctrl+C

use crate::cli::ServeArgs;
use crate::dev::{
    DevConfig, DevServer, DevServerState, FileWatcher, ReloadDispatcher, ReloadHub, WatchStrategy,
};
use crate::error::{CliError, Result};
use crate::ui;
use std::sync::Arc;
use tokio::signal;

/// Execute the serve command.
///
/// # Process Flow
///
/// 1. Load and validate configuration
/// 2. Start the change detector (fatal if it cannot start)
/// 3. Bind the listener (fatal if the address is taken)
/// 4. Start the HTTP server in the background
/// 5. Main event loop:
///    - Debounce change events and broadcast reloads
///    - Stop on Ctrl+C or server failure
///
/// Shutdown is abrupt: open browser connections are dropped without a
/// closing message and reconnect on their own once the server is back.
///
/// # Errors
///
/// Returns errors for invalid configuration, a missing root, detector
/// startup failures and bind failures
pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = DevConfig::from_args(&args)?;

    ui::info(&format!("Serving {}", config.root.display()));

    let (watcher, mut change_rx) =
        FileWatcher::spawn(config.root.clone(), config.strategy, config.poll_interval)?;

    match watcher.strategy() {
        WatchStrategy::Events => ui::info("Watching for changes (file system events)"),
        WatchStrategy::Poll => ui::info(&format!(
            "Watching for changes (polling every {}ms)",
            config.poll_interval.as_millis()
        )),
    }

    let hub = Arc::new(ReloadHub::new());
    let state = Arc::new(
        DevServerState::new(config.root.clone(), Arc::clone(&hub))
            .with_keep_alive(config.keep_alive),
    );
    let mut dispatcher = ReloadDispatcher::new(hub, config.debounce);

    let listener = DevServer::bind(config.addr).await?;
    let server = DevServer::new(state);
    let mut server_handle = tokio::spawn(server.run(listener));

    ui::success(&format!("Server running at {}", config.server_url()));

    if config.open {
        open_browser(&config.server_url());
    }

    ui::info("Press Ctrl+C to stop");

    let mut outcome = Ok(());

    loop {
        tokio::select! {
            change = change_rx.recv() => match change {
                Some(change) => {
                    dispatcher.dispatch(&change);
                }
                None => {
                    ui::warning("Change detector stopped unexpectedly");
                    break;
                }
            },

            _ = signal::ctrl_c() => {
                ui::info("Shutting down...");
                break;
            }

            result = &mut server_handle => {
                outcome = match result {
                    Ok(Ok(())) => {
                        ui::warning("Server stopped unexpectedly");
                        Ok(())
                    }
                    Ok(Err(e)) => Err(e),
                    Err(e) => Err(CliError::Server(format!("Server task failed: {}", e))),
                };
                break;
            }
        }
    }

    server_handle.abort();
    drop(watcher);

    if outcome.is_ok() {
        ui::success("Server stopped");
    }
    outcome
}

/// Open the server URL in the default browser.
///
/// Uses platform-specific commands:
/// - macOS: `open`
/// - Windows: `start`
/// - Linux: `xdg-open`
fn open_browser(url: &str) {
    use std::process::Command;

    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => ui::info(&format!("Opened browser at {}", url)),
        Err(e) => ui::warning(&format!("Failed to open browser: {}", e)),
    }
}
