//! livedev - static file server with live reload.
//!
//! Entry point: parses arguments, initializes logging and runs the serve
//! command.

use clap::Parser;
use livedev::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = commands::serve_execute(args.serve).await;

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}
