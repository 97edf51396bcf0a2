//! omod CLI binary.
//!
//! Entry point for the `omod` command-line tool. It initializes logging via
//! `tracing`, parses arguments with `clap`, and dispatches to the command
//! handlers.

mod cli;
mod commands;

use miette::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    commands::dispatch(args).await
}
