//! Bet tracker — personal sports-betting ledger.
//!
//! Entry point. Loads `.env`, initialises structured logging, parses
//! the command line and runs the requested subcommand.

use anyhow::Result;
use clap::Parser;

use bet_tracker::cli::{self, Cli};

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cli = Cli::parse();
    cli::run(cli)
}

/// Initialise the `tracing` subscriber. Logs go to stderr so reports
/// on stdout stay clean.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bet_tracker=warn"));

    let json_logging = std::env::var("BET_TRACKER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
