//! CLI entry point for the bikeshare explorer.

use anyhow::{Result, anyhow};
use bikeshare::{Explorer, ExplorerConfig, ExplorerError, TerminalConsole};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Explore US bikeshare trip data interactively",
    long_about = "Loads trip data for Chicago, New York City or Washington, filters it by\n\
                  month and weekday, and reports the busiest times, popular stations,\n\
                  trip durations and user demographics.\n\n\
                  All choices are made at the prompts; the options below only control\n\
                  where the data lives and how much is logged.\n\n\
                  EXAMPLES:\n  \
                  bikeshare\n  \
                  bikeshare --data-dir ./data --log-level debug"
)]
struct Args {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with the prompts on stdout.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    if !args.data_dir.is_dir() {
        return Err(anyhow!(
            "Data directory not found: {}",
            args.data_dir.display()
        ));
    }

    let config = ExplorerConfig::builder()
        .data_dir(&args.data_dir)
        .build()
        .map_err(ExplorerError::from)?;
    info!("Reading trip data from {}", args.data_dir.display());

    let explorer = Explorer::new(&config);
    let mut console = TerminalConsole::new();

    explorer.run(&mut console)?;
    info!("Session ended");
    Ok(())
}
