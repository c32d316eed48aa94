//! Tenor CLI - spot, forward and yield curves from quote files.
//!
//! # Usage
//!
//! ```bash
//! # Spot curves, one CSV file per observation date
//! tenor spot data/2024-01-31.csv data/2024-02-29.csv
//!
//! # 1-year-forward curves as JSON
//! tenor --format json forward data/*.csv
//!
//! # Covariance of forward-rate log returns
//! tenor covariance --source forward data/*.csv
//!
//! # Custom rungs and solver
//! tenor --config tenor.toml spot data/*.csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "error" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Spot(args) => commands::spot::execute(args, &config, format)?,
        Commands::Forward(args) => commands::forward::execute(args, &config, format)?,
        Commands::Yields(args) => commands::yields::execute(args, &config, format)?,
        Commands::Covariance(args) => commands::covariance::execute(args, &config, format)?,
    }

    Ok(())
}
