//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CovarianceArgs, CurveArgs, SpotArgs};

/// Tenor - term-structure bootstrapping and rate covariance
#[derive(Parser)]
#[command(name = "tenor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "TENOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap spot curves
    Spot(SpotArgs),

    /// Derive 1-year-forward curves from the spot curves
    Forward(CurveArgs),

    /// Closest-maturity quoted yields per rung
    Yields(CurveArgs),

    /// Log-return covariance and eigen decomposition
    Covariance(CovarianceArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
