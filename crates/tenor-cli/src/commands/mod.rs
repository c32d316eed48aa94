//! CLI command implementations.

pub mod covariance;
pub mod forward;
pub mod spot;
pub mod yields;

pub use covariance::CovarianceArgs;
pub use spot::SpotArgs;

use std::path::PathBuf;

use clap::Args;
use tenor_curves::config::PipelineConfig;
use tenor_curves::prelude::{CurveKind, CurveSeries, ObservationSet};
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::input::read_observations;
use crate::output::{
    matrix_table, print_header, print_json, print_rate_matrix_csv, print_skipped, CellFormat,
};

/// Quote files shared by every command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Quote files (CSV), one per observation
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

/// Reads the inputs and builds one series.
pub fn build_series(
    kind: CurveKind,
    files: &[PathBuf],
    config: &PipelineConfig,
) -> CliResult<(Vec<ObservationSet>, CurveSeries)> {
    let observations = read_observations(files)?;
    let series = config.series_builder()?.series(kind, &observations)?;
    info!(
        kind = %kind,
        rows = series.matrix.nrows(),
        skipped = series.skipped.len(),
        "built series"
    );
    print_skipped(&series.skipped);
    Ok((observations, series))
}

/// Prints a series as a rate table, JSON or CSV.
pub fn print_series(title: &str, series: &CurveSeries, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            println!("{}", matrix_table(&series.matrix, CellFormat::Percent));
            Ok(())
        }
        OutputFormat::Json => print_json(series),
        OutputFormat::Csv => print_rate_matrix_csv(&series.matrix),
    }
}
