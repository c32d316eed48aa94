//! Covariance command implementation.
//!
//! Builds the requested series, then the covariance of its log returns and
//! the eigen decomposition of that covariance.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tenor_curves::config::PipelineConfig;
use tenor_curves::prelude::{CovarianceResult, CurveKind, SkippedObservation};

use super::{build_series, CurveArgs};
use crate::cli::OutputFormat;
use crate::output::{labeled_table, print_header, print_json, print_matrix_csv, CellFormat};

/// Arguments for the covariance command.
#[derive(Args, Debug)]
pub struct CovarianceArgs {
    /// Which rate matrix to analyze
    #[arg(short, long, value_enum, default_value = "spot")]
    pub source: SourceChoice,

    #[command(flatten)]
    pub inputs: CurveArgs,
}

/// Rate matrix choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceChoice {
    /// Bootstrapped spot rates
    #[default]
    Spot,
    /// 1-year-forward rates
    Forward,
    /// Quoted yields
    Yield,
}

impl From<SourceChoice> for CurveKind {
    fn from(choice: SourceChoice) -> Self {
        match choice {
            SourceChoice::Spot => CurveKind::Spot,
            SourceChoice::Forward => CurveKind::Forward,
            SourceChoice::Yield => CurveKind::Yield,
        }
    }
}

#[derive(Serialize)]
struct CovarianceOutput<'a> {
    source: CurveKind,
    skipped: &'a [SkippedObservation],
    #[serde(flatten)]
    result: &'a CovarianceResult,
}

/// Executes the covariance command.
pub fn execute(args: CovarianceArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let kind = CurveKind::from(args.source);
    let (_, series) = build_series(kind, &args.inputs.files, config)?;
    let result = config.covariance_analyzer().analyze(&series.matrix)?;

    match format {
        OutputFormat::Table => print_tables(kind, &result),
        OutputFormat::Json => print_json(&CovarianceOutput {
            source: kind,
            skipped: &series.skipped,
            result: &result,
        })?,
        OutputFormat::Csv => print_matrix_csv("rung", &result.labels, &covariance_rows(&result))?,
    }
    Ok(())
}

fn covariance_rows(result: &CovarianceResult) -> Vec<(String, Vec<f64>)> {
    result
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.clone(), result.covariance.row(i).iter().copied().collect()))
        .collect()
}

fn print_tables(kind: CurveKind, result: &CovarianceResult) {
    let rows = covariance_rows(result);
    print_header(&format!("Covariance of {kind} log returns ({} periods)", result.returns.nrows()));
    println!(
        "{}",
        labeled_table(
            "rung",
            &result.labels,
            rows.iter().map(|(l, v)| (l.as_str(), v.clone())),
            CellFormat::Scientific,
        )
    );

    let components: Vec<String> =
        (1..=result.eigenvalues.len()).map(|k| format!("PC{k}")).collect();
    let explained = result.explained_variance();

    print_header("Eigenvalues");
    let spectrum = [
        ("eigenvalue", result.eigenvalues.iter().copied().collect::<Vec<_>>()),
        ("explained", explained),
    ];
    println!("{}", labeled_table("", &components, spectrum, CellFormat::Scientific));

    print_header("Eigenvectors");
    let loadings = result
        .eigenvectors
        .row_iter()
        .map(|row| row.iter().copied().collect::<Vec<f64>>());
    println!(
        "{}",
        labeled_table(
            "rung",
            &components,
            result.labels.iter().map(String::as_str).zip(loadings),
            CellFormat::Fixed,
        )
    );
}
