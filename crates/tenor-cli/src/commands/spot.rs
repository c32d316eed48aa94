//! Spot command implementation.
//!
//! Bootstraps a spot curve per observation and, on request, shows how well
//! each curve reprices the bonds it was built from.

use anyhow::Result;
use clap::Args;
use tenor_curves::config::PipelineConfig;
use tenor_curves::prelude::{BondSelector, BootstrapResult, CurveKind, NamedCurve, ObservationSet};

use super::{build_series, print_series, CurveArgs};
use crate::cli::OutputFormat;
use crate::output::{print_header, print_json};

/// Arguments for the spot command.
#[derive(Args, Debug)]
pub struct SpotArgs {
    #[command(flatten)]
    pub inputs: CurveArgs,

    /// Show the repricing check of every rung
    #[arg(long)]
    pub repricing: bool,
}

/// Executes the spot command.
pub fn execute(args: SpotArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let (observations, series) = build_series(CurveKind::Spot, &args.inputs.files, config)?;

    if !args.repricing {
        return print_series("Spot Curves", &series, format);
    }

    let reports = repricing_reports(&observations, &series.curves, config)?;
    match format {
        OutputFormat::Table => {
            print_series("Spot Curves", &series, format)?;
            for (name, result) in &reports {
                print_header(&format!("Repricing: {name}"));
                print!("{}", result.repricing);
            }
            Ok(())
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "series": series,
            "repricing": reports
                .iter()
                .map(|(name, r)| serde_json::json!({ "observation": name, "report": r.repricing }))
                .collect::<Vec<_>>(),
        })),
        OutputFormat::Csv => print_series("Spot Curves", &series, format),
    }
}

/// Re-runs selection and a validated bootstrap for each surviving curve.
fn repricing_reports(
    observations: &[ObservationSet],
    curves: &[NamedCurve],
    config: &PipelineConfig,
) -> Result<Vec<(String, BootstrapResult)>> {
    let rungs = config.rung_set()?;
    let bootstrapper = config.bootstrapper();

    curves
        .iter()
        .filter_map(|curve| observations.iter().find(|o| o.name == curve.name))
        .map(|obs| -> Result<(String, BootstrapResult)> {
            let bonds = BondSelector::select(obs, &rungs)?;
            let result = bootstrapper.bootstrap_validated(&bonds, &rungs)?;
            Ok((obs.name.clone(), result))
        })
        .collect()
}
