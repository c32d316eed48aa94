//! Forward command implementation.

use anyhow::Result;
use tenor_curves::config::PipelineConfig;
use tenor_curves::prelude::CurveKind;

use super::{build_series, print_series, CurveArgs};
use crate::cli::OutputFormat;

/// Executes the forward command.
pub fn execute(args: CurveArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let (_, series) = build_series(CurveKind::Forward, &args.files, config)?;
    print_series("1-Year Forward Curves", &series, format)
}
