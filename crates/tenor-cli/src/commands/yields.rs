//! Yields command implementation.

use anyhow::Result;
use tenor_curves::config::PipelineConfig;
use tenor_curves::prelude::CurveKind;

use super::{build_series, print_series, CurveArgs};
use crate::cli::OutputFormat;

/// Executes the yields command.
pub fn execute(args: CurveArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    let (_, series) = build_series(CurveKind::Yield, &args.files, config)?;
    print_series("Quoted Yields", &series, format)
}
