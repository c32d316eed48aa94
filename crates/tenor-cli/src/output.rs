//! Output formatting utilities.

use std::io;

use colored::Colorize;
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};
use tenor_curves::prelude::{RateMatrix, SkippedObservation};

/// How matrix cells are rendered in tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// Decimal rate shown as a percentage.
    Percent,
    /// Scientific notation.
    Scientific,
    /// Plain fixed-point.
    Fixed,
}

impl CellFormat {
    /// Formats one cell.
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Percent => format!("{:.4}%", value * 100.0),
            Self::Scientific => format!("{value:.6e}"),
            Self::Fixed => format!("{value:.6}"),
        }
    }
}

/// Builds a table with a header row, one labeled row per entry.
pub fn labeled_table<'a, R>(corner: &str, columns: &[String], rows: R, cell: CellFormat) -> String
where
    R: IntoIterator<Item = (&'a str, Vec<f64>)>,
{
    let mut builder = Builder::default();
    builder.push_record(std::iter::once(corner.to_string()).chain(columns.iter().cloned()));
    for (label, values) in rows {
        builder.push_record(
            std::iter::once(label.to_string()).chain(values.into_iter().map(|v| cell.render(v))),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Renders a rate matrix as a table.
pub fn matrix_table(matrix: &RateMatrix, cell: CellFormat) -> String {
    let rows = matrix.rows();
    labeled_table(
        "observation",
        matrix.column_labels(),
        matrix.row_labels().iter().map(String::as_str).zip(rows),
        cell,
    )
}

/// Writes a labeled matrix as CSV to stdout.
pub fn print_matrix_csv(
    corner: &str,
    columns: &[String],
    rows: &[(String, Vec<f64>)],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    wtr.write_record(std::iter::once(corner).chain(columns.iter().map(String::as_str)))?;
    for (label, values) in rows {
        wtr.write_record(
            std::iter::once(label.clone()).chain(values.iter().map(f64::to_string)),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a rate matrix as CSV to stdout.
pub fn print_rate_matrix_csv(matrix: &RateMatrix) -> anyhow::Result<()> {
    let rows: Vec<(String, Vec<f64>)> = matrix
        .row_labels()
        .iter()
        .cloned()
        .zip(matrix.rows())
        .collect();
    print_matrix_csv("observation", matrix.column_labels(), &rows)
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Reports skipped observations on stderr.
pub fn print_skipped(skipped: &[SkippedObservation]) {
    for s in skipped {
        print_warning(&format!(
            "skipped {} ({}): {}",
            s.observation,
            s.reason.kind(),
            s.reason.root_cause()
        ));
    }
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
