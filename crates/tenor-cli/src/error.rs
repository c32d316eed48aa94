//! CLI error types.

use std::path::PathBuf;

use tenor_curves::CurveError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A quote file is not valid CSV.
    #[error("Invalid CSV in {path}: {source}")]
    Csv {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// The file name gives no observation name.
    #[error("Cannot derive an observation name from {0}")]
    InvalidFileName(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Curve construction failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
