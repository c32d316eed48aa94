//! Error types for curve construction and analysis.
//!
//! Per-observation failures (selection, bootstrap, forward derivation) are
//! recovered by [`crate::series::CurveSeriesBuilder`], which records them and
//! moves on. Only [`CurveError::NoUsableObservations`] is terminal for a run.

use tenor_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough usable rows (or history) for the requested operation.
    #[error("Insufficient data for {context}: need at least {required}, got {got}")]
    InsufficientData {
        /// What was being built.
        context: String,
        /// Minimum required count.
        required: usize,
        /// Actual count available.
        got: usize,
    },

    /// Root finder did not reach tolerance within its iteration budget.
    #[error(
        "Bootstrap did not converge at rung {rung} after {iterations} iterations \
         (residual: {residual:.2e}): {reason}"
    )]
    ConvergenceFailure {
        /// Zero-based rung index.
        rung: usize,
        /// Iterations spent.
        iterations: u32,
        /// Final absolute price residual.
        residual: f64,
        /// Solver diagnostic.
        reason: String,
    },

    /// Curve shape unsuitable for the requested derivation.
    #[error("Malformed curve: {reason}")]
    MalformedCurve {
        /// Description of the problem.
        reason: String,
    },

    /// A rate level feeding a log return was zero or negative.
    #[error("Non-positive rate {value} in column {column} at observation '{observation}'")]
    NonPositiveReturn {
        /// Column label.
        column: String,
        /// Row label of the offending level.
        observation: String,
        /// The offending level.
        value: f64,
    },

    /// Solved rate is non-finite or outside the plausible range.
    #[error("Implausible rate {rate} at rung {rung}: outside [{min}, {max}]")]
    ImplausibleRate {
        /// Zero-based rung index.
        rung: usize,
        /// The solved rate.
        rate: f64,
        /// Lower plausible bound.
        min: f64,
        /// Upper plausible bound.
        max: f64,
    },

    /// A quote row could not be normalized.
    #[error("Invalid quote at row {row}: {reason}")]
    InvalidQuote {
        /// Zero-based row index in the source table.
        row: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Rungs are not strictly increasing.
    #[error("Non-monotonic rungs at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicRungs {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous horizon.
        prev: f64,
        /// Current horizon.
        current: f64,
    },

    /// Every observation failed; nothing to stack.
    #[error("No usable observations out of {attempted}")]
    NoUsableObservations {
        /// Number of observations attempted.
        attempted: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Failure attributed to a named observation.
    #[error("Observation '{name}': {source}")]
    Observation {
        /// Observation name.
        name: String,
        /// Underlying failure.
        #[source]
        source: Box<CurveError>,
    },

    /// Numerical failure outside the bootstrap.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(context: impl Into<String>, required: usize, got: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            got,
        }
    }

    /// Creates a malformed curve error.
    #[must_use]
    pub fn malformed_curve(reason: impl Into<String>) -> Self {
        Self::MalformedCurve {
            reason: reason.into(),
        }
    }

    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            row,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Attributes this error to an observation. Already attributed errors are
    /// returned unchanged.
    #[must_use]
    pub fn in_observation(self, name: impl Into<String>) -> Self {
        match self {
            Self::Observation { .. } => self,
            other => Self::Observation {
                name: name.into(),
                source: Box::new(other),
            },
        }
    }

    /// Strips observation attribution.
    pub fn root_cause(&self) -> &CurveError {
        match self {
            Self::Observation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Short category name, used in skip reports.
    pub fn kind(&self) -> &'static str {
        match self.root_cause() {
            Self::InsufficientData { .. } => "insufficient-data",
            Self::ConvergenceFailure { .. } => "convergence-failure",
            Self::MalformedCurve { .. } => "malformed-curve",
            Self::NonPositiveReturn { .. } => "non-positive-return",
            Self::ImplausibleRate { .. } => "implausible-rate",
            Self::InvalidQuote { .. } => "invalid-quote",
            Self::NonMonotonicRungs { .. } => "non-monotonic-rungs",
            Self::NoUsableObservations { .. } => "no-usable-observations",
            Self::InvalidConfig { .. } => "invalid-config",
            Self::Math(_) => "math",
            Self::Observation { .. } => "observation",
        }
    }
}
