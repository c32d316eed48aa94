//! Log-return covariance and its eigen decomposition.
//!
//! One analyzer serves yield, spot and forward matrices alike: it only sees
//! a [`RateMatrix`].

use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tenor_math::linear_algebra::{symmetric_eigen, EigenOrdering};
use tenor_math::statistics::{log_returns, sample_covariance};
use tenor_math::MathError;

use crate::error::{CurveError, CurveResult};
use crate::matrix::RateMatrix;

/// Largest entry of `V diag(lambda) V^T - C` tolerated, relative to `max |C|`.
const RECONSTRUCTION_TOLERANCE: f64 = 1e-9;

/// Covariance analysis of a rate matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceResult {
    /// Rung labels, shared by rows and columns of the covariance.
    pub labels: Vec<String>,
    /// Log returns; rows are labeled by the later observation of each pair.
    pub returns: RateMatrix,
    /// Unbiased sample covariance of the returns.
    pub covariance: DMatrix<f64>,
    /// Eigenvalues in the analyzer's ordering.
    pub eigenvalues: DVector<f64>,
    /// Eigenvectors as columns, matching `eigenvalues`.
    pub eigenvectors: DMatrix<f64>,
}

impl CovarianceResult {
    /// Share of total variance carried by each eigenvalue.
    ///
    /// All zeros when the total variance is zero.
    pub fn explained_variance(&self) -> Vec<f64> {
        let total: f64 = self.eigenvalues.iter().sum();
        if total.abs() <= f64::EPSILON {
            return vec![0.0; self.eigenvalues.len()];
        }
        self.eigenvalues.iter().map(|v| v / total).collect()
    }

    /// Eigenvector `k` as a plain vector.
    pub fn eigenvector(&self, k: usize) -> Option<Vec<f64>> {
        (k < self.eigenvectors.ncols())
            .then(|| self.eigenvectors.column(k).iter().copied().collect())
    }
}

fn matrix_rows(m: &DMatrix<f64>) -> Vec<Vec<f64>> {
    m.row_iter().map(|r| r.iter().copied().collect()).collect()
}

impl Serialize for CovarianceResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let eigenvectors: Vec<Vec<f64>> = (0..self.eigenvectors.ncols())
            .filter_map(|k| self.eigenvector(k))
            .collect();
        let mut state = serializer.serialize_struct("CovarianceResult", 6)?;
        state.serialize_field("labels", &self.labels)?;
        state.serialize_field("returns", &self.returns)?;
        state.serialize_field("covariance", &matrix_rows(&self.covariance))?;
        state.serialize_field("eigenvalues", &self.eigenvalues.iter().collect::<Vec<_>>())?;
        state.serialize_field("eigenvectors", &eigenvectors)?;
        state.serialize_field("explained_variance", &self.explained_variance())?;
        state.end()
    }
}

/// Computes log returns, their covariance and its eigenpairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CovarianceAnalyzer {
    ordering: EigenOrdering,
}

impl CovarianceAnalyzer {
    /// Creates an analyzer with the given eigenpair ordering.
    #[must_use]
    pub fn new(ordering: EigenOrdering) -> Self {
        Self { ordering }
    }

    /// Per-column log returns `ln(x_t / x_{t-1})`.
    ///
    /// The first observation has no predecessor and produces no row.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InsufficientData`] for fewer than two observations
    /// - [`CurveError::NonPositiveReturn`] naming the column and observation
    ///   of the first non-positive level
    pub fn log_returns(&self, matrix: &RateMatrix) -> CurveResult<RateMatrix> {
        if matrix.nrows() < 2 {
            return Err(CurveError::insufficient_data("insufficient history", 2, matrix.nrows()));
        }

        let returns = log_returns(matrix.values()).map_err(|e| match e {
            MathError::NonPositiveValue { row, column, value } => CurveError::NonPositiveReturn {
                column: matrix.column_labels()[column].clone(),
                observation: matrix.row_labels()[row].clone(),
                value,
            },
            other => CurveError::Math(other),
        })?;

        RateMatrix::new(
            matrix.row_labels()[1..].to_vec(),
            matrix.column_labels().to_vec(),
            returns,
        )
    }

    /// Full covariance analysis of a rate matrix.
    ///
    /// # Errors
    ///
    /// As [`Self::log_returns`], plus [`CurveError::InsufficientData`] when
    /// fewer than two return rows remain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nalgebra::DMatrix;
    /// use tenor_curves::prelude::*;
    ///
    /// let matrix = RateMatrix::new(
    ///     vec!["jan".into(), "feb".into(), "mar".into()],
    ///     vec!["1yr".into(), "2yr".into()],
    ///     DMatrix::from_row_slice(3, 2, &[0.030, 0.032, 0.031, 0.034, 0.029, 0.031]),
    /// )
    /// .unwrap();
    ///
    /// let result = CovarianceAnalyzer::default().analyze(&matrix).unwrap();
    /// assert_eq!(result.covariance.shape(), (2, 2));
    /// assert!(result.eigenvalues[0] >= result.eigenvalues[1]);
    /// ```
    pub fn analyze(&self, matrix: &RateMatrix) -> CurveResult<CovarianceResult> {
        let returns = self.log_returns(matrix)?;
        if returns.nrows() < 2 {
            return Err(CurveError::insufficient_data("insufficient history", 2, returns.nrows()));
        }

        let covariance = sample_covariance(returns.values())?;
        let eigen = symmetric_eigen(&covariance, self.ordering)?;
        let rebuild_error = eigen.reconstruction_error(&covariance);
        debug!(
            "covariance over {} return rows x {} columns, leading eigenvalue {:.3e}, \
             reconstruction error {:.1e}",
            returns.nrows(),
            returns.ncols(),
            eigen.eigenvalues.get(0).copied().unwrap_or(f64::NAN),
            rebuild_error
        );
        if rebuild_error > RECONSTRUCTION_TOLERANCE * covariance.amax() {
            return Err(CurveError::Math(MathError::invalid_input(format!(
                "eigenpairs reproduce the covariance only to {rebuild_error:.2e}"
            ))));
        }

        Ok(CovarianceResult {
            labels: matrix.column_labels().to_vec(),
            returns,
            covariance,
            eigenvalues: eigen.eigenvalues,
            eigenvectors: eigen.eigenvectors,
        })
    }
}
