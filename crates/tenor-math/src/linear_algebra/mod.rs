//! Linear algebra utilities.
//!
//! Eigen decomposition of symmetric matrices (covariance matrices in
//! practice) with a reproducible ordering of the eigenpairs.

use std::cmp::Ordering;

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Iteration cap handed to the QR sweeps inside nalgebra.
const EIGEN_MAX_SWEEPS: usize = 1_000;

/// Relative tolerance for the symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Order in which eigenpairs are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EigenOrdering {
    /// Largest eigenvalue first (principal components order).
    #[default]
    Descending,
    /// Smallest eigenvalue first.
    Ascending,
    /// Whatever order the decomposition produced, signs untouched.
    Unordered,
}

/// Eigenvalues with matching eigenvectors.
///
/// Column `i` of `eigenvectors` belongs to `eigenvalues[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    /// Eigenvalues.
    pub eigenvalues: DVector<f64>,
    /// Unit eigenvectors stored as columns.
    pub eigenvectors: DMatrix<f64>,
}

impl EigenDecomposition {
    /// Number of eigenpairs.
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// True when the decomposition is empty.
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Rebuilds `V * diag(lambda) * V^T`.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.eigenvectors
            * DMatrix::from_diagonal(&self.eigenvalues)
            * self.eigenvectors.transpose()
    }

    /// Largest absolute entry of `reconstruct() - matrix`.
    pub fn reconstruction_error(&self, matrix: &DMatrix<f64>) -> f64 {
        (self.reconstruct() - matrix).amax()
    }
}

/// Returns true if `matrix` is square and symmetric within a relative tolerance.
pub fn is_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    if !matrix.is_square() {
        return false;
    }
    let scale = matrix.amax().max(1.0);
    let n = matrix.nrows();
    (0..n).all(|i| (i + 1..n).all(|j| (matrix[(i, j)] - matrix[(j, i)]).abs() <= tolerance * scale))
}

/// Eigen decomposition of a symmetric matrix.
///
/// With [`EigenOrdering::Descending`] or [`EigenOrdering::Ascending`] the pairs
/// are sorted and every eigenvector is flipped so that its largest-magnitude
/// component is positive, which makes the output reproducible.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use tenor_math::linear_algebra::{symmetric_eigen, EigenOrdering};
///
/// let m = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
/// let eig = symmetric_eigen(&m, EigenOrdering::Descending).unwrap();
///
/// assert!((eig.eigenvalues[0] - 3.0).abs() < 1e-12);
/// assert!((eig.eigenvalues[1] - 1.0).abs() < 1e-12);
/// ```
pub fn symmetric_eigen(
    matrix: &DMatrix<f64>,
    ordering: EigenOrdering,
) -> MathResult<EigenDecomposition> {
    if !matrix.is_square() {
        return Err(MathError::NotSquare {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        });
    }
    if matrix.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("matrix contains non-finite entries"));
    }
    if !is_symmetric(matrix, SYMMETRY_TOLERANCE) {
        return Err(MathError::invalid_input("matrix is not symmetric"));
    }

    let eigen = SymmetricEigen::try_new(matrix.clone(), f64::EPSILON, EIGEN_MAX_SWEEPS)
        .ok_or_else(|| MathError::convergence_failed(EIGEN_MAX_SWEEPS as u32, f64::NAN))?;

    let n = eigen.eigenvalues.len();
    let mut order: Vec<usize> = (0..n).collect();
    match ordering {
        EigenOrdering::Descending => {
            order.sort_by(|&a, &b| total_cmp(eigen.eigenvalues[b], eigen.eigenvalues[a]));
        }
        EigenOrdering::Ascending => {
            order.sort_by(|&a, &b| total_cmp(eigen.eigenvalues[a], eigen.eigenvalues[b]));
        }
        EigenOrdering::Unordered => {
            return Ok(EigenDecomposition {
                eigenvalues: eigen.eigenvalues,
                eigenvectors: eigen.eigenvectors,
            });
        }
    }

    let eigenvalues = DVector::from_iterator(n, order.iter().map(|&i| eigen.eigenvalues[i]));
    let mut eigenvectors = DMatrix::zeros(n, n);
    for (dst, &src) in order.iter().enumerate() {
        let column = eigen.eigenvectors.column(src);
        let pivot = column
            .iter()
            .copied()
            .max_by(|a, b| total_cmp(a.abs(), b.abs()))
            .unwrap_or(0.0);
        let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
        eigenvectors.set_column(dst, &(column * sign));
    }

    Ok(EigenDecomposition {
        eigenvalues,
        eigenvectors,
    })
}

fn total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
