//! Return and covariance statistics over row-ordered samples.
//!
//! Matrices are laid out with one observation per row and one variable per
//! column. Row order is taken to be chronological.

use nalgebra::DMatrix;

use crate::error::{MathError, MathResult};

/// Computes per-column log returns `ln(x_t / x_{t-1})`.
///
/// The result has one row fewer than `levels`. Every level must be strictly
/// positive; the first offending entry (scanning row by row) is reported.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use tenor_math::statistics::log_returns;
///
/// let levels = DMatrix::from_row_slice(3, 1, &[0.02, 0.04, 0.02]);
/// let returns = log_returns(&levels).unwrap();
///
/// assert_eq!(returns.nrows(), 2);
/// assert!((returns[(0, 0)] - 2.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn log_returns(levels: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let rows = levels.nrows();
    if rows < 2 {
        return Err(MathError::insufficient_data(2, rows));
    }

    for row in 0..rows {
        for column in 0..levels.ncols() {
            let value = levels[(row, column)];
            if value.is_nan() || value <= 0.0 {
                return Err(MathError::NonPositiveValue { row, column, value });
            }
        }
    }

    Ok(DMatrix::from_fn(rows - 1, levels.ncols(), |r, c| {
        (levels[(r + 1, c)] / levels[(r, c)]).ln()
    }))
}

/// Unbiased sample covariance of the columns of `samples`.
///
/// Uses `rows - 1` degrees of freedom. The result is exactly symmetric.
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use tenor_math::statistics::sample_covariance;
///
/// let samples = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]);
/// let cov = sample_covariance(&samples).unwrap();
///
/// assert!((cov[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!((cov[(0, 1)] - 2.0).abs() < 1e-12);
/// assert!((cov[(1, 1)] - 4.0).abs() < 1e-12);
/// ```
pub fn sample_covariance(samples: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let n = samples.nrows();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }
    let k = samples.ncols();
    if k == 0 {
        return Err(MathError::invalid_input("covariance requires at least one column"));
    }

    let means: Vec<f64> = samples.column_iter().map(|col| col.mean()).collect();
    let dof = (n - 1) as f64;

    let mut cov = DMatrix::zeros(k, k);
    for i in 0..k {
        for j in i..k {
            let sum: f64 = (0..n)
                .map(|t| (samples[(t, i)] - means[i]) * (samples[(t, j)] - means[j]))
                .sum();
            let value = sum / dof;
            cov[(i, j)] = value;
            cov[(j, i)] = value;
        }
    }

    Ok(cov)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_returns_shape() {
        let levels = DMatrix::from_row_slice(
            4,
            2,
            &[0.030, 0.040, 0.031, 0.041, 0.029, 0.042, 0.030, 0.040],
        );

        let returns = log_returns(&levels).unwrap();

        assert_eq!(returns.nrows(), 3);
        assert_eq!(returns.ncols(), 2);
        assert_relative_eq!(returns[(0, 0)], (0.031_f64 / 0.030).ln(), epsilon = 1e-15);
        assert_relative_eq!(returns[(2, 1)], (0.040_f64 / 0.042).ln(), epsilon = 1e-15);
    }

    #[test]
    fn test_log_returns_rejects_non_positive() {
        let levels = DMatrix::from_row_slice(3, 2, &[0.03, 0.04, 0.03, 0.0, 0.03, 0.04]);

        let err = log_returns(&levels).unwrap_err();

        assert_eq!(
            err,
            MathError::NonPositiveValue {
                row: 1,
                column: 1,
                value: 0.0
            }
        );
    }

    #[test]
    fn test_log_returns_single_row() {
        let levels = DMatrix::from_row_slice(1, 3, &[0.01, 0.02, 0.03]);

        assert!(matches!(
            log_returns(&levels),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_covariance_symmetric() {
        let samples = DMatrix::from_row_slice(
            5,
            3,
            &[
                0.01, -0.02, 0.005, //
                -0.004, 0.011, 0.002, //
                0.007, 0.003, -0.009, //
                0.000, -0.006, 0.004, //
                0.012, 0.008, 0.001,
            ],
        );

        let cov = sample_covariance(&samples).unwrap();

        assert_eq!(cov.shape(), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(cov[(i, j)], cov[(j, i)]);
            }
            assert!(cov[(i, i)] >= 0.0);
        }
    }

    #[test]
    fn test_covariance_matches_variance() {
        let samples = DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);

        let cov = sample_covariance(&samples).unwrap();

        // Unbiased variance of 1..4 is 5/3
        assert_relative_eq!(cov[(0, 0)], 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_covariance_needs_two_rows() {
        let samples = DMatrix::from_row_slice(1, 2, &[0.1, 0.2]);

        assert!(sample_covariance(&samples).is_err());
    }
}
