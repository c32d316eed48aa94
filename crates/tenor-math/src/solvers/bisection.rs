//! Bisection root finding.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection method.
///
/// Halves the bracket until the midpoint residual is below tolerance or the
/// bracket can no longer be split in floating point. Slow but cannot diverge.
///
/// # Example
///
/// ```rust
/// use tenor_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 0.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() {
        return Err(MathError::invalid_input(format!(
            "bracket endpoints not in domain: f({lo}) = {f_lo}, f({hi}) = {f_hi}"
        )));
    }

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    let mut mid = 0.5 * (lo + hi);
    let mut f_mid = f(mid);

    for iteration in 1..=config.max_iterations {
        if f_mid.abs() < config.tolerance || mid <= lo || mid >= hi {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }

        mid = 0.5 * (lo + hi);
        f_mid = f(mid);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_mid.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_year_zero() {
        // 98 = 100 / (1 + r/2)^2
        let f = |r: f64| 100.0 / (1.0 + r / 2.0).powi(2) - 98.0;
        let expected = 2.0 * ((100.0_f64 / 98.0).sqrt() - 1.0);

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 1.0, 3.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.root, 1.0);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;

        assert!(bisection(f, -1.0, 1.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_budget_exhausted() {
        let f = |x: f64| x - 0.123_456_789;
        let config = SolverConfig::new(1e-14, 5);

        let result = bisection(f, 0.0, 1.0, &config);

        assert!(matches!(result, Err(MathError::ConvergenceFailed { .. })));
    }
}
