//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Keeps a bracket `[b, c]` around the root and at each step tries inverse
/// quadratic interpolation (or a secant step when only two distinct points
/// are known), falling back to bisection whenever the interpolated point
/// would not shrink the bracket fast enough.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use tenor_math::solvers::{brent, SolverConfig};
///
/// // one-year zero-coupon price of 97 with semi-annual compounding
/// let f = |r: f64| 100.0 / (1.0 + r / 2.0).powi(2) - 97.0;
///
/// let result = brent(f, 0.0, 0.5, &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);

    if !fa.is_finite() || !fb.is_finite() {
        return Err(MathError::invalid_input(format!(
            "bracket endpoints not in domain: f({a}) = {fa}, f({b}) = {fb}"
        )));
    }

    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        // Keep c on the opposite side of the root from b
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        // b is always the best estimate so far
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let x_tol = 2.0 * f64::EPSILON * b.abs().max(1.0);
        let half_width = 0.5 * (c - b);

        if fb.abs() < config.tolerance || half_width.abs() <= x_tol {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= x_tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if (a - c).abs() < f64::MIN_POSITIVE {
                // Secant
                (2.0 * half_width * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q0 = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half_width * q0 * (q0 - r) - (b - a) * (r - 1.0)),
                    (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            let limit_interp = 3.0 * half_width * q - (x_tol * q).abs();
            let limit_prev = (e * q).abs();

            if 2.0 * p < limit_interp.min(limit_prev) {
                e = d;
                d = p / q;
            } else {
                d = half_width;
                e = d;
            }
        } else {
            d = half_width;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > x_tol {
            d
        } else {
            x_tol.copysign(half_width)
        };
        fb = f(b);

        if !fb.is_finite() {
            return Err(MathError::invalid_input(format!(
                "residual is not finite at x = {b}"
            )));
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two-year zero priced at 95 under semi-annual compounding.
    fn zero_residual(r: f64) -> f64 {
        100.0 / (1.0 + r / 2.0).powi(4) - 95.0
    }

    #[test]
    fn test_zero_coupon_rate() {
        let result = brent(zero_residual, -0.5, 1.0, &SolverConfig::default()).unwrap();

        let expected = 2.0 * ((100.0_f64 / 95.0).powf(0.25) - 1.0);
        assert_relative_eq!(result.root, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let a = brent(zero_residual, 1.0, -0.5, &SolverConfig::default()).unwrap();
        let b = brent(zero_residual, -0.5, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(a.root, b.root, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_root() {
        let f = |r: f64| 100.0 / (1.0 + r / 2.0).powi(2) - 100.4;

        let result = brent(f, -0.5, 0.5, &SolverConfig::default()).unwrap();

        assert!(result.root < 0.0);
        assert!(f(result.root).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let result = brent(zero_residual, 0.5, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_converges_quickly() {
        let result = brent(zero_residual, -0.5, 1.0, &SolverConfig::default()).unwrap();

        // halving a 1.5-wide bracket down to 1e-10 takes ~34 steps
        assert!(result.iterations < 20);
    }
}
