//! Quasi-Newton root finding on a finite-difference slope.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Relative bump used for the central-difference slope.
const SLOPE_BUMP: f64 = 1e-7;

/// Quasi-Newton root-finding algorithm.
///
/// Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)` where `f'` is estimated by a
/// central difference, so only the residual function is required.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if the slope vanishes,
/// the iterate leaves the function's domain, or the budget runs out.
///
/// # Example
///
/// ```rust
/// use tenor_math::solvers::{newton_numerical, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = newton_numerical(f, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn newton_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if !fx.is_finite() {
            return Err(MathError::invalid_input(format!(
                "residual is not finite at x = {x}"
            )));
        }

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let slope = central_difference(&f, x);
        if !slope.is_finite() || slope.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: slope });
        }

        let step = fx / slope;
        x -= step;

        if step.abs() < f64::EPSILON * x.abs().max(1.0) {
            let final_fx = f(x);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: final_fx,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

/// Central-difference estimate of `f'(x)`.
pub(crate) fn central_difference<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = SLOPE_BUMP * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = newton_numerical(f, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_discount_factor_inversion() {
        // (1 + r/2)^-6 = 0.9 -> r = 2 * (0.9^(-1/6) - 1)
        let f = |r: f64| (1.0 + r / 2.0).powi(-6) - 0.9;
        let expected = 2.0 * (0.9_f64.powf(-1.0 / 6.0) - 1.0);

        let result = newton_numerical(f, 0.05, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_function_fails() {
        let f = |_x: f64| 1.0;

        let result = newton_numerical(f, 0.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_budget_exhausted() {
        // atan has a root at 0 but Newton overshoots from far away
        let f = |x: f64| x.atan();
        let config = SolverConfig::new(1e-12, 3);

        let result = newton_numerical(f, 3.0, &config);

        assert!(result.is_err());
    }
}
