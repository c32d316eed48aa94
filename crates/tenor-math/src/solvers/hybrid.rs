//! Hybrid root-finding algorithm.
//!
//! Quasi-Newton for speed, Brent as the safety net.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::newton::central_difference;
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Divergent steps tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Newton iterations attempted before falling back.
const NEWTON_BUDGET: u32 = 20;

/// Hybrid root-finding algorithm.
///
/// # Strategy
///
/// 1. Run quasi-Newton from `initial_guess` with a short budget
/// 2. If it diverges, hits a flat slope, or leaves the domain, switch to Brent
/// 3. Brent uses `bounds` when given, otherwise a bracket found by
///    [`find_bracket`]
///
/// # Example
///
/// ```rust
/// use tenor_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = hybrid(f, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F>(
    f: F,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    match monitored_newton(&f, initial_guess, config) {
        Ok(result) => Ok(result),
        Err(newton_err) => {
            debug!("quasi-Newton abandoned ({newton_err}), falling back to Brent");
            let (a, b) = match bounds {
                Some(bracket) => bracket,
                None => find_bracket(&f, initial_guess).ok_or_else(|| {
                    MathError::invalid_input(
                        "quasi-Newton failed and no bracketing interval was found for Brent",
                    )
                })?,
            };
            let fallback = brent(&f, a, b, config)?;
            Ok(SolverResult {
                iterations: fallback.iterations + newton_iterations(&newton_err),
                ..fallback
            })
        }
    }
}

fn newton_iterations(err: &MathError) -> u32 {
    match err {
        MathError::ConvergenceFailed { iterations, .. } => *iterations,
        _ => 0,
    }
}

/// Quasi-Newton that fails fast on divergence.
fn monitored_newton<F>(f: &F, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;
    let budget = config.max_iterations.min(NEWTON_BUDGET);

    for iteration in 0..budget {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::invalid_input("quasi-Newton left the function domain"));
        }

        let residual = fx.abs();
        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::invalid_input("quasi-Newton diverging"));
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let slope = central_difference(f, x);
        if !slope.is_finite() || slope.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: slope });
        }

        x -= fx / slope;
        if !x.is_finite() {
            return Err(MathError::invalid_input("quasi-Newton produced non-finite value"));
        }
    }

    Err(MathError::convergence_failed(budget, f(x).abs()))
}

/// Searches outward from `center` for an interval with a sign change.
///
/// The interval grows geometrically on both sides. A side whose residual is
/// not finite (outside the function's domain) stops growing.
pub fn find_bracket<F>(f: &F, center: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_center = f(center);
    if !f_center.is_finite() {
        return None;
    }
    if f_center == 0.0 {
        return Some((center, center));
    }

    let mut step = 0.01_f64.max(center.abs() * 0.1);
    let mut lo = (center, f_center);
    let mut hi = (center, f_center);
    let mut lo_open = true;
    let mut hi_open = true;

    for _ in 0..60 {
        if lo_open {
            let x = center - step;
            let fx = f(x);
            if fx.is_finite() {
                if fx * f_center <= 0.0 {
                    return Some((x, lo.0));
                }
                lo = (x, fx);
            } else {
                lo_open = false;
            }
        }
        if hi_open {
            let x = center + step;
            let fx = f(x);
            if fx.is_finite() {
                if fx * f_center <= 0.0 {
                    return Some((hi.0, x));
                }
                hi = (x, fx);
            } else {
                hi_open = false;
            }
        }
        if !lo_open && !hi_open {
            return None;
        }
        step *= 1.6;
    }

    None
}
