//! Root-finding algorithms.
//!
//! All solvers here are derivative-free: callers hand over a residual
//! function and the solver never needs an analytical slope.
//!
//! - [`newton_numerical`]: quasi-Newton iteration on a central-difference slope
//! - [`brent`]: inverse quadratic interpolation guarded by bisection
//! - [`bisection`]: plain interval halving
//! - [`hybrid`]: quasi-Newton first, Brent over a bracket if Newton stalls
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Quasi-Newton | Fast (superlinear) | May diverge | Initial guess |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess |
//!
//! *When a bracket is supplied or can be found around the initial guess.
//!
//! # Example: single zero-coupon rate
//!
//! ```rust
//! use tenor_math::solvers::{SolverConfig, SolverKind};
//!
//! // 2-year zero priced at 92, semi-annual compounding
//! let residual = |r: f64| 100.0 / (1.0 + r / 2.0).powf(4.0) - 92.0;
//!
//! let result = SolverKind::Hybrid
//!     .find_root(residual, 0.05, Some((-0.5, 1.0)), &SolverConfig::default())
//!     .unwrap();
//! assert!(residual(result.root).abs() < 1e-10);
//! ```

mod bisection;
mod brent;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use brent::brent;
pub use hybrid::{find_bracket, hybrid};
pub use newton::newton_numerical;

use serde::{Deserialize, Serialize};

use crate::error::MathResult;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
///
/// `tolerance` is an absolute bound on the residual `|f(x)|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

impl SolverResult {
    /// Returns true when the residual satisfies the given tolerance.
    pub fn within(&self, tolerance: f64) -> bool {
        self.residual.is_finite() && self.residual.abs() <= tolerance
    }
}

/// Selects which root-finding algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Quasi-Newton with Brent fallback.
    #[default]
    Hybrid,
    /// Quasi-Newton only.
    Newton,
    /// Brent's method over a bracket.
    Brent,
    /// Bisection over a bracket.
    Bisection,
}

impl SolverKind {
    /// Finds a root of `f`.
    ///
    /// Bracketing methods use `bounds` when given and otherwise search for a
    /// sign change around `initial_guess`.
    pub fn find_root<F>(
        self,
        f: F,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Self::Hybrid => hybrid(f, initial_guess, bounds, config),
            Self::Newton => newton_numerical(f, initial_guess, config),
            Self::Brent => {
                let (a, b) = bracket_for(&f, initial_guess, bounds)?;
                brent(f, a, b, config)
            }
            Self::Bisection => {
                let (a, b) = bracket_for(&f, initial_guess, bounds)?;
                bisection(f, a, b, config)
            }
        }
    }

    /// Returns the name of the solver.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hybrid => "Hybrid (quasi-Newton + Brent)",
            Self::Newton => "Quasi-Newton",
            Self::Brent => "Brent",
            Self::Bisection => "Bisection",
        }
    }
}

fn bracket_for<F>(f: &F, initial_guess: f64, bounds: Option<(f64, f64)>) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    match bounds {
        Some(bracket) => Ok(bracket),
        None => find_bracket(f, initial_guess).ok_or_else(|| {
            crate::MathError::invalid_input(format!(
                "no sign change found around initial guess {initial_guess}"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Coupon bond priced off a single semi-annual rate.
    fn bond_price(rate: f64, coupon: f64, years: i32) -> f64 {
        let periods = years * 2;
        let per_period = coupon / 2.0;
        let mut pv = 0.0;
        for t in 1..=periods {
            pv += per_period / (1.0 + rate / 2.0).powi(t);
        }
        pv + 100.0 / (1.0 + rate / 2.0).powi(periods)
    }

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert_relative_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_all_kinds_agree_on_par_bond() {
        let f = |y: f64| bond_price(y, 5.0, 10) - 100.0;
        let config = SolverConfig::default();

        for kind in [
            SolverKind::Hybrid,
            SolverKind::Newton,
            SolverKind::Brent,
            SolverKind::Bisection,
        ] {
            let result = kind.find_root(f, 0.03, Some((0.0, 0.2)), &config).unwrap();
            assert_relative_eq!(result.root, 0.05, epsilon = 1e-9);
            assert!(result.within(1e-8), "{} residual {}", kind.name(), result.residual);
        }
    }

    #[test]
    fn test_bracketing_without_bounds_searches() {
        let f = |y: f64| bond_price(y, 4.0, 5) - 97.0;
        let result = SolverKind::Brent
            .find_root(f, 0.05, None, &SolverConfig::default())
            .unwrap();
        assert!(result.root > 0.04);
        assert!(f(result.root).abs() < 1e-9);
    }

    #[test]
    fn test_default_kind_is_hybrid() {
        assert_eq!(SolverKind::default(), SolverKind::Hybrid);
        assert_eq!(SolverKind::Brent.name(), "Brent");
    }
}
