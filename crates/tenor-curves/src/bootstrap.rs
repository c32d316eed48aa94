//! Sequential spot-rate bootstrap.
//!
//! Solves one semi-annually compounded spot rate per rung from coupon bond
//! prices (face 100, coupon `c = coupon_rate * 100 / 2`):
//!
//! ```text
//! rung 0:  price = (100 + c) / (1 + r/2)^(2m)                       (closed form)
//! rung i:  price = Σ_{j<i} c / (1 + s_j/2)^(2(j+1)) + (100 + c) / (1 + r/2)^(2m)
//! ```
//!
//! where `m` is the bond's years to maturity and `s_j` are the rates already
//! solved. The rung-0 closed form ignores coupons paid before maturity; it is
//! exact only when no earlier coupon falls inside the window. Later rungs
//! discount one coupon per earlier rung.

use log::debug;
use serde::{Deserialize, Serialize};
use tenor_math::solvers::{SolverConfig, SolverKind};
use tenor_math::MathError;

use crate::curve::RateCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Bond, FACE_VALUE};
use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
use crate::rungs::RungSet;

/// Configuration for the spot bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Root-finding algorithm for rungs after the first.
    pub solver: SolverKind,
    /// Absolute price residual to converge to.
    pub tolerance: f64,
    /// Iteration budget per rung.
    pub max_iterations: u32,
    /// Starting rate for every solve.
    pub initial_guess: f64,
    /// Lowest plausible spot rate.
    pub min_rate: f64,
    /// Highest plausible spot rate.
    pub max_rate: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            solver: SolverKind::default(),
            tolerance: 1e-8,
            max_iterations: 100,
            initial_guess: 0.05,
            min_rate: -0.5,
            max_rate: 1.0,
        }
    }
}

impl BootstrapConfig {
    /// Sets the solver.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the price tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the initial guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the plausible rate range.
    #[must_use]
    pub fn with_rate_bounds(mut self, min_rate: f64, max_rate: f64) -> Self {
        self.min_rate = min_rate;
        self.max_rate = max_rate;
        self
    }

    /// Solver settings derived from this configuration.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }

    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CurveError::invalid_config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(CurveError::invalid_config("max_iterations must be at least 1"));
        }
        let bounds_finite = self.min_rate.is_finite() && self.max_rate.is_finite();
        if !(bounds_finite && self.min_rate < self.max_rate) {
            return Err(CurveError::invalid_config(format!(
                "rate bounds must satisfy min < max, got [{}, {}]",
                self.min_rate, self.max_rate
            )));
        }
        if self.min_rate <= -2.0 {
            return Err(CurveError::invalid_config(
                "min_rate must stay above -2 (semi-annual discount base must be positive)",
            ));
        }
        if !(self.min_rate..=self.max_rate).contains(&self.initial_guess) {
            return Err(CurveError::invalid_config(format!(
                "initial guess {} outside [{}, {}]",
                self.initial_guess, self.min_rate, self.max_rate
            )));
        }
        Ok(())
    }
}

/// Rung-0 spot rate from the closed form.
///
/// ```rust
/// use tenor_curves::bootstrap::closed_form_spot;
/// use tenor_curves::Bond;
///
/// let r = closed_form_spot(&Bond::new(98.0, 0.03, 1.0).unwrap());
/// assert!((r - 0.035401).abs() < 1e-6);
/// ```
pub fn closed_form_spot(bond: &Bond) -> f64 {
    let redemption = FACE_VALUE + bond.coupon_payment();
    let periods = 2.0 * bond.years_to_maturity();
    2.0 * ((redemption / bond.price()).powf(1.0 / periods) - 1.0)
}

/// Model price of the bond at rung `index` given the earlier spot rates and
/// a candidate rate `rate` for the bond's own maturity.
///
/// Only the first `index` entries of `prior` are used.
pub fn model_price(index: usize, prior: &[f64], bond: &Bond, rate: f64) -> f64 {
    let c = bond.coupon_payment();
    let coupons: f64 = prior
        .iter()
        .take(index)
        .enumerate()
        .map(|(j, s)| c / (1.0 + s / 2.0).powf(2.0 * (j + 1) as f64))
        .sum();
    let redemption = (c + FACE_VALUE) / (1.0 + rate / 2.0).powf(2.0 * bond.years_to_maturity());
    coupons + redemption
}

/// Price residual `model_price - price` for rung `index`.
pub fn pricing_residual(index: usize, prior: &[f64], bond: &Bond, rate: f64) -> f64 {
    model_price(index, prior, bond, rate) - bond.price()
}

/// Bootstraps spot curves from selected bonds.
///
/// Stateless apart from its configuration; one instance serves every
/// observation.
///
/// # Example
///
/// ```rust
/// use tenor_curves::bootstrap::SpotBootstrapper;
/// use tenor_curves::{Bond, RungSet};
///
/// let bonds = vec![
///     Bond::new(98.0, 0.03, 1.0).unwrap(),
///     Bond::new(99.5, 0.04, 2.0).unwrap(),
/// ];
/// let result = SpotBootstrapper::default()
///     .bootstrap_validated(&bonds, &RungSet::annual(2).unwrap())
///     .unwrap();
///
/// assert!(result.is_valid());
/// assert_eq!(result.curve.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpotBootstrapper {
    config: BootstrapConfig,
}

impl SpotBootstrapper {
    /// Creates a bootstrapper with the given configuration.
    #[must_use]
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Solves the spot rates, one per bond.
    ///
    /// Bonds are sorted ascending by maturity before solving, whatever order
    /// they arrive in.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InsufficientData`] for an empty input
    /// - [`CurveError::ConvergenceFailure`] when a rung does not converge
    /// - [`CurveError::ImplausibleRate`] for a non-finite or out-of-range rate
    pub fn spot_rates(&self, bonds: &[Bond]) -> CurveResult<Vec<f64>> {
        if bonds.is_empty() {
            return Err(CurveError::insufficient_data("spot bootstrap", 1, 0));
        }
        let sorted = sorted_by_maturity(bonds);
        let solver_config = self.config.solver_config();

        let mut rates: Vec<f64> = Vec::with_capacity(sorted.len());
        for (index, bond) in sorted.iter().enumerate() {
            let rate = if index == 0 {
                let rate = closed_form_spot(bond);
                debug!("rung 0: closed-form spot {rate:.8}");
                rate
            } else {
                let prior = rates.as_slice();
                let residual = |r: f64| pricing_residual(index, prior, bond, r);
                let solved = self
                    .config
                    .solver
                    .find_root(
                        residual,
                        self.config.initial_guess,
                        Some((self.config.min_rate, self.config.max_rate)),
                        &solver_config,
                    )
                    .map_err(|e| convergence_failure(index, &e))?;
                debug!(
                    "rung {index}: spot {:.8} after {} iterations (residual {:.2e})",
                    solved.root, solved.iterations, solved.residual
                );
                if !solved.within(self.config.tolerance) {
                    return Err(CurveError::ConvergenceFailure {
                        rung: index,
                        iterations: solved.iterations,
                        residual: solved.residual.abs(),
                        reason: format!("{} stopped outside tolerance", self.config.solver.name()),
                    });
                }
                solved.root
            };
            self.check_plausible(index, rate)?;
            rates.push(rate);
        }
        Ok(rates)
    }

    /// Bootstraps a spot curve over `rungs`.
    ///
    /// # Errors
    ///
    /// As [`Self::spot_rates`], plus [`CurveError::InsufficientData`] or
    /// [`CurveError::MalformedCurve`] when the bond count differs from the
    /// rung count.
    pub fn bootstrap(&self, bonds: &[Bond], rungs: &RungSet) -> CurveResult<RateCurve> {
        if bonds.len() < rungs.len() {
            return Err(CurveError::insufficient_data("spot bootstrap", rungs.len(), bonds.len()));
        }
        if bonds.len() > rungs.len() {
            return Err(CurveError::malformed_curve(format!(
                "{} bonds for {} rungs",
                bonds.len(),
                rungs.len()
            )));
        }
        let rates = self.spot_rates(bonds)?;
        RateCurve::new(rungs.as_slice().to_vec(), rates)
    }

    /// Bootstraps and reprices every input bond against the solved rates.
    pub fn bootstrap_validated(
        &self,
        bonds: &[Bond],
        rungs: &RungSet,
    ) -> CurveResult<BootstrapResult> {
        let curve = self.bootstrap(bonds, rungs)?;
        let sorted = sorted_by_maturity(bonds);
        let rates = curve.rates();

        let checks = sorted
            .iter()
            .zip(curve.rungs())
            .enumerate()
            .map(|(i, (bond, rung))| {
                RepricingCheck::new(
                    rung.label(),
                    bond.price(),
                    model_price(i, &rates[..i], bond, rates[i]),
                    self.config.tolerance,
                )
            })
            .collect();

        Ok(BootstrapResult {
            curve,
            repricing: RepricingReport::new(checks),
        })
    }

    fn check_plausible(&self, rung: usize, rate: f64) -> CurveResult<()> {
        if rate.is_finite() && (self.config.min_rate..=self.config.max_rate).contains(&rate) {
            Ok(())
        } else {
            Err(CurveError::ImplausibleRate {
                rung,
                rate,
                min: self.config.min_rate,
                max: self.config.max_rate,
            })
        }
    }
}

fn sorted_by_maturity(bonds: &[Bond]) -> Vec<Bond> {
    let mut sorted = bonds.to_vec();
    sorted.sort_by(|a, b| a.years_to_maturity().total_cmp(&b.years_to_maturity()));
    sorted
}

fn convergence_failure(rung: usize, err: &MathError) -> CurveError {
    let (iterations, residual) = match err {
        MathError::ConvergenceFailed {
            iterations,
            residual,
        } => (*iterations, *residual),
        MathError::InvalidBracket { fa, fb, .. } => (0, fa.abs().min(fb.abs())),
        _ => (0, f64::NAN),
    };
    CurveError::ConvergenceFailure {
        rung,
        iterations,
        residual,
        reason: err.to_string(),
    }
}
