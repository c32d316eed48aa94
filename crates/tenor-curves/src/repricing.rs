//! Repricing validation for the spot bootstrap.
//!
//! Every solved spot rate must reprice the bond it was solved from, given the
//! rates already solved for earlier rungs. A curve that cannot reprice its
//! inputs within tolerance is wrong.

use std::fmt;

use serde::Serialize;

use crate::curve::RateCurve;

/// Result of repricing one rung's bond.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingCheck {
    /// Rung label.
    pub rung: String,
    /// Quoted price.
    pub target_price: f64,
    /// Price implied by the solved rates.
    pub model_price: f64,
    /// `|model_price - target_price|`.
    pub error: f64,
    /// Allowed error in price units.
    pub tolerance: f64,
    /// Whether the check passed.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check.
    #[must_use]
    pub fn new(
        rung: impl Into<String>,
        target_price: f64,
        model_price: f64,
        tolerance: f64,
    ) -> Self {
        let error = (model_price - target_price).abs();
        Self {
            rung: rung.into(),
            target_price,
            model_price,
            error,
            tolerance,
            passed: error <= tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "ok" } else { "FAIL" };
        write!(
            f,
            "{status:>4} {} | price: {:.6} | model: {:.6} | error: {:.2e} (tol: {:.2e})",
            self.rung, self.target_price, self.model_price, self.error, self.tolerance
        )
    }
}

/// Repricing checks for a whole curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
}

impl RepricingReport {
    /// Creates a report from per-rung checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        Self { checks }
    }

    /// True when every rung repriced within tolerance.
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Largest absolute pricing error.
    pub fn max_error(&self) -> f64 {
        self.checks.iter().map(|c| c.error).fold(0.0_f64, f64::max)
    }

    /// Root mean square pricing error.
    pub fn rms_error(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.checks.iter().map(|c| c.error * c.error).sum();
        (sum_sq / self.checks.len() as f64).sqrt()
    }

    /// Per-rung checks.
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Checks that failed.
    pub fn failures(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.checks.iter().filter(|c| c.passed).count();
        writeln!(
            f,
            "Repricing: {} ({passed}/{} rungs)",
            if self.all_passed() { "PASSED" } else { "FAILED" },
            self.checks.len()
        )?;
        writeln!(f, "Max error: {:.2e}  RMS error: {:.2e}", self.max_error(), self.rms_error())?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}

/// A bootstrapped curve together with its repricing report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapResult {
    /// The spot curve.
    pub curve: RateCurve,
    /// Repricing audit of the inputs.
    pub repricing: RepricingReport,
}

impl BootstrapResult {
    /// True when every input repriced within tolerance.
    pub fn is_valid(&self) -> bool {
        self.repricing.all_passed()
    }
}
