//! Discrete rate curves.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{CurveError, CurveResult};
use crate::rungs::MaturityRung;

/// One rate per rung for a single observation.
///
/// Rates are annualized decimals, semi-annually compounded. A curve is
/// always complete: the constructor rejects mismatched lengths, unordered
/// rungs and non-finite rates, so a partial curve never reaches a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCurve {
    rungs: Vec<MaturityRung>,
    rates: Vec<f64>,
}

impl RateCurve {
    /// Creates a curve from parallel rung and rate vectors.
    ///
    /// # Errors
    ///
    /// - [`CurveError::MalformedCurve`] for empty input, length mismatch or non-finite rates
    /// - [`CurveError::NonMonotonicRungs`] when rungs are not strictly increasing
    pub fn new(rungs: Vec<MaturityRung>, rates: Vec<f64>) -> CurveResult<Self> {
        if rungs.is_empty() {
            return Err(CurveError::malformed_curve("curve has no rungs"));
        }
        if rungs.len() != rates.len() {
            return Err(CurveError::malformed_curve(format!(
                "{} rungs but {} rates",
                rungs.len(),
                rates.len()
            )));
        }
        for (index, pair) in rungs.windows(2).enumerate() {
            if pair[1].years() <= pair[0].years() {
                return Err(CurveError::NonMonotonicRungs {
                    index: index + 1,
                    prev: pair[0].years(),
                    current: pair[1].years(),
                });
            }
        }
        if let Some((i, rate)) = rates.iter().enumerate().find(|(_, r)| !r.is_finite()) {
            return Err(CurveError::malformed_curve(format!(
                "non-finite rate {rate} at rung {i}"
            )));
        }

        Ok(Self { rungs, rates })
    }

    /// Rates in rung order.
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Rungs in horizon order.
    pub fn rungs(&self) -> &[MaturityRung] {
        &self.rungs
    }

    /// Rung labels.
    pub fn labels(&self) -> Vec<&str> {
        self.rungs.iter().map(MaturityRung::label).collect()
    }

    /// Number of rungs.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Always false for a constructed curve.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rate at rung `index`.
    pub fn rate(&self, index: usize) -> Option<f64> {
        self.rates.get(index).copied()
    }

    /// Iterates `(rung, rate)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&MaturityRung, f64)> + '_ {
        self.rungs.iter().zip(self.rates.iter().copied())
    }
}

impl Serialize for RateCurve {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RateCurve", 2)?;
        state.serialize_field("labels", &self.labels())?;
        state.serialize_field("rates", &self.rates)?;
        state.end()
    }
}
