//! Target maturity rungs.

use std::fmt;

use serde::Serialize;

use crate::error::{CurveError, CurveResult};

/// One target horizon of the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaturityRung {
    years: f64,
    label: String,
}

impl MaturityRung {
    /// Creates a rung labeled from its horizon (`"2yr"`, `"0.5yr"`).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfig`] for a non-positive or non-finite horizon.
    pub fn new(years: f64) -> CurveResult<Self> {
        if !years.is_finite() || years <= 0.0 {
            return Err(CurveError::invalid_config(format!(
                "rung horizon must be positive, got {years}"
            )));
        }
        Ok(Self {
            years,
            label: format!("{years}yr"),
        })
    }

    /// Creates a rung with an explicit label.
    pub fn labeled(years: f64, label: impl Into<String>) -> CurveResult<Self> {
        let mut rung = Self::new(years)?;
        rung.label = label.into();
        Ok(rung)
    }

    /// Horizon in years.
    pub fn years(&self) -> f64 {
        self.years
    }

    /// Column label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for MaturityRung {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Ordered, non-empty set of rungs with strictly increasing horizons.
///
/// The order is load-bearing: the bootstrap discounts rung `i` coupons with
/// the rates already solved for rungs `0..i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RungSet {
    rungs: Vec<MaturityRung>,
}

impl RungSet {
    /// Builds a rung set from horizons in years.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidConfig`] for an empty list or a bad horizon
    /// - [`CurveError::NonMonotonicRungs`] when horizons are not strictly increasing
    pub fn from_years(years: &[f64]) -> CurveResult<Self> {
        if years.is_empty() {
            return Err(CurveError::invalid_config("at least one maturity rung is required"));
        }

        let rungs = years
            .iter()
            .map(|&y| MaturityRung::new(y))
            .collect::<CurveResult<Vec<_>>>()?;

        for (index, pair) in rungs.windows(2).enumerate() {
            if pair[1].years <= pair[0].years {
                return Err(CurveError::NonMonotonicRungs {
                    index: index + 1,
                    prev: pair[0].years,
                    current: pair[1].years,
                });
            }
        }

        Ok(Self { rungs })
    }

    /// Annual rungs `1yr..{n}yr`.
    pub fn annual(n: usize) -> CurveResult<Self> {
        let years: Vec<f64> = (1..=n).map(|y| y as f64).collect();
        Self::from_years(&years)
    }

    /// Number of rungs.
    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }

    /// Rung at `index`.
    pub fn get(&self, index: usize) -> Option<&MaturityRung> {
        self.rungs.get(index)
    }

    /// Iterates rungs in horizon order.
    pub fn iter(&self) -> std::slice::Iter<'_, MaturityRung> {
        self.rungs.iter()
    }

    /// Horizons in years.
    pub fn horizons(&self) -> Vec<f64> {
        self.rungs.iter().map(MaturityRung::years).collect()
    }

    /// Column labels.
    pub fn labels(&self) -> Vec<String> {
        self.rungs.iter().map(|r| r.label.clone()).collect()
    }

    /// Borrows the rungs as a slice.
    pub fn as_slice(&self) -> &[MaturityRung] {
        &self.rungs
    }
}

impl<'a> IntoIterator for &'a RungSet {
    type Item = &'a MaturityRung;
    type IntoIter = std::slice::Iter<'a, MaturityRung>;

    fn into_iter(self) -> Self::IntoIter {
        self.rungs.iter()
    }
}

impl Default for RungSet {
    /// Annual rungs from one to five years.
    fn default() -> Self {
        Self {
            rungs: (1..=5)
                .map(|y| MaturityRung {
                    years: f64::from(y),
                    label: format!("{y}yr"),
                })
                .collect(),
        }
    }
}
