//! One-year-forward rates anchored at year 1.
//!
//! For a spot curve `s_0..s_{N-1}` on annual rungs (semi-annual
//! compounding), the rate agreed today for borrowing from year 1 to year
//! `j + 1` is
//!
//! ```text
//! f(1, j+1) = [ (1 + s_j)^(2(j+1)) / (1 + s_0)^2 ]^(1 / (2j)) - 1,   j = 1..N-1
//! ```
//!
//! Labels read `"1yr-{j}yr"`: start in one year, run for `j` years.

use crate::curve::RateCurve;
use crate::error::{CurveError, CurveResult};
use crate::rungs::MaturityRung;

/// Tolerance when checking that spot rungs sit on whole years.
const HORIZON_TOLERANCE: f64 = 1e-9;

/// Derives forward curves from spot curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardDeriver;

impl ForwardDeriver {
    /// Derives the `N - 1` forward rates of a spot curve.
    ///
    /// The result is a [`RateCurve`] whose rung `j - 1` has horizon `j + 1`
    /// (the forward's end) and label `"1yr-{j}yr"`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::MalformedCurve`] when the curve has fewer than
    /// two rungs, its rungs are not the annual ladder `1..N`, or a rate makes
    /// the compounding base non-positive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tenor_curves::prelude::*;
    ///
    /// let rungs = RungSet::annual(2).unwrap();
    /// let spot = RateCurve::new(rungs.as_slice().to_vec(), vec![0.03, 0.032]).unwrap();
    /// let forward = ForwardDeriver::derive(&spot).unwrap();
    ///
    /// assert_eq!(forward.labels(), vec!["1yr-1yr"]);
    /// assert!((forward.rates()[0] - 0.034004).abs() < 1e-6);
    /// ```
    pub fn derive(spot: &RateCurve) -> CurveResult<RateCurve> {
        validate_spot(spot)?;
        let rates = forward_rates(spot.rates())?;

        let rungs = (1..spot.len())
            .map(Self::bucket_rung)
            .collect::<CurveResult<Vec<_>>>()?;
        RateCurve::new(rungs, rates)
    }

    /// The rung carrying the `j`-year forward starting in one year.
    pub fn bucket_rung(j: usize) -> CurveResult<MaturityRung> {
        MaturityRung::labeled((j + 1) as f64, format!("1yr-{j}yr"))
    }

    /// Rebuilds `s_j` from `s_0` and `f(1, j+1)`.
    ///
    /// ```text
    /// s_j = [ (1 + s_0)^2 (1 + f)^(2j) ]^(1 / (2(j+1))) - 1
    /// ```
    pub fn reconstruct_spot(first_spot: f64, forward: f64, j: usize) -> f64 {
        let j = j as f64;
        ((1.0 + first_spot).powi(2) * (1.0 + forward).powf(2.0 * j)).powf(1.0 / (2.0 * (j + 1.0)))
            - 1.0
    }
}

/// Forward rates from a bare spot vector.
///
/// # Errors
///
/// [`CurveError::MalformedCurve`] for fewer than two rates or a rate at or
/// below -100%.
pub fn forward_rates(spot: &[f64]) -> CurveResult<Vec<f64>> {
    if spot.len() < 2 {
        return Err(CurveError::malformed_curve(format!(
            "forward derivation needs at least 2 spot rates, got {}",
            spot.len()
        )));
    }
    if let Some((i, s)) = spot.iter().enumerate().find(|(_, s)| s.is_nan() || **s <= -1.0) {
        return Err(CurveError::malformed_curve(format!(
            "spot rate {s} at rung {i} has no compounding base"
        )));
    }

    let anchor = (1.0 + spot[0]).powi(2);
    Ok(spot
        .iter()
        .enumerate()
        .skip(1)
        .map(|(j, s)| {
            let growth = (1.0 + s).powf(2.0 * (j + 1) as f64);
            (growth / anchor).powf(1.0 / (2.0 * j as f64)) - 1.0
        })
        .collect())
}

fn validate_spot(spot: &RateCurve) -> CurveResult<()> {
    for (i, rung) in spot.rungs().iter().enumerate() {
        let expected = (i + 1) as f64;
        if (rung.years() - expected).abs() > HORIZON_TOLERANCE {
            return Err(CurveError::malformed_curve(format!(
                "forward derivation needs annual rungs 1..N; rung {i} is {}",
                rung.label()
            )));
        }
    }
    Ok(())
}
