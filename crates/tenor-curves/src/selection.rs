//! Closest-maturity selection of one quote per rung.

use crate::error::{CurveError, CurveResult};
use crate::instruments::{Bond, YieldQuote};
use crate::observation::ObservationSet;
use crate::rungs::RungSet;

/// Picks one representative quote per rung.
///
/// For every rung the quote with the smallest `|years_to_maturity - horizon|`
/// wins; on a tie the earliest row in input order is kept. The same quote
/// may represent several rungs when the table is sparse.
#[derive(Debug, Clone, Copy, Default)]
pub struct BondSelector;

impl BondSelector {
    /// Selects one bond per rung, in rung order.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientData`] when the observation has
    /// fewer bonds than there are rungs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tenor_curves::prelude::*;
    ///
    /// let obs = ObservationSet::new("jan").with_bonds(vec![
    ///     Bond::new(99.0, 0.04, 2.1).unwrap(),
    ///     Bond::new(98.0, 0.03, 0.9).unwrap(),
    /// ]);
    /// let picked = BondSelector::select(&obs, &RungSet::annual(2).unwrap()).unwrap();
    ///
    /// assert_eq!(picked[0].years_to_maturity(), 0.9);
    /// assert_eq!(picked[1].years_to_maturity(), 2.1);
    /// ```
    pub fn select(observation: &ObservationSet, rungs: &RungSet) -> CurveResult<Vec<Bond>> {
        select_closest(
            &observation.bonds,
            rungs,
            "bond selection",
            Bond::years_to_maturity,
        )
    }

    /// Selects one yield quote per rung, in rung order.
    pub fn select_yields(
        observation: &ObservationSet,
        rungs: &RungSet,
    ) -> CurveResult<Vec<YieldQuote>> {
        select_closest(
            &observation.yields,
            rungs,
            "yield selection",
            YieldQuote::years_to_maturity,
        )
    }
}

fn select_closest<T, M>(
    items: &[T],
    rungs: &RungSet,
    context: &str,
    maturity: M,
) -> CurveResult<Vec<T>>
where
    T: Copy,
    M: Fn(&T) -> f64,
{
    if items.len() < rungs.len() {
        return Err(CurveError::insufficient_data(context, rungs.len(), items.len()));
    }

    rungs
        .horizons()
        .into_iter()
        .map(|horizon| {
            let mut best: Option<(f64, T)> = None;
            for item in items {
                let distance = (maturity(item) - horizon).abs();
                match best {
                    Some((d, _)) if distance >= d => {}
                    _ => best = Some((distance, *item)),
                }
            }
            best.map(|(_, item)| item)
                .ok_or_else(|| CurveError::insufficient_data(context, rungs.len(), 0))
        })
        .collect()
}
