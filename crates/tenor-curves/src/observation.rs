//! Named observation sets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::instruments::{Bond, YieldQuote};

/// The quotes available on one observation date.
///
/// Observations are independent of each other apart from their calendar
/// order. The date is optional because some sources only carry a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSet {
    /// Row label in every matrix built from this observation.
    pub name: String,
    /// Calendar date, when known.
    pub date: Option<NaiveDate>,
    /// Bond quotes.
    pub bonds: Vec<Bond>,
    /// Yield quotes.
    pub yields: Vec<YieldQuote>,
}

impl ObservationSet {
    /// Creates an empty observation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: None,
            bonds: Vec::new(),
            yields: Vec::new(),
        }
    }

    /// Sets the date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the bond quotes.
    #[must_use]
    pub fn with_bonds(mut self, bonds: Vec<Bond>) -> Self {
        self.bonds = bonds;
        self
    }

    /// Sets the yield quotes.
    #[must_use]
    pub fn with_yields(mut self, yields: Vec<YieldQuote>) -> Self {
        self.yields = yields;
        self
    }

    /// True when there is nothing to build a curve from.
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty() && self.yields.is_empty()
    }
}

/// Returns true when every dated observation follows the previous dated one.
///
/// Undated observations are ignored.
pub fn is_chronological(observations: &[ObservationSet]) -> bool {
    let dates: Vec<NaiveDate> = observations.iter().filter_map(|o| o.date).collect();
    dates.windows(2).all(|w| w[0] <= w[1])
}
