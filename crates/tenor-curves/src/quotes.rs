//! Normalization of loosely typed quote rows.
//!
//! Sources hand over rows of optional strings: a maturity, and either a
//! yield or a price and coupon. Percent-formatted fields (`"4.5%"`) are
//! converted to decimals by stripping the symbol and dividing by 100. The
//! arithmetic goes through [`rust_decimal`] so `"4.5%"` becomes exactly the
//! same `f64` as `"0.045"`.
//!
//! Rows that cannot be turned into a typed record are returned alongside
//! the observation rather than failing it.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::instruments::{Bond, YieldQuote};
use crate::observation::ObservationSet;

/// One untyped row of a quote table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuote {
    /// Years to maturity.
    #[serde(default, alias = "years_to_maturity", alias = "Maturity")]
    pub maturity: Option<String>,
    /// Clean price per 100 face.
    #[serde(default, alias = "Price")]
    pub price: Option<String>,
    /// Annual coupon rate, decimal or percent.
    #[serde(default, alias = "coupon_rate", alias = "Coupon")]
    pub coupon: Option<String>,
    /// Yield to maturity, decimal or percent.
    #[serde(default, rename = "yield", alias = "Yield")]
    pub yield_rate: Option<String>,
}

impl RawQuote {
    /// Row with a price and coupon.
    pub fn bond(maturity: &str, price: &str, coupon: &str) -> Self {
        Self {
            maturity: Some(maturity.to_string()),
            price: Some(price.to_string()),
            coupon: Some(coupon.to_string()),
            yield_rate: None,
        }
    }

    /// Row with a yield.
    pub fn yield_quote(maturity: &str, yield_rate: &str) -> Self {
        Self {
            maturity: Some(maturity.to_string()),
            yield_rate: Some(yield_rate.to_string()),
            ..Self::default()
        }
    }
}

/// Result of normalizing one observation's rows.
#[derive(Debug, Clone)]
pub struct NormalizedObservation {
    /// The typed observation.
    pub observation: ObservationSet,
    /// Rows that could not be used, each as [`CurveError::InvalidQuote`].
    pub rejected: Vec<CurveError>,
}

/// Normalizes raw rows into a named observation.
///
/// A row contributes a [`Bond`] when it has a price and a coupon, and a
/// [`YieldQuote`] when it has a yield; it can contribute both. A row with
/// no maturity, or with neither kind of quote, is rejected.
///
/// # Example
///
/// ```rust
/// use tenor_curves::quotes::{normalize, RawQuote};
///
/// let rows = vec![
///     RawQuote::bond("1", "98.0", "3%"),
///     RawQuote::yield_quote("2", "4.1%"),
///     RawQuote::default(),
/// ];
/// let normalized = normalize("2024-01-31", &rows);
///
/// assert_eq!(normalized.observation.bonds.len(), 1);
/// assert_eq!(normalized.observation.yields.len(), 1);
/// assert_eq!(normalized.rejected.len(), 1);
/// ```
pub fn normalize(name: impl Into<String>, rows: &[RawQuote]) -> NormalizedObservation {
    normalize_numbered(name, rows.iter().enumerate())
}

/// Normalizes rows that carry their own source row numbers.
///
/// Used when some rows of the source table never became a [`RawQuote`],
/// so that rejections still name the right row.
pub fn normalize_numbered<'a, I>(name: impl Into<String>, rows: I) -> NormalizedObservation
where
    I: IntoIterator<Item = (usize, &'a RawQuote)>,
{
    let mut bonds = Vec::new();
    let mut yields = Vec::new();
    let mut rejected = Vec::new();

    for (row, raw) in rows {
        match normalize_row(raw) {
            Ok((bond, quote)) => {
                bonds.extend(bond);
                yields.extend(quote);
            }
            Err(reason) => rejected.push(CurveError::invalid_quote(row, reason)),
        }
    }

    NormalizedObservation {
        observation: ObservationSet::new(name).with_bonds(bonds).with_yields(yields),
        rejected,
    }
}

fn normalize_row(raw: &RawQuote) -> Result<(Option<Bond>, Option<YieldQuote>), String> {
    let maturity = field(raw.maturity.as_deref())
        .ok_or_else(|| "missing maturity".to_string())
        .and_then(|s| parse_number(s).map_err(|e| format!("maturity: {e}")))?;

    let price = field(raw.price.as_deref());
    let coupon = field(raw.coupon.as_deref());
    let yield_rate = field(raw.yield_rate.as_deref());

    let bond = match (price, coupon) {
        (Some(p), Some(c)) => {
            let price = parse_number(p).map_err(|e| format!("price: {e}"))?;
            let coupon = parse_rate(c).map_err(|e| format!("coupon: {e}"))?;
            Some(Bond::new(price, coupon, maturity).map_err(|e| reason_of(&e))?)
        }
        (Some(_), None) => return Err("price without coupon".to_string()),
        (None, Some(_)) => return Err("coupon without price".to_string()),
        (None, None) => None,
    };

    let quote = match yield_rate {
        Some(y) => {
            let y = parse_rate(y).map_err(|e| format!("yield: {e}"))?;
            Some(YieldQuote::new(maturity, y).map_err(|e| reason_of(&e))?)
        }
        None => None,
    };

    if bond.is_none() && quote.is_none() {
        return Err("row has neither a price/coupon pair nor a yield".to_string());
    }
    Ok((bond, quote))
}

fn field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn reason_of(err: &CurveError) -> String {
    match err {
        CurveError::InvalidQuote { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}

/// Parses a rate field. A trailing `%` divides the value by 100.
///
/// ```rust
/// use tenor_curves::quotes::parse_rate;
///
/// assert_eq!(parse_rate("4.5%").unwrap(), 0.045);
/// assert_eq!(parse_rate("0.045").unwrap(), 0.045);
/// ```
pub fn parse_rate(text: &str) -> CurveResult<f64> {
    let trimmed = text.trim();
    match trimmed.strip_suffix('%') {
        Some(number) => {
            let value = parse_decimal(number.trim())? / Decimal::ONE_HUNDRED;
            to_f64(value, text)
        }
        None => parse_number(trimmed),
    }
}

/// Parses a plain number.
pub fn parse_number(text: &str) -> CurveResult<f64> {
    let value = parse_decimal(text.trim())?;
    to_f64(value, text)
}

fn parse_decimal(text: &str) -> CurveResult<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| CurveError::invalid_quote(0, format!("not a number: '{text}'")))
}

fn to_f64(value: Decimal, text: &str) -> CurveResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| CurveError::invalid_quote(0, format!("out of range: '{text}'")))
}
