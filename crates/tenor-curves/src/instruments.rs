//! Typed quote records.
//!
//! Everything downstream of [`crate::quotes`] works with these records only.

use serde::Serialize;

use crate::error::{CurveError, CurveResult};

/// Face value every price is quoted against.
pub const FACE_VALUE: f64 = 100.0;

/// Coupon payments per year.
pub const COUPON_FREQUENCY: f64 = 2.0;

/// A coupon-bearing bond quote.
///
/// Prices are per 100 face; the coupon rate is an annual decimal paid
/// semi-annually.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bond {
    price: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
}

impl Bond {
    /// Creates a bond quote.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidQuote`] (row 0) when the price or maturity
    /// is not strictly positive, or the coupon rate is outside `[0, 1]`.
    pub fn new(price: f64, coupon_rate: f64, years_to_maturity: f64) -> CurveResult<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(CurveError::invalid_quote(
                0,
                format!("price must be positive, got {price}"),
            ));
        }
        if !coupon_rate.is_finite() || !(0.0..=1.0).contains(&coupon_rate) {
            return Err(CurveError::invalid_quote(
                0,
                format!("coupon rate must be a decimal in [0, 1], got {coupon_rate}"),
            ));
        }
        if !years_to_maturity.is_finite() || years_to_maturity <= 0.0 {
            return Err(CurveError::invalid_quote(
                0,
                format!("maturity must be positive, got {years_to_maturity}"),
            ));
        }
        Ok(Self {
            price,
            coupon_rate,
            years_to_maturity,
        })
    }

    /// Clean price per 100 face.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Annual coupon rate as a decimal.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Time to maturity in years.
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Cash paid on each semi-annual coupon date.
    pub fn coupon_payment(&self) -> f64 {
        self.coupon_rate * FACE_VALUE / COUPON_FREQUENCY
    }
}

/// A quoted yield to maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldQuote {
    years_to_maturity: f64,
    yield_rate: f64,
}

impl YieldQuote {
    /// Creates a yield quote. The yield is a decimal (0.045 for 4.5%).
    pub fn new(years_to_maturity: f64, yield_rate: f64) -> CurveResult<Self> {
        if !years_to_maturity.is_finite() || years_to_maturity <= 0.0 {
            return Err(CurveError::invalid_quote(
                0,
                format!("maturity must be positive, got {years_to_maturity}"),
            ));
        }
        if !yield_rate.is_finite() {
            return Err(CurveError::invalid_quote(0, "yield must be finite"));
        }
        Ok(Self {
            years_to_maturity,
            yield_rate,
        })
    }

    /// Time to maturity in years.
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Yield as a decimal.
    pub fn yield_rate(&self) -> f64 {
        self.yield_rate
    }
}
