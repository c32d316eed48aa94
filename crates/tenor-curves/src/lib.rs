//! # Tenor Curves
//!
//! Term-structure construction from coupon bond quotes and the risk
//! measures derived from it.
//!
//! This crate provides:
//!
//! - **Quotes**: Normalization of loosely typed quote rows into [`Bond`] and [`YieldQuote`]
//! - **Selection**: One representative bond (or yield) per maturity rung
//! - **Bootstrap**: Semi-annual spot rates solved rung by rung
//! - **Forwards**: 1-year-forward rates anchored at year 1
//! - **Series**: Rate matrices stacked across observation dates
//! - **Covariance**: Log-return covariance and its eigen decomposition
//!
//! ## Quick Start
//!
//! ```rust
//! use tenor_curves::prelude::*;
//!
//! let observation = ObservationSet::new("2024-01-31").with_bonds(vec![
//!     Bond::new(98.0, 0.03, 1.0).unwrap(),
//!     Bond::new(99.5, 0.04, 2.0).unwrap(),
//!     Bond::new(99.0, 0.04, 3.0).unwrap(),
//! ]);
//!
//! let builder = CurveSeriesBuilder::new(RungSet::annual(3).unwrap());
//! let spot = builder.spot_curve(&observation).unwrap();
//! let forward = ForwardDeriver::derive(&spot).unwrap();
//!
//! assert_eq!(spot.len(), 3);
//! assert_eq!(forward.labels(), vec!["1yr-1yr", "1yr-2yr"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

pub mod bootstrap;
pub mod config;
pub mod covariance;
pub mod curve;
pub mod error;
pub mod forward;
pub mod instruments;
pub mod matrix;
pub mod observation;
mod parallel;
pub mod quotes;
pub mod repricing;
pub mod rungs;
pub mod selection;
pub mod series;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapConfig, SpotBootstrapper};
    pub use crate::config::PipelineConfig;
    pub use crate::covariance::{CovarianceAnalyzer, CovarianceResult};
    pub use crate::curve::RateCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::forward::ForwardDeriver;
    pub use crate::instruments::{Bond, YieldQuote};
    pub use crate::matrix::RateMatrix;
    pub use crate::observation::ObservationSet;
    pub use crate::quotes::{normalize, normalize_numbered, NormalizedObservation, RawQuote};
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use crate::rungs::{MaturityRung, RungSet};
    pub use crate::selection::BondSelector;
    pub use crate::series::{
        CurveKind, CurveSeries, CurveSeriesBuilder, NamedCurve, SkippedObservation,
    };
    pub use tenor_math::linear_algebra::EigenOrdering;
    pub use tenor_math::solvers::SolverKind;
}

pub use curve::RateCurve;
pub use error::{CurveError, CurveResult};
pub use instruments::{Bond, YieldQuote};
pub use matrix::RateMatrix;
pub use observation::ObservationSet;
pub use rungs::{MaturityRung, RungSet};
