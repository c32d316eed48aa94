//! Curves across many observations.
//!
//! Each observation is processed on its own. A failure (too few bonds, a
//! rung that does not converge, a curve too short for forwards) removes that
//! observation from the matrix and is reported in
//! [`CurveSeries::skipped`]; it never aborts the run. Only when nothing
//! survives does the build fail.

use std::fmt;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::bootstrap::{BootstrapConfig, SpotBootstrapper};
use crate::curve::RateCurve;
use crate::error::{CurveError, CurveResult};
use crate::forward::ForwardDeriver;
use crate::matrix::RateMatrix;
use crate::observation::{is_chronological, ObservationSet};
use crate::parallel::maybe_parallel_map;
use crate::rungs::RungSet;
use crate::selection::BondSelector;

/// Which curve to build per observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// Bootstrapped spot rates.
    #[default]
    Spot,
    /// 1-year-forward rates derived from the spot curve.
    Forward,
    /// Quoted yields, closest maturity per rung.
    Yield,
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spot => "spot",
            Self::Forward => "forward",
            Self::Yield => "yield",
        })
    }
}

/// A curve with the observation it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCurve {
    /// Observation name.
    pub name: String,
    /// Observation date, when known.
    pub date: Option<NaiveDate>,
    /// The curve.
    pub curve: RateCurve,
}

/// An observation left out of a series, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedObservation {
    /// Observation name.
    pub observation: String,
    /// Why it was skipped.
    pub reason: CurveError,
}

impl Serialize for SkippedObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SkippedObservation", 3)?;
        state.serialize_field("observation", &self.observation)?;
        state.serialize_field("kind", self.reason.kind())?;
        state.serialize_field("reason", &self.reason.root_cause().to_string())?;
        state.end()
    }
}

/// Complete curves stacked into a matrix, plus the observations left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSeries {
    /// Which curve was built.
    pub kind: CurveKind,
    /// Surviving curves in input order.
    pub curves: Vec<NamedCurve>,
    /// The same curves as a matrix.
    pub matrix: RateMatrix,
    /// Observations that failed.
    pub skipped: Vec<SkippedObservation>,
}

/// Builds spot, forward and yield curves across observations.
///
/// # Example
///
/// ```rust
/// use tenor_curves::prelude::*;
///
/// let quotes = |p1: f64, p2: f64| {
///     vec![
///         Bond::new(p1, 0.03, 1.0).unwrap(),
///         Bond::new(p2, 0.04, 2.0).unwrap(),
///     ]
/// };
/// let observations = vec![
///     ObservationSet::new("jan").with_bonds(quotes(98.0, 99.5)),
///     ObservationSet::new("feb").with_bonds(quotes(98.1, 99.3)),
///     ObservationSet::new("bad").with_bonds(quotes(98.0, 99.5)[..1].to_vec()),
/// ];
///
/// let series = CurveSeriesBuilder::new(RungSet::annual(2).unwrap())
///     .spot_series(&observations)
///     .unwrap();
///
/// assert_eq!(series.matrix.row_labels(), ["jan", "feb"]);
/// assert_eq!(series.skipped[0].observation, "bad");
/// ```
#[derive(Debug, Clone)]
pub struct CurveSeriesBuilder {
    rungs: RungSet,
    bootstrapper: SpotBootstrapper,
    parallel: bool,
}

impl CurveSeriesBuilder {
    /// Creates a builder over `rungs` with the default bootstrap.
    #[must_use]
    pub fn new(rungs: RungSet) -> Self {
        Self {
            rungs,
            bootstrapper: SpotBootstrapper::default(),
            parallel: false,
        }
    }

    /// Sets the bootstrap configuration.
    #[must_use]
    pub fn with_bootstrap_config(mut self, config: BootstrapConfig) -> Self {
        self.bootstrapper = SpotBootstrapper::new(config);
        self
    }

    /// Processes observations on the rayon pool when the `parallel` feature
    /// is compiled in. Without the feature this is a no-op.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The configured rungs.
    pub fn rungs(&self) -> &RungSet {
        &self.rungs
    }

    /// The bootstrapper in use.
    pub fn bootstrapper(&self) -> &SpotBootstrapper {
        &self.bootstrapper
    }

    /// Spot curve for one observation.
    pub fn spot_curve(&self, observation: &ObservationSet) -> CurveResult<RateCurve> {
        BondSelector::select(observation, &self.rungs)
            .and_then(|bonds| self.bootstrapper.bootstrap(&bonds, &self.rungs))
            .map_err(|e| e.in_observation(&observation.name))
    }

    /// Forward curve for one observation.
    pub fn forward_curve(&self, observation: &ObservationSet) -> CurveResult<RateCurve> {
        let spot = self.spot_curve(observation)?;
        ForwardDeriver::derive(&spot).map_err(|e| e.in_observation(&observation.name))
    }

    /// Quoted-yield curve for one observation.
    pub fn yield_curve(&self, observation: &ObservationSet) -> CurveResult<RateCurve> {
        BondSelector::select_yields(observation, &self.rungs)
            .and_then(|quotes| {
                RateCurve::new(
                    self.rungs.as_slice().to_vec(),
                    quotes.iter().map(|q| q.yield_rate()).collect(),
                )
            })
            .map_err(|e| e.in_observation(&observation.name))
    }

    /// Curve of the given kind for one observation.
    pub fn curve(&self, kind: CurveKind, observation: &ObservationSet) -> CurveResult<RateCurve> {
        match kind {
            CurveKind::Spot => self.spot_curve(observation),
            CurveKind::Forward => self.forward_curve(observation),
            CurveKind::Yield => self.yield_curve(observation),
        }
    }

    /// Builds a series, skipping observations that fail.
    ///
    /// Rows keep the input order. A warning is logged when dated
    /// observations are out of calendar order.
    ///
    /// # Errors
    ///
    /// [`CurveError::NoUsableObservations`] when every observation fails.
    pub fn series(
        &self,
        kind: CurveKind,
        observations: &[ObservationSet],
    ) -> CurveResult<CurveSeries> {
        if !is_chronological(observations) {
            warn!("{kind} series: observations are not in calendar order; rows keep input order");
        }

        let outcomes = maybe_parallel_map(observations, self.parallel, |obs| self.curve(kind, obs));

        let mut curves = Vec::new();
        let mut skipped = Vec::new();
        for (observation, outcome) in observations.iter().zip(outcomes) {
            match outcome {
                Ok(curve) => {
                    debug!("{kind} curve for '{}': {:?}", observation.name, curve.rates());
                    curves.push(NamedCurve {
                        name: observation.name.clone(),
                        date: observation.date,
                        curve,
                    });
                }
                Err(reason) => {
                    warn!("skipping observation: {reason}");
                    skipped.push(SkippedObservation {
                        observation: observation.name.clone(),
                        reason,
                    });
                }
            }
        }

        if curves.is_empty() {
            return Err(CurveError::NoUsableObservations {
                attempted: observations.len(),
            });
        }

        let matrix = RateMatrix::from_curves(curves.iter().map(|c| (c.name.as_str(), &c.curve)))?;
        Ok(CurveSeries {
            kind,
            curves,
            matrix,
            skipped,
        })
    }

    /// Spot series.
    pub fn spot_series(&self, observations: &[ObservationSet]) -> CurveResult<CurveSeries> {
        self.series(CurveKind::Spot, observations)
    }

    /// Forward series.
    pub fn forward_series(&self, observations: &[ObservationSet]) -> CurveResult<CurveSeries> {
        self.series(CurveKind::Forward, observations)
    }

    /// Quoted-yield series.
    pub fn yield_series(&self, observations: &[ObservationSet]) -> CurveResult<CurveSeries> {
        self.series(CurveKind::Yield, observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{Bond, YieldQuote};
    use tenor_math::solvers::SolverKind;

    fn bonds(shift: f64) -> Vec<Bond> {
        vec![
            Bond::new(98.0 + shift, 0.03, 1.0).unwrap(),
            Bond::new(99.5 + shift, 0.04, 2.0).unwrap(),
            Bond::new(99.0 + shift, 0.04, 3.0).unwrap(),
        ]
    }

    fn builder() -> CurveSeriesBuilder {
        CurveSeriesBuilder::new(RungSet::annual(3).unwrap())
    }

    #[test]
    fn test_spot_series_skips_short_observation() {
        let observations = vec![
            ObservationSet::new("a").with_bonds(bonds(0.0)),
            ObservationSet::new("b").with_bonds(bonds(0.0)[..2].to_vec()),
            ObservationSet::new("c").with_bonds(bonds(-0.2)),
        ];
        let series = builder().spot_series(&observations).unwrap();

        assert_eq!(series.matrix.nrows(), 2);
        assert_eq!(series.matrix.row_labels(), ["a", "c"]);
        assert_eq!(series.skipped.len(), 1);
        assert_eq!(series.skipped[0].observation, "b");
        assert_eq!(series.skipped[0].reason.kind(), "insufficient-data");
    }

    #[test]
    fn test_unsolvable_observation_skipped() {
        let mut unreachable = bonds(0.0);
        unreachable[1] = Bond::new(10.0, 0.04, 2.0).unwrap();
        let observations = vec![
            ObservationSet::new("a").with_bonds(bonds(0.0)),
            ObservationSet::new("b").with_bonds(unreachable),
            ObservationSet::new("c").with_bonds(bonds(0.3)),
        ];
        let config = BootstrapConfig::default().with_solver(SolverKind::Brent);
        let series = builder()
            .with_bootstrap_config(config)
            .spot_series(&observations)
            .unwrap();

        assert_eq!(series.matrix.row_labels(), ["a", "c"]);
        assert_eq!(series.skipped.len(), 1);
        assert_eq!(series.skipped[0].observation, "b");
        assert_eq!(series.skipped[0].reason.kind(), "convergence-failure");
        assert!(matches!(
            series.skipped[0].reason.root_cause(),
            CurveError::ConvergenceFailure { rung: 1, .. }
        ));
    }

    #[test]
    fn test_forward_series_columns() {
        let observations = vec![ObservationSet::new("a").with_bonds(bonds(0.0))];
        let series = builder().forward_series(&observations).unwrap();

        assert_eq!(series.matrix.column_labels(), ["1yr-1yr", "1yr-2yr"]);
        assert_eq!(series.kind, CurveKind::Forward);
    }

    #[test]
    fn test_yield_series() {
        let yields = vec![
            YieldQuote::new(1.0, 0.040).unwrap(),
            YieldQuote::new(2.0, 0.041).unwrap(),
            YieldQuote::new(3.1, 0.043).unwrap(),
        ];
        let observations = vec![ObservationSet::new("a").with_yields(yields)];
        let series = builder().yield_series(&observations).unwrap();

        assert_eq!(series.matrix.row(0), Some(vec![0.040, 0.041, 0.043]));
    }

    #[test]
    fn test_nothing_survives() {
        let observations = vec![
            ObservationSet::new("a"),
            ObservationSet::new("b").with_bonds(bonds(0.0)[..1].to_vec()),
        ];
        let err = builder().spot_series(&observations).unwrap_err();

        assert_eq!(err, CurveError::NoUsableObservations { attempted: 2 });
    }

    #[test]
    fn test_errors_name_observation() {
        let obs = ObservationSet::new("2024-03-28");
        let err = builder().spot_curve(&obs).unwrap_err();

        assert!(err.to_string().contains("2024-03-28"));
    }

    #[test]
    fn test_parallel_flag_keeps_order() {
        let observations: Vec<ObservationSet> = (0..8)
            .map(|i| ObservationSet::new(format!("obs{i}")).with_bonds(bonds(f64::from(i) * 0.1)))
            .collect();

        let sequential = builder().spot_series(&observations).unwrap();
        let parallel = builder().with_parallel(true).spot_series(&observations).unwrap();

        assert_eq!(sequential.matrix, parallel.matrix);
    }

    #[test]
    fn test_skipped_serializes_kind() {
        let observations = vec![
            ObservationSet::new("a").with_bonds(bonds(0.0)),
            ObservationSet::new("b"),
        ];
        let series = builder().spot_series(&observations).unwrap();
        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(json["skipped"][0]["observation"], "b");
        assert_eq!(json["skipped"][0]["kind"], "insufficient-data");
        assert_eq!(json["kind"], "spot");
    }
}
