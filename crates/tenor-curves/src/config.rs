//! Pipeline configuration.
//!
//! Every field has a default, so a configuration file only needs the
//! settings it changes:
//!
//! ```toml
//! rungs = [1, 2, 3, 4, 5, 7, 10]
//! eigen_ordering = "descending"
//!
//! [bootstrap]
//! solver = "brent"
//! tolerance = 1e-9
//! ```

use serde::{Deserialize, Serialize};
use tenor_math::linear_algebra::EigenOrdering;

use crate::bootstrap::{BootstrapConfig, SpotBootstrapper};
use crate::covariance::CovarianceAnalyzer;
use crate::error::CurveResult;
use crate::rungs::RungSet;
use crate::series::CurveSeriesBuilder;

/// Settings for a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Rung horizons in years, strictly increasing.
    #[serde(default = "default_rungs")]
    pub rungs: Vec<f64>,

    /// Spot bootstrap settings.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// Order of eigenpairs in covariance results.
    #[serde(default)]
    pub eigen_ordering: EigenOrdering,

    /// Fan observations out over rayon (needs the `parallel` feature).
    #[serde(default)]
    pub parallel: bool,
}

fn default_rungs() -> Vec<f64> {
    vec![1.0, 2.0, 3.0, 4.0, 5.0]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rungs: default_rungs(),
            bootstrap: BootstrapConfig::default(),
            eigen_ordering: EigenOrdering::default(),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Checks rungs and bootstrap settings.
    pub fn validate(&self) -> CurveResult<()> {
        self.rung_set()?;
        self.bootstrap.validate()
    }

    /// The configured rungs.
    pub fn rung_set(&self) -> CurveResult<RungSet> {
        RungSet::from_years(&self.rungs)
    }

    /// A bootstrapper with the configured settings.
    pub fn bootstrapper(&self) -> SpotBootstrapper {
        SpotBootstrapper::new(self.bootstrap)
    }

    /// A series builder over the configured rungs.
    pub fn series_builder(&self) -> CurveResult<CurveSeriesBuilder> {
        self.validate()?;
        Ok(CurveSeriesBuilder::new(self.rung_set()?)
            .with_bootstrap_config(self.bootstrap)
            .with_parallel(self.parallel))
    }

    /// A covariance analyzer with the configured ordering.
    pub fn covariance_analyzer(&self) -> CovarianceAnalyzer {
        CovarianceAnalyzer::new(self.eigen_ordering)
    }
}
