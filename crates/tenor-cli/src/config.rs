//! Pipeline configuration loading.

use std::path::Path;

use tenor_curves::config::PipelineConfig;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Loads a TOML configuration file, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> CliResult<PipelineConfig> {
    let config = match path {
        Some(path) => from_file(path)?,
        None => PipelineConfig::default(),
    };
    config
        .validate()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!(?config, "pipeline configuration");
    Ok(config)
}

/// Reads a configuration from a TOML file.
pub fn from_file(path: &Path) -> CliResult<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}

fn from_toml(content: &str) -> Result<PipelineConfig, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenor_curves::prelude::{EigenOrdering, SolverKind};

    #[test]
    fn test_partial_toml() {
        let config = from_toml(
            r#"
            rungs = [1.0, 2.0, 3.0]
            eigen_ordering = "ascending"

            [bootstrap]
            solver = "bisection"
            "#,
        )
        .unwrap();

        assert_eq!(config.rungs, vec![1.0, 2.0, 3.0]);
        assert_eq!(config.eigen_ordering, EigenOrdering::Ascending);
        assert_eq!(config.bootstrap.solver, SolverKind::Bisection);
        assert_eq!(config.bootstrap.max_iterations, 100);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenor.toml");
        std::fs::write(&path, "rungs = [3.0, 1.0]\n").unwrap();

        assert!(matches!(load(Some(&path)), Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load(Some(Path::new("/nonexistent/tenor.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
