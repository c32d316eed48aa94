//! Quote file ingestion.
//!
//! One CSV file per observation. The file stem names the observation; a
//! stem in `YYYY-MM-DD` form also dates it. Columns are matched by header:
//! `maturity` (or `years_to_maturity`), `price`, `coupon`, `yield`. Extra
//! columns are ignored and every cell may be blank.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::StringRecord;
use tenor_curves::prelude::{normalize_numbered, CurveError, ObservationSet, RawQuote};
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Reads one quote file into an observation.
///
/// Rows that cannot be read are rejected one by one; only a file that
/// cannot be opened, or whose header cannot be read, is an error.
pub fn read_observation(path: &Path) -> CliResult<ObservationSet> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CliError::InvalidFileName(path.to_path_buf()))?
        .to_string();

    let csv_error = |source: csv::Error| CliError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut rows = Vec::new();
    let mut unreadable = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let quote = record
            .and_then(|r| pad_to(r, headers.len()).deserialize::<RawQuote>(Some(&headers)));
        match quote {
            Ok(quote) => rows.push((row, quote)),
            Err(e) => unreadable.push(CurveError::invalid_quote(row, e.to_string())),
        }
    }

    let mut normalized = normalize_numbered(name.as_str(), rows.iter().map(|(i, q)| (*i, q)));
    normalized.rejected.extend(unreadable);
    for rejected in &normalized.rejected {
        warn!(observation = %name, "{rejected}");
    }
    debug!(
        observation = %name,
        bonds = normalized.observation.bonds.len(),
        yields = normalized.observation.yields.len(),
        rejected = normalized.rejected.len(),
        "read quote file"
    );

    let observation = normalized.observation;
    Ok(match NaiveDate::parse_from_str(&name, "%Y-%m-%d") {
        Ok(date) => observation.with_date(date),
        Err(_) => observation,
    })
}

/// Short rows are completed with blank cells.
fn pad_to(mut record: StringRecord, len: usize) -> StringRecord {
    while record.len() < len {
        record.push_field("");
    }
    record
}

/// Reads every file. A file that cannot be read is reported and left out.
/// When all remaining observations are dated they are sorted by date;
/// otherwise command-line order is kept.
///
/// # Errors
///
/// [`CurveError::NoUsableObservations`] when no file can be read.
pub fn read_observations(paths: &[PathBuf]) -> CliResult<Vec<ObservationSet>> {
    let mut observations: Vec<ObservationSet> = paths
        .iter()
        .filter_map(|p| match read_observation(p) {
            Ok(obs) => Some(obs),
            Err(e) => {
                print_warning(&format!("skipped {}: {e}", p.display()));
                None
            }
        })
        .collect();

    if observations.is_empty() {
        return Err(CurveError::NoUsableObservations {
            attempted: paths.len(),
        }
        .into());
    }

    if observations.iter().all(|o| o.date.is_some()) {
        observations.sort_by_key(|o| o.date);
    }
    Ok(observations)
}
