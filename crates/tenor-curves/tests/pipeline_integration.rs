//! Integration test: quotes to covariance over four month-end observations.
//!
//! Each observation carries bond rows with off-grid maturities, some rows
//! with yields only, and one malformed row. The February file is missing its
//! long end, so it drops out of the spot and forward matrices.

use chrono::NaiveDate;
use tenor_curves::prelude::*;

fn month_end(month: u32) -> NaiveDate {
    let next = NaiveDate::from_ymd_opt(2024, month + 1, 1).unwrap();
    next.pred_opt().unwrap()
}

/// Rows of a quote table: (maturity, price, coupon, yield).
fn table(shift: f64, long_end: bool) -> Vec<RawQuote> {
    let mut rows = vec![
        RawQuote::bond("0.97", &format!("{}", 98.1 + shift), "3%"),
        RawQuote::bond("1.6", &format!("{}", 99.0 + shift), "3.5%"),
        RawQuote::bond("2.02", &format!("{}", 99.6 + shift), "4%"),
        RawQuote::bond("3", &format!("{}", 99.2 + shift), "4%"),
        RawQuote::yield_quote("1", &format!("{}%", 3.9 + shift / 10.0)),
        RawQuote::yield_quote("2", &format!("{}%", 4.1 + shift / 10.0)),
        RawQuote::yield_quote("3", &format!("{}%", 4.2 + shift / 10.0)),
        RawQuote::yield_quote("4", &format!("{}%", 4.3 + shift / 10.0)),
        RawQuote::yield_quote("5", &format!("{}%", 4.35 + shift / 10.0)),
        RawQuote {
            maturity: Some("n/a".into()),
            ..RawQuote::default()
        },
    ];
    if long_end {
        rows.push(RawQuote::bond("4.05", &format!("{}", 98.4 + shift), "4.5%"));
        rows.push(RawQuote::bond("5", &format!("{}", 97.6 + shift), "5%"));
    }
    rows
}

fn observations() -> Vec<ObservationSet> {
    [(1, 0.0, true), (2, 0.3, false), (3, -0.2, true), (4, 0.15, true), (5, -0.1, true)]
        .into_iter()
        .map(|(month, shift, long_end)| {
            let date = month_end(month);
            let normalized = normalize(date.to_string(), &table(shift, long_end));
            assert_eq!(normalized.rejected.len(), 1);
            normalized.observation.with_date(date)
        })
        .collect()
}

#[test]
fn test_spot_series_and_covariance() {
    let config = PipelineConfig::default();
    let builder = config.series_builder().unwrap();
    let series = builder.spot_series(&observations()).unwrap();

    assert_eq!(series.matrix.nrows(), 4);
    assert_eq!(series.matrix.ncols(), 5);
    assert_eq!(series.skipped.len(), 1);
    assert_eq!(series.skipped[0].observation, "2024-02-29");
    assert!(!series.matrix.row_labels().contains(&"2024-02-29".to_string()));

    for row in series.matrix.rows() {
        assert!(row.iter().all(|r| *r > 0.0 && *r < 0.1), "{row:?}");
    }

    let result = config.covariance_analyzer().analyze(&series.matrix).unwrap();
    assert_eq!(result.returns.nrows(), 3);
    assert_eq!(result.covariance.shape(), (5, 5));
    assert_eq!(result.covariance, result.covariance.transpose());
    assert_eq!(result.returns.row_labels()[0], "2024-03-31");
}

#[test]
fn test_forward_series_matches_spot_rows() {
    let builder = PipelineConfig::default().series_builder().unwrap();
    let obs = observations();
    let spot = builder.spot_series(&obs).unwrap();
    let forward = builder.forward_series(&obs).unwrap();

    assert_eq!(forward.matrix.row_labels(), spot.matrix.row_labels());
    assert_eq!(
        forward.matrix.column_labels(),
        ["1yr-1yr", "1yr-2yr", "1yr-3yr", "1yr-4yr"]
    );

    for (s, f) in spot.curves.iter().zip(&forward.curves) {
        let s0 = s.curve.rates()[0];
        for (k, rate) in f.curve.rates().iter().enumerate() {
            let j = k + 1;
            let rebuilt = ForwardDeriver::reconstruct_spot(s0, *rate, j);
            assert!((rebuilt - s.curve.rates()[j]).abs() < 1e-12);
        }
    }
}

#[test]
fn test_yield_series_uses_every_observation() {
    let builder = PipelineConfig::default().series_builder().unwrap();
    let series = builder.yield_series(&observations()).unwrap();

    assert_eq!(series.matrix.nrows(), 5);
    assert!(series.skipped.is_empty());
    assert!((series.matrix.values()[(0, 0)] - 0.039).abs() < 1e-15);

    let result = CovarianceAnalyzer::default().analyze(&series.matrix).unwrap();
    let explained = result.explained_variance();
    assert!(explained[0] >= explained[explained.len() - 1]);
}

#[test]
fn test_single_bond_example() {
    let observation =
        ObservationSet::new("example").with_bonds(vec![Bond::new(98.0, 0.03, 1.0).unwrap()]);
    let builder = CurveSeriesBuilder::new(RungSet::annual(1).unwrap());
    let spot = builder.spot_curve(&observation).unwrap();

    assert!((spot.rates()[0] - 0.035401).abs() < 1e-6);
    assert!(matches!(
        builder.forward_curve(&observation),
        Err(CurveError::Observation { .. })
    ));
}

#[test]
fn test_one_observation_has_no_history() {
    let builder = PipelineConfig::default().series_builder().unwrap();
    let series = builder.spot_series(&observations()[..1]).unwrap();

    let err = CovarianceAnalyzer::default().analyze(&series.matrix).unwrap_err();
    assert!(matches!(err, CurveError::InsufficientData { .. }));
}

#[test]
fn test_validated_bootstrap_reprices_selected_bonds() {
    let obs = &observations()[0];
    let rungs = RungSet::default();
    let bonds = BondSelector::select(obs, &rungs).unwrap();

    let result = SpotBootstrapper::default().bootstrap_validated(&bonds, &rungs).unwrap();
    assert!(result.is_valid(), "{}", result.repricing);
    assert_eq!(result.repricing.checks().len(), 5);
}
