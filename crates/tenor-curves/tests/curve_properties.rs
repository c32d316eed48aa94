//! Property tests for the bootstrap and forward identities.

use proptest::prelude::*;
use tenor_curves::bootstrap::{model_price, SpotBootstrapper};
use tenor_curves::forward::{forward_rates, ForwardDeriver};
use tenor_curves::{Bond, RungSet};

/// Prices a bond ladder off a known spot curve, one bond per annual rung.
fn ladder(spots: &[f64], coupons: &[f64]) -> Vec<Bond> {
    let mut bonds = Vec::with_capacity(spots.len());
    for (i, (s, c)) in spots.iter().zip(coupons).enumerate() {
        let years = (i + 1) as f64;
        let unpriced = Bond::new(100.0, *c, years).unwrap();
        let price = model_price(i, &spots[..i], &unpriced, *s);
        bonds.push(Bond::new(price, *c, years).unwrap());
    }
    bonds
}

fn curve_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..=7).prop_flat_map(|n| {
        (
            prop::collection::vec(0.001f64..0.12, n),
            prop::collection::vec(0.0f64..0.09, n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn bootstrap_recovers_generating_curve((spots, coupons) in curve_strategy()) {
        let bonds = ladder(&spots, &coupons);
        let rungs = RungSet::annual(spots.len()).unwrap();

        let result = SpotBootstrapper::default().bootstrap_validated(&bonds, &rungs).unwrap();

        prop_assert!(result.is_valid(), "{}", result.repricing);
        for (solved, expected) in result.curve.rates().iter().zip(&spots) {
            prop_assert!((solved - expected).abs() < 1e-7, "{} vs {}", solved, expected);
        }
    }

    #[test]
    fn forward_round_trip(spots in prop::collection::vec(-0.01f64..0.15, 2..10)) {
        let forwards = forward_rates(&spots).unwrap();
        prop_assert_eq!(forwards.len(), spots.len() - 1);

        for (k, f) in forwards.iter().enumerate() {
            let j = k + 1;
            let rebuilt = ForwardDeriver::reconstruct_spot(spots[0], *f, j);
            prop_assert!((rebuilt - spots[j]).abs() < 1e-12);
        }
    }

    #[test]
    fn flat_spot_curve_has_flat_forwards(level in 0.0f64..0.2, n in 2usize..10) {
        let forwards = forward_rates(&vec![level; n]).unwrap();
        for f in forwards {
            prop_assert!((f - level).abs() < 1e-12);
        }
    }
}
