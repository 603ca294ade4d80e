//! Randomized checks of the profile invariants over seeded dives.

use divegas_compute::{
    compute_consumption, create, format_profile, ConsoRates, DiveProfile, SegmentEdit,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ITERATIONS: usize = 200;
const EPS: f64 = 1e-9;

fn random_dive(rng: &mut StdRng) -> DiveProfile {
    let len: usize = rng.random_range(1..=26);
    let times: Vec<f64> = (0..len)
        .map(|_| {
            if rng.random_bool(0.1) {
                0.0
            } else {
                rng.random_range(0.5..30.0)
            }
        })
        .collect();
    let depths: Vec<f64> = (0..len).map(|_| rng.random_range(0.0..45.0)).collect();
    let rates = if rng.random_bool(0.5) {
        ConsoRates::Uniform {
            rate: rng.random_range(10.0..30.0),
        }
    } else {
        ConsoRates::PerSegment {
            rates: (0..len).map(|_| rng.random_range(10.0..30.0)).collect(),
        }
    };
    create(
        &times,
        &depths,
        &rates,
        rng.random_range(7.0..18.0),
        rng.random_range(100.0..300.0),
    )
    .unwrap()
    .update_conso()
    .unwrap()
}

#[test]
fn test_cumulative_consumption_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..ITERATIONS {
        let dive = random_dive(&mut rng);
        let consumption = dive.profile.consumption.as_ref().unwrap();

        for pair in consumption.conso_totale.windows(2) {
            assert!(pair[1] >= pair[0], "conso_totale decreased: {pair:?}");
        }
        let sum: f64 = consumption.conso.iter().sum();
        let last = *consumption.conso_totale.last().unwrap();
        assert!((last - sum).abs() <= EPS * sum.max(1.0));
    }
}

#[test]
fn test_remaining_identities() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..ITERATIONS {
        let dive = random_dive(&mut rng);
        let consumption = dive.profile.consumption.as_ref().unwrap();
        let remaining = dive.profile.remaining.as_ref().unwrap();
        let tank = dive.tank;

        for (i, total) in consumption.conso_totale.iter().enumerate() {
            let bar = tank.pressure - total / tank.volume;
            let liters = tank.volume * tank.pressure - total;
            assert!((remaining.bar_remaining[i] - bar).abs() < EPS);
            assert!((remaining.conso_remaining[i] - liters).abs() < EPS);
        }
    }
}

#[test]
fn test_formatter_never_negative() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..ITERATIONS {
        let dive = random_dive(&mut rng);
        let table = format_profile(&dive, true).unwrap();
        assert_eq!(table.rows.len(), dive.profile.len() + 1);
        for row in &table.rows {
            assert!(row.conso_remaining >= 0.0);
            assert!(row.bar_remaining >= 0.0);
            assert_eq!(row.bar_remaining, row.bar_remaining.round());
        }
    }
}

#[test]
fn test_calculator_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..ITERATIONS {
        let dive = random_dive(&mut rng);
        let first = compute_consumption(&dive.profile, dive.conso_per_min);
        let second = compute_consumption(&dive.profile, dive.conso_per_min);
        assert_eq!(first, second);
        assert_eq!(dive.update_conso().unwrap(), dive.update_conso().unwrap());
    }
}

#[test]
fn test_edit_only_affects_rows_from_edit_on() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..ITERATIONS {
        let before = random_dive(&mut rng);
        let index = rng.random_range(0..before.profile.len());
        let label = before.profile.segments[index].label.clone();
        let edit = SegmentEdit {
            time_interval: rng.random_range(0.0..30.0),
            depth: rng.random_range(0.0..45.0),
            conso_per_min: None,
        };
        let after = before
            .update_segment(&label, &edit)
            .unwrap()
            .recompute()
            .unwrap();

        let (old_c, new_c) = (
            before.profile.consumption.as_ref().unwrap(),
            after.profile.consumption.as_ref().unwrap(),
        );
        let (old_r, new_r) = (
            before.profile.remaining.as_ref().unwrap(),
            after.profile.remaining.as_ref().unwrap(),
        );
        for i in 0..index {
            assert_eq!(before.profile.segments[i], after.profile.segments[i]);
            assert_eq!(old_c.conso[i], new_c.conso[i]);
            assert_eq!(old_c.conso_totale[i], new_c.conso_totale[i]);
            assert_eq!(old_r.bar_remaining[i], new_r.bar_remaining[i]);
        }
        let edited = &after.profile.segments[index];
        assert_eq!(edited.time_interval, edit.time_interval);
        assert_eq!(edited.depth, edit.depth);
        for (i, segment) in after.profile.segments.iter().enumerate().skip(index + 1) {
            let old = &before.profile.segments[i];
            assert_eq!(segment.depth, old.depth);
            assert_eq!(segment.time_interval, old.time_interval);
        }
    }
}
