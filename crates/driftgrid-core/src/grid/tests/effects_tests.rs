use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::grid::{
    effects::{
        Deterministic, EffectModel, EffectSpec, SlipModel, StochasticEffect, WindClass, WindField,
        clamp_probability, cliff_wind_classes,
    },
    error::GridError,
    ids::{Coordinate, Offset, RawCoordinate},
};

fn total(effect: &impl StochasticEffect, from: Coordinate, delta: Offset) -> f64 {
    effect
        .branches(from, delta)
        .iter()
        .map(|b| b.probability)
        .sum()
}

#[test]
fn deterministic_effect_returns_the_intended_move() {
    let branches = Deterministic.branches(Coordinate::new(0, 0), Offset::new(-1, 0));

    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].probability, 1.0);
    assert_eq!(branches[0].position, RawCoordinate { row: -1, col: 0 });
}

#[test]
fn zero_wind_probability_leaves_every_column_calm() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let wind = WindField::resolve(&cliff_wind_classes(), 0.0, 4, 12, &mut rng)
        .expect("wind should resolve");

    assert!(wind.is_calm());
    assert_eq!(wind.activations(), &[false, false]);
}

#[test]
fn certain_wind_activates_every_class() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let wind = WindField::resolve(&cliff_wind_classes(), 1.0, 4, 12, &mut rng)
        .expect("wind should resolve");

    assert_eq!(wind.activations(), &[true, true]);
    for col in [3, 4, 5, 8] {
        assert_eq!(wind.push_at(col), 1);
    }
    for col in [6, 7] {
        assert_eq!(wind.push_at(col), 2);
    }
    for col in [0, 1, 2, 9, 10, 11] {
        assert_eq!(wind.push_at(col), 0);
    }

    let branches = wind.branches(Coordinate::new(0, 6), Offset::new(0, 1));
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].position, RawCoordinate { row: 2, col: 7 });
}

#[test]
fn columns_in_a_class_share_one_draw() {
    for seed in 0..32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let wind = WindField::resolve(&cliff_wind_classes(), 0.5, 4, 12, &mut rng)
            .expect("wind should resolve");

        let strong = wind.push_at(3);
        assert!(strong == 0 || strong == 1);
        assert_eq!(wind.push_at(4), strong);
        assert_eq!(wind.push_at(5), strong);
        assert_eq!(wind.push_at(8), strong);
        assert_eq!(wind.push_at(6), wind.push_at(7));
    }
}

#[test]
fn later_class_overrides_shared_columns() {
    let classes = vec![WindClass::new([2, 3], 3), WindClass::new([3], 1)];
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let wind = WindField::resolve(&classes, 1.0, 4, 5, &mut rng).expect("wind should resolve");

    assert_eq!(wind.push_at(2), 3);
    assert_eq!(wind.push_at(3), 1);
}

#[test]
fn out_of_range_probabilities_are_clamped() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let high = WindField::resolve(&cliff_wind_classes(), 4.0, 4, 12, &mut rng)
        .expect("wind should resolve");
    assert_eq!(high.activations(), &[true, true]);

    let low = WindField::resolve(&cliff_wind_classes(), -0.5, 4, 12, &mut rng)
        .expect("wind should resolve");
    assert!(low.is_calm());

    assert_eq!(clamp_probability("p", 1.5), Ok(1.0));
    assert_eq!(clamp_probability("p", -2.0), Ok(0.0));
    assert_eq!(clamp_probability("p", 0.25), Ok(0.25));
}

#[test]
fn nan_probability_is_rejected() {
    let err = SlipModel::new(f64::NAN).expect_err("nan should fail");
    assert!(matches!(
        err,
        GridError::InvalidProbability {
            name: "slip_prob",
            ..
        }
    ));
}

#[test]
fn wind_column_outside_grid_is_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let err = WindField::resolve(&cliff_wind_classes(), 0.1, 4, 6, &mut rng)
        .expect_err("column 8 does not exist");

    assert_eq!(
        err,
        GridError::WindColumnOutOfRange {
            column: 8,
            width: 6
        }
    );
}

#[test]
fn wind_stronger_than_grid_height_is_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for strength in [5, isize::MAX as usize, usize::MAX] {
        let classes = vec![WindClass::new([1], strength)];
        let err = WindField::resolve(&classes, 1.0, 4, 3, &mut rng)
            .expect_err("push cannot exceed the grid height");
        assert_eq!(err, GridError::WindStrengthOutOfRange { strength, rows: 4 });
    }

    let err = EffectSpec::Wind {
        prob: 0.0,
        classes: vec![WindClass::new([0], usize::MAX)],
    }
    .resolve(4, 12, &mut rng)
    .expect_err("checked even when the wind never fires");
    assert!(matches!(err, GridError::WindStrengthOutOfRange { .. }));
}

#[test]
fn wind_as_strong_as_grid_height_is_accepted() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let classes = vec![WindClass::new([1], 4)];
    let wind = WindField::resolve(&classes, 1.0, 4, 3, &mut rng).expect("strength 4 fits 4 rows");

    let branches = wind.branches(Coordinate::new(0, 1), Offset::new(0, 1));
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].position, RawCoordinate { row: 4, col: 2 });
}

#[test]
fn slip_splits_mass_between_intended_and_perpendicular_moves() {
    let slip = SlipModel::new(2.0 / 3.0).expect("valid slip");
    let from = Coordinate::new(1, 1);
    let branches = slip.branches(from, Offset::new(0, 1));

    assert_eq!(branches.len(), 3);
    assert_eq!(branches[0].position, RawCoordinate { row: 1, col: 2 });
    let sides: Vec<_> = branches[1..].iter().map(|b| b.position).collect();
    assert!(sides.contains(&RawCoordinate { row: 0, col: 1 }));
    assert!(sides.contains(&RawCoordinate { row: 2, col: 1 }));
    for branch in &branches {
        assert!((branch.probability - 1.0 / 3.0).abs() < 1e-12);
    }
    assert!((total(&slip, from, Offset::new(0, 1)) - 1.0).abs() < 1e-9);
}

#[test]
fn slip_extremes_drop_zero_probability_branches() {
    let never = SlipModel::new(0.0).expect("valid slip");
    assert_eq!(never.branches(Coordinate::new(1, 1), Offset::new(1, 0)).len(), 1);

    let always = SlipModel::new(1.0).expect("valid slip");
    let branches = always.branches(Coordinate::new(1, 1), Offset::new(1, 0));
    assert_eq!(branches.len(), 2);
    assert!(branches.iter().all(|b| b.probability == 0.5));
}

#[test]
fn effect_spec_resolves_each_family() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let none = EffectSpec::None.resolve(4, 12, &mut rng).expect("none resolves");
    assert_eq!(none.family(), "none");

    let wind = EffectSpec::Wind {
        prob: 1.0,
        classes: cliff_wind_classes(),
    }
    .resolve(4, 12, &mut rng)
    .expect("wind resolves");
    assert!(matches!(wind, EffectModel::Wind(ref field) if !field.is_calm()));

    let slip = EffectSpec::Slip { prob: 0.2 }
        .resolve(4, 12, &mut rng)
        .expect("slip resolves");
    assert!(matches!(slip, EffectModel::Slip(s) if (s.success_prob() - 0.8).abs() < 1e-12));
}
