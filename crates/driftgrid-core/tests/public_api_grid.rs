use driftgrid_core::{
    Action, Coordinate, Deterministic, EffectSpec, ErrorKind, GridSpec, RewardScheme, StateIndex,
    StateIndexer, TransitionBuilder, cliff_wind_classes,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const CLIFF: [&str; 4] = [
    "RRRRRRRRRRRR",
    "RRRRRRRRRRRR",
    "RRRRRRRRRRRR",
    "SCCCCCCCCCCG",
];

#[test]
fn public_cliff_table_has_expected_shape_and_hazard_reset() {
    let grid = GridSpec::parse(&CLIFF).expect("cliff parses");
    let indexer = StateIndexer::new(grid.rows(), grid.cols());
    let table = TransitionBuilder::new(&grid, &Deterministic, RewardScheme::new(-1.0, -100.0, 100.0))
        .build()
        .expect("table builds");

    assert_eq!(table.state_count(), indexer.state_count());
    assert_eq!(table.action_count(), Action::ALL.len());

    let start = indexer.to_state(Coordinate::new(3, 0)).expect("in bounds");
    let outcome = table.get(start, Action::Right).expect("in range")[0];
    assert_eq!(outcome.next_state, start);
    assert_eq!(outcome.reward, -100.0);
    assert!(!outcome.terminal);

    let up = table.get(start, Action::Up).expect("in range")[0];
    assert_eq!(up.next_state, indexer.to_state(Coordinate::new(2, 0)).expect("in bounds"));
    assert_eq!(up.reward, -1.0);
}

#[test]
fn public_action_ordinals_are_stable() {
    assert_eq!(Action::Up.index(), 0);
    assert_eq!(Action::Right.index(), 1);
    assert_eq!(Action::Down.index(), 2);
    assert_eq!(Action::Left.index(), 3);
    assert_eq!(Action::from_index(2).expect("valid"), Action::Down);

    let err = Action::from_index(4).expect_err("only four actions");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn public_index_errors_are_classified() {
    let indexer = StateIndexer::new(4, 12);

    let err = indexer.to_coord(StateIndex::from(48)).expect_err("out of range");
    assert_eq!(err.kind(), ErrorKind::Index);

    let err = indexer.to_state(Coordinate::new(4, 0)).expect_err("out of bounds");
    assert_eq!(err.kind(), ErrorKind::Index);
}

#[test]
fn public_wind_resolution_is_reproducible_by_seed() {
    let grid = GridSpec::parse(&CLIFF).expect("cliff parses");
    let spec = EffectSpec::Wind {
        prob: 0.5,
        classes: cliff_wind_classes(),
    };
    let rewards = RewardScheme::new(-1.0, -100.0, 100.0);

    let effect_a = spec
        .resolve(grid.rows(), grid.cols(), &mut ChaCha8Rng::seed_from_u64(2024))
        .expect("resolves");
    let effect_b = spec
        .resolve(grid.rows(), grid.cols(), &mut ChaCha8Rng::seed_from_u64(2024))
        .expect("resolves");
    assert_eq!(effect_a, effect_b);

    let a = TransitionBuilder::new(&grid, &effect_a, rewards).build().expect("builds");
    let b = TransitionBuilder::new(&grid, &effect_b, rewards).build().expect("builds");
    assert_eq!(a, b);
}
