mod grid;

pub use grid::action::{ACTION_COUNT, Action};
pub use grid::cell::{CellKind, CellLegend};
pub use grid::effects::{
    Branch, Deterministic, EffectModel, EffectSpec, SlipModel, StochasticEffect, WindClass,
    WindField, clamp_probability, cliff_wind_classes,
};
pub use grid::error::{ErrorKind, GridError};
pub use grid::ids::{Coordinate, Offset, RawCoordinate, StateIndex};
pub use grid::indexer::StateIndexer;
pub use grid::layout::GridSpec;
pub use grid::transitions::{
    HazardPolicy, Outcome, PROB_TOLERANCE, RewardScheme, TransitionBuilder, TransitionTable,
};
