use driftgrid_core::{
    ACTION_COUNT, Action, CellKind, Coordinate, EffectModel, GridError, GridSpec, Outcome,
    RewardScheme, StateIndex, StateIndexer, TransitionBuilder, TransitionTable,
};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{EnvConfig, MdpError};

/// Probability of starting an episode in each state.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialDistribution {
    probs: Vec<f64>,
}

impl InitialDistribution {
    /// All mass on `start`.
    pub fn unit(state_count: usize, start: StateIndex) -> Self {
        let mut probs = vec![0.0; state_count];
        if let Some(p) = probs.get_mut(start.index()) {
            *p = 1.0;
        }
        InitialDistribution { probs }
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    /// States with non-zero starting probability.
    pub fn support(&self) -> Vec<StateIndex> {
        self.probs
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > 0.0)
            .map(|(idx, _)| StateIndex::from(idx))
            .collect()
    }

    /// Pick a start state with a uniform sample in `[0, 1)`.
    pub fn sample(&self, sample: f64) -> Option<StateIndex> {
        let mut cumulative = 0.0_f64;
        let mut last = None;
        for (idx, p) in self.probs.iter().enumerate() {
            if *p <= 0.0 {
                continue;
            }
            cumulative += p;
            last = Some(StateIndex::from(idx));
            if sample < cumulative {
                break;
            }
        }
        last
    }
}

/// An immutable grid-world MDP: `P[state][action]`, the initial distribution,
/// and the map and config they were built from.
///
/// Stochastic effects are resolved while building. The table never changes
/// afterwards, so stepping is reproducible from the table and a state index
/// alone. Use `clone_with_fresh_effects` for a new draw of the same task.
#[derive(Debug, Clone)]
pub struct MdpModel {
    config: EnvConfig,
    grid: GridSpec,
    indexer: StateIndexer,
    effect: EffectModel,
    table: TransitionTable,
    terminal: Vec<bool>,
    start: StateIndex,
    initial: InitialDistribution,
}

impl MdpModel {
    /// Build a model, resolving any one-time random effect from `rng`.
    pub fn build<R: Rng + ?Sized>(config: EnvConfig, rng: &mut R) -> Result<Self, MdpError> {
        config.validate()?;

        let grid = GridSpec::parse_with_legend(&config.map, &config.legend)?;
        let (rows, cols) = grid.shape();
        let indexer = StateIndexer::new(rows, cols);
        let effect = config.effect.resolve(rows, cols, rng)?;

        debug!(
            "building '{}': {rows}x{cols} grid, {} states, {} effect",
            config.name,
            indexer.state_count(),
            effect.family()
        );

        let builder = TransitionBuilder::new(&grid, &effect, config.rewards)
            .hazard_policy(config.hazard_policy);
        let table = builder.build()?;

        let mut terminal = Vec::with_capacity(indexer.state_count());
        for state in indexer.states() {
            let coord = indexer.to_coord(state)?;
            let kind = grid.kind(coord).ok_or(GridError::CoordinateOutOfRange {
                coord,
                rows,
                cols,
            })?;
            terminal.push(builder.is_terminal_kind(kind));
        }

        let start = indexer.to_state(grid.start())?;
        let initial = InitialDistribution::unit(indexer.state_count(), start);

        Ok(MdpModel {
            config,
            grid,
            indexer,
            effect,
            table,
            terminal,
            start,
            initial,
        })
    }

    /// Build a model with effects drawn from a `ChaCha8Rng` seeded with `seed`.
    pub fn from_seed(config: EnvConfig, seed: u64) -> Result<Self, MdpError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::build(config, &mut rng)
    }

    /// Rebuild from the same config with a fresh draw of every one-time effect.
    /// `self` is left untouched.
    pub fn clone_with_fresh_effects<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, MdpError> {
        Self::build(self.config.clone(), rng)
    }

    pub fn state_count(&self) -> usize {
        self.indexer.state_count()
    }

    pub fn action_count(&self) -> usize {
        ACTION_COUNT
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.table
    }

    pub fn initial_distribution(&self) -> &InitialDistribution {
        &self.initial
    }

    /// Outcomes of taking `action` in `state`.
    pub fn outcomes(&self, state: StateIndex, action: Action) -> Result<&[Outcome], MdpError> {
        Ok(self.table.outcomes(state, action)?)
    }

    /// The canonical start state.
    pub fn start_state(&self) -> StateIndex {
        self.start
    }

    /// Whether `state` is absorbing. Out-of-range states report `None`.
    pub fn is_terminal(&self, state: StateIndex) -> Option<bool> {
        self.terminal.get(state.index()).copied()
    }

    pub fn cell_kind(&self, state: StateIndex) -> Option<CellKind> {
        let coord = self.indexer.to_coord(state).ok()?;
        self.grid.kind(coord)
    }

    pub fn coord(&self, state: StateIndex) -> Result<Coordinate, MdpError> {
        Ok(self.indexer.to_coord(state)?)
    }

    pub fn state_at(&self, coord: Coordinate) -> Result<StateIndex, MdpError> {
        Ok(self.indexer.to_state(coord)?)
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn indexer(&self) -> &StateIndexer {
        &self.indexer
    }

    /// The resolved effect, e.g. which wind classes fired.
    pub fn effect(&self) -> &EffectModel {
        &self.effect
    }

    pub fn rewards(&self) -> RewardScheme {
        self.config.rewards
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}
