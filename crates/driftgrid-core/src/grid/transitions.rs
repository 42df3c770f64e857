use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::{
    action::{ACTION_COUNT, Action},
    cell::CellKind,
    effects::StochasticEffect,
    error::GridError,
    ids::{Coordinate, StateIndex},
    indexer::StateIndexer,
    layout::GridSpec,
};

/// Floating point tolerance used when checking probability mass.
pub const PROB_TOLERANCE: f64 = 1e-9;

/// One possible result of taking an action from a state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub probability: f64,
    pub next_state: StateIndex,
    pub reward: f64,
    pub terminal: bool,
}

/// Reward scalars for the three kinds of step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardScheme {
    pub step: f64,
    pub hazard: f64,
    pub goal: f64,
}

impl RewardScheme {
    pub fn new(step: f64, hazard: f64, goal: f64) -> Self {
        RewardScheme { step, hazard, goal }
    }
}

/// What stepping onto a hazard cell does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardPolicy {
    /// Send the agent back to start; the episode continues.
    #[default]
    ResetToStart,
    /// The agent stays in the hazard and the episode ends there.
    Terminate,
}

#[derive(Debug, Clone, PartialEq)]
struct ActionRec {
    outcomes: Vec<Outcome>,
    cdf: Vec<f64>,
}

/// `P[state][action]`: the full, read-only outcome table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    state_count: usize,
    entries: Vec<ActionRec>,
}

impl TransitionTable {
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn action_count(&self) -> usize {
        ACTION_COUNT
    }

    /// Outcomes for `(state, action)`, or `None` if `state` is out of range.
    pub fn get(&self, state: StateIndex, action: Action) -> Option<&[Outcome]> {
        self.entries
            .get(Self::slot(state, action))
            .filter(|_| state.index() < self.state_count)
            .map(|rec| rec.outcomes.as_slice())
    }

    /// Like `get`, but reports an out-of-range state as an error.
    pub fn outcomes(&self, state: StateIndex, action: Action) -> Result<&[Outcome], GridError> {
        self.get(state, action).ok_or(GridError::StateOutOfRange {
            state,
            state_count: self.state_count,
        })
    }

    /// Pick the outcome whose cumulative probability first reaches `sample`,
    /// where `sample` is uniform in `[0, 1)`.
    pub fn sample(&self, state: StateIndex, action: Action, sample: f64) -> Option<&Outcome> {
        if state.index() >= self.state_count {
            return None;
        }
        let rec = self.entries.get(Self::slot(state, action))?;
        let mut chosen = rec.cdf.partition_point(|p| *p <= sample);
        if chosen >= rec.outcomes.len() {
            chosen = rec.outcomes.len().checked_sub(1)?;
        }
        rec.outcomes.get(chosen)
    }

    /// Every `(state, action, outcomes)` row in state-then-action order.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, Action, &[Outcome])> + '_ {
        self.entries.iter().enumerate().map(|(slot, rec)| {
            (
                StateIndex::from(slot / ACTION_COUNT),
                Action::ALL[slot % ACTION_COUNT],
                rec.outcomes.as_slice(),
            )
        })
    }

    fn slot(state: StateIndex, action: Action) -> usize {
        state.index() * ACTION_COUNT + action.index()
    }
}

/// Builds the transition table for a parsed grid under one resolved effect.
#[derive(Debug)]
pub struct TransitionBuilder<'a, E: StochasticEffect> {
    grid: &'a GridSpec,
    indexer: StateIndexer,
    effect: &'a E,
    rewards: RewardScheme,
    hazard_policy: HazardPolicy,
}

impl<'a, E: StochasticEffect> TransitionBuilder<'a, E> {
    pub fn new(grid: &'a GridSpec, effect: &'a E, rewards: RewardScheme) -> Self {
        let (rows, cols) = grid.shape();
        TransitionBuilder {
            grid,
            indexer: StateIndexer::new(rows, cols),
            effect,
            rewards,
            hazard_policy: HazardPolicy::default(),
        }
    }

    pub fn hazard_policy(mut self, policy: HazardPolicy) -> Self {
        self.hazard_policy = policy;
        self
    }

    /// Whether `kind` ends an episode under the current hazard policy.
    pub fn is_terminal_kind(&self, kind: CellKind) -> bool {
        match kind {
            CellKind::Goal => true,
            CellKind::Hazard => self.hazard_policy == HazardPolicy::Terminate,
            CellKind::Start | CellKind::Ordinary => false,
        }
    }

    /// Build outcomes for every `(state, action)` pair.
    pub fn build(&self) -> Result<TransitionTable, GridError> {
        let state_count = self.indexer.state_count();
        let mut entries = Vec::with_capacity(state_count * ACTION_COUNT);

        for state in self.indexer.states() {
            for action in Action::ALL {
                let outcomes = self.outcomes_for(state, action)?;
                let mut cdf = Vec::with_capacity(outcomes.len());
                let mut cumulative = 0.0_f64;
                for outcome in &outcomes {
                    cumulative += outcome.probability;
                    cdf.push(cumulative);
                }
                entries.push(ActionRec { outcomes, cdf });
            }
        }

        debug!(
            "built transition table: {} states x {} actions, {} outcomes",
            state_count,
            ACTION_COUNT,
            entries.iter().map(|rec| rec.outcomes.len()).sum::<usize>()
        );

        Ok(TransitionTable {
            state_count,
            entries,
        })
    }

    /// Outcome distribution for one `(state, action)` pair.
    pub fn outcomes_for(&self, state: StateIndex, action: Action) -> Result<Vec<Outcome>, GridError> {
        let from = self.indexer.to_coord(state)?;

        // Terminal states absorb every action.
        if self.is_terminal_kind(self.kind_at(from)?) {
            return Ok(vec![Outcome {
                probability: 1.0,
                next_state: state,
                reward: 0.0,
                terminal: true,
            }]);
        }

        let start = self.indexer.to_state(self.grid.start())?;
        let mut merged: Vec<Outcome> = Vec::with_capacity(3);

        for branch in self.effect.branches(from, action.delta()) {
            let landed = self.indexer.clamp(branch.position);
            let next = self.indexer.to_state(landed)?;

            let outcome = match self.kind_at(landed)? {
                CellKind::Goal => Outcome {
                    probability: branch.probability,
                    next_state: next,
                    reward: self.rewards.goal,
                    terminal: true,
                },
                CellKind::Hazard => match self.hazard_policy {
                    HazardPolicy::ResetToStart => Outcome {
                        probability: branch.probability,
                        next_state: start,
                        reward: self.rewards.hazard,
                        terminal: false,
                    },
                    HazardPolicy::Terminate => Outcome {
                        probability: branch.probability,
                        next_state: next,
                        reward: self.rewards.hazard,
                        terminal: true,
                    },
                },
                CellKind::Start | CellKind::Ordinary => Outcome {
                    probability: branch.probability,
                    next_state: next,
                    reward: self.rewards.step,
                    terminal: false,
                },
            };

            merge_outcome(&mut merged, outcome);
        }

        Ok(merged)
    }

    fn kind_at(&self, coord: Coordinate) -> Result<CellKind, GridError> {
        self.grid
            .kind(coord)
            .ok_or(GridError::CoordinateOutOfRange {
                coord,
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            })
    }
}

/// Fold `outcome` into `merged`, keeping one entry per successor state.
///
/// Two branches can reach the same successor with different rewards (a plain
/// step onto start next to a hazard that resets to start). The merged entry
/// then carries the probability-weighted mean reward, which is the expected
/// reward of that successor.
fn merge_outcome(merged: &mut Vec<Outcome>, outcome: Outcome) {
    let Some(existing) = merged
        .iter_mut()
        .find(|o| o.next_state == outcome.next_state)
    else {
        merged.push(outcome);
        return;
    };

    let total = existing.probability + outcome.probability;
    if existing.reward != outcome.reward {
        existing.reward =
            (existing.reward * existing.probability + outcome.reward * outcome.probability) / total;
    }
    existing.probability = total;
    existing.terminal |= outcome.terminal;
}
