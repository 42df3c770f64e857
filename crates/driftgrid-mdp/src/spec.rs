use driftgrid_core::{ACTION_COUNT, Action, CellKind, PROB_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::{MdpError, MdpModel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Serializable snapshot of a built model's tabular contract, for solvers
/// living outside this process.
pub struct TabularSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub state_count: usize,
    pub action_count: usize,
    /// Initial-state probability per state index.
    pub initial: Vec<f64>,
    pub states: Vec<StateSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One state with its position and its outcome rows.
pub struct StateSpec {
    pub id: usize,
    pub row: usize,
    pub col: usize,
    pub kind: CellKind,
    pub terminal: bool,
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub action: Action,
    pub outcomes: Vec<OutcomeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSpec {
    pub next: usize,
    pub prob: f64,
    pub reward: f64,
    pub terminal: bool,
}

impl TabularSpec {
    /// Capture the full table of `model`.
    pub fn from_model(model: &MdpModel) -> Result<Self, MdpError> {
        let (rows, cols) = model.grid().shape();
        let mut states = Vec::with_capacity(model.state_count());

        for state in model.indexer().states() {
            let coord = model.coord(state)?;
            let mut actions = Vec::with_capacity(ACTION_COUNT);
            for action in Action::ALL {
                let outcomes = model
                    .outcomes(state, action)?
                    .iter()
                    .map(|o| OutcomeSpec {
                        next: o.next_state.index(),
                        prob: o.probability,
                        reward: o.reward,
                        terminal: o.terminal,
                    })
                    .collect();
                actions.push(ActionSpec { action, outcomes });
            }

            states.push(StateSpec {
                id: state.index(),
                row: coord.row,
                col: coord.col,
                kind: model.cell_kind(state).unwrap_or(CellKind::Ordinary),
                terminal: model.is_terminal(state).unwrap_or(false),
                actions,
            });
        }

        Ok(TabularSpec {
            version: Some(1),
            name: model.name().to_string(),
            rows,
            cols,
            state_count: model.state_count(),
            action_count: model.action_count(),
            initial: model.initial_distribution().probabilities().to_vec(),
            states,
        })
    }

    /// Validate the table using the crate default tolerance.
    pub fn validate(&self) -> Result<(), MdpError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Validate shape, successor references, and probability constraints.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), MdpError> {
        if self.states.len() != self.state_count {
            return Err(MdpError::StateCountMismatch {
                declared: self.state_count,
                found: self.states.len(),
            });
        }

        let initial_sum: f64 = self.initial.iter().sum();
        if self.initial.len() != self.state_count || (initial_sum - 1.0).abs() > tolerance {
            return Err(MdpError::InitialDistribution { sum: initial_sum });
        }

        for state in &self.states {
            if state.actions.len() != self.action_count {
                return Err(MdpError::ActionCountMismatch {
                    state: state.id,
                    expected: self.action_count,
                    found: state.actions.len(),
                });
            }

            for action in &state.actions {
                let label = action.action.label().to_string();

                if action.outcomes.is_empty() {
                    return Err(MdpError::EmptyOutcomes {
                        state: state.id,
                        action: label,
                    });
                }

                let mut sum = 0.0_f64;
                for (i, outcome) in action.outcomes.iter().enumerate() {
                    if !outcome.prob.is_finite() || outcome.prob <= 0.0 || outcome.prob > 1.0 {
                        return Err(MdpError::InvalidProbability {
                            state: state.id,
                            action: label,
                            outcome_index: i,
                            value: outcome.prob,
                        });
                    }

                    if !outcome.reward.is_finite() {
                        return Err(MdpError::InvalidReward {
                            state: state.id,
                            action: label,
                            outcome_index: i,
                            value: outcome.reward,
                        });
                    }

                    if outcome.next >= self.state_count {
                        return Err(MdpError::UnknownNextState {
                            state: state.id,
                            action: label,
                            next: outcome.next,
                        });
                    }

                    sum += outcome.prob;
                }

                // Outcome probabilities for an action must sum to 1 within tolerance.
                if (sum - 1.0).abs() > tolerance {
                    return Err(MdpError::ProbabilitySum {
                        state: state.id,
                        action: label,
                        sum,
                        tolerance,
                    });
                }
            }
        }

        Ok(())
    }
}
