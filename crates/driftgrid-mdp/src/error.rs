use driftgrid_core::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for configuration loading, model construction, and table export.
pub enum MdpError {
    #[error("failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("unknown environment variant '{name}'")]
    UnknownVariant { name: String },

    #[error("invalid environment config: {0}")]
    InvalidConfig(String),

    #[error("table declares {declared} states but lists {found}")]
    StateCountMismatch { declared: usize, found: usize },

    #[error("state {state} must declare {expected} actions, got {found}")]
    ActionCountMismatch {
        state: usize,
        expected: usize,
        found: usize,
    },

    #[error("state {state} action '{action}' must contain at least one outcome")]
    EmptyOutcomes { state: usize, action: String },

    #[error(
        "invalid probability in state {state}, action '{action}', outcome {outcome_index}: {value}"
    )]
    InvalidProbability {
        state: usize,
        action: String,
        outcome_index: usize,
        value: f64,
    },

    #[error("invalid reward in state {state}, action '{action}', outcome {outcome_index}: {value}")]
    InvalidReward {
        state: usize,
        action: String,
        outcome_index: usize,
        value: f64,
    },

    #[error("outcome in state {state}, action '{action}' references unknown next state {next}")]
    UnknownNextState {
        state: usize,
        action: String,
        next: usize,
    },

    #[error(
        "probability sum for state {state}, action '{action}' must be within {tolerance} of 1.0, got {sum}"
    )]
    ProbabilitySum {
        state: usize,
        action: String,
        sum: f64,
        tolerance: f64,
    },

    #[error("initial state distribution must sum to 1.0, got {sum}")]
    InitialDistribution { sum: f64 },
}
