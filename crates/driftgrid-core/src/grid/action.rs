use serde::{Deserialize, Serialize};

use crate::grid::{error::GridError, ids::Offset};

/// Number of actions available in every state.
pub const ACTION_COUNT: usize = 4;

/// The four compass moves. The ordinal of each variant is fixed and shared
/// with solvers and with the renderer's labels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Action {
    /// All actions in ordinal order.
    pub const ALL: [Action; ACTION_COUNT] = [Action::Up, Action::Right, Action::Down, Action::Left];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolve an ordinal back into an action.
    pub fn from_index(index: usize) -> Result<Action, GridError> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(GridError::ActionOutOfRange { action: index })
    }

    /// Base displacement of the move before any stochastic effect.
    pub fn delta(self) -> Offset {
        match self {
            Action::Up => Offset::new(-1, 0),
            Action::Right => Offset::new(0, 1),
            Action::Down => Offset::new(1, 0),
            Action::Left => Offset::new(0, -1),
        }
    }

    /// Human readable label used by the renderer.
    pub fn label(self) -> &'static str {
        match self {
            Action::Up => "Up",
            Action::Right => "Right",
            Action::Down => "Down",
            Action::Left => "Left",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Right => '→',
            Action::Down => '↓',
            Action::Left => '←',
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = GridError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Action::from_index(value)
    }
}
