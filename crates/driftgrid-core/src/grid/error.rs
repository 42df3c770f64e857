use std::fmt;

use crate::grid::ids::{Coordinate, StateIndex};

/// Which side of the error taxonomy a `GridError` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input handed to construction. The caller fixes the config and retries.
    Configuration,
    /// An index escaped its declared bounds. Points at a bug, not at user input.
    Index,
}

/// Error type for grid parsing, effect resolution and transition building.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The map has no rows or its rows are empty.
    EmptyMap,
    /// A row's length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell code that the legend does not know.
    UnknownCellCode { code: char, row: usize, col: usize },
    /// No cell carries the start code.
    MissingStart,
    /// More than one cell carries the start code.
    MultipleStarts { first: Coordinate, second: Coordinate },
    /// A probability that cannot be clamped into `[0, 1]` (NaN).
    InvalidProbability { name: &'static str, value: f64 },
    /// A wind class names a column the grid does not have.
    WindColumnOutOfRange { column: usize, width: usize },
    /// A wind class pushes further than the grid is tall.
    WindStrengthOutOfRange { strength: usize, rows: usize },
    /// One code is assigned to more than one cell role in a legend.
    DuplicateCellCode { code: char },
    /// An action ordinal outside `0..4`.
    ActionOutOfRange { action: usize },
    /// A state index outside `[0, state_count)`.
    StateOutOfRange {
        state: StateIndex,
        state_count: usize,
    },
    /// A coordinate outside the grid shape.
    CoordinateOutOfRange {
        coord: Coordinate,
        rows: usize,
        cols: usize,
    },
}

impl GridError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::StateOutOfRange { .. } | GridError::CoordinateOutOfRange { .. } => {
                ErrorKind::Index
            }
            _ => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyMap => write!(f, "map must contain at least one non-empty row"),
            GridError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} cells but the first row has {expected}"
            ),
            GridError::UnknownCellCode { code, row, col } => {
                write!(f, "unknown cell code '{code}' at ({row}, {col})")
            }
            GridError::MissingStart => write!(f, "map has no start cell"),
            GridError::MultipleStarts { first, second } => write!(
                f,
                "map has more than one start cell: ({}, {}) and ({}, {})",
                first.row, first.col, second.row, second.col
            ),
            GridError::InvalidProbability { name, value } => {
                write!(f, "{name} must be a number, got {value}")
            }
            GridError::WindColumnOutOfRange { column, width } => write!(
                f,
                "wind column {column} is outside a grid of width {width}"
            ),
            GridError::WindStrengthOutOfRange { strength, rows } => write!(
                f,
                "wind strength {strength} exceeds the grid height of {rows} rows"
            ),
            GridError::DuplicateCellCode { code } => {
                write!(f, "cell code '{code}' is assigned to more than one role")
            }
            GridError::ActionOutOfRange { action } => {
                write!(f, "action {action} is outside 0..4")
            }
            GridError::StateOutOfRange { state, state_count } => write!(
                f,
                "state {} is outside a state space of {state_count}",
                state.index()
            ),
            GridError::CoordinateOutOfRange { coord, rows, cols } => write!(
                f,
                "coordinate ({}, {}) is outside a {rows}x{cols} grid",
                coord.row, coord.col
            ),
        }
    }
}

impl std::error::Error for GridError {}
