use serde::{Deserialize, Serialize};

/// Linear, row-major index of a grid cell. This is the state id handed to solvers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateIndex(usize);

impl StateIndex {
    /// Return the underlying state index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateIndex {
    fn from(value: usize) -> Self {
        StateIndex(value)
    }
}

/// A `(row, col)` grid position, 0-indexed from the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Coordinate { row, col }
    }

    /// Apply a signed displacement. The result may lie outside the grid and
    /// has to go through `StateIndexer::clamp` before it is used as a cell.
    pub fn offset(self, delta: Offset) -> RawCoordinate {
        RawCoordinate {
            row: self.row as isize + delta.row,
            col: self.col as isize + delta.col,
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate { row, col }
    }
}

/// A signed `(row, col)` displacement, e.g. the base move of an action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub row: isize,
    pub col: isize,
}

impl Offset {
    pub const ZERO: Offset = Offset { row: 0, col: 0 };

    pub fn new(row: isize, col: isize) -> Self {
        Offset { row, col }
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset {
            row: self.row + rhs.row,
            col: self.col + rhs.col,
        }
    }
}

/// An unclamped candidate position produced while composing moves and effects.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawCoordinate {
    pub row: isize,
    pub col: isize,
}
