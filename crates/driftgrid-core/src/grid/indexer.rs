use crate::grid::{
    error::GridError,
    ids::{Coordinate, RawCoordinate, StateIndex},
};

/// Row-major bijection between grid coordinates and state indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateIndexer {
    rows: usize,
    cols: usize,
}

impl StateIndexer {
    pub fn new(rows: usize, cols: usize) -> Self {
        StateIndexer { rows, cols }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Size of the state space, `rows * cols`.
    pub fn state_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Linearize an in-bounds coordinate.
    pub fn to_state(&self, coord: Coordinate) -> Result<StateIndex, GridError> {
        if !self.contains(coord) {
            return Err(GridError::CoordinateOutOfRange {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(StateIndex::from(coord.row * self.cols + coord.col))
    }

    /// Inverse of `to_state`.
    pub fn to_coord(&self, state: StateIndex) -> Result<Coordinate, GridError> {
        if state.index() >= self.state_count() {
            return Err(GridError::StateOutOfRange {
                state,
                state_count: self.state_count(),
            });
        }
        Ok(Coordinate::new(
            state.index() / self.cols,
            state.index() % self.cols,
        ))
    }

    /// Saturate each axis independently into `[0, dim - 1]`.
    pub fn clamp(&self, raw: RawCoordinate) -> Coordinate {
        let row = raw.row.clamp(0, self.rows as isize - 1) as usize;
        let col = raw.col.clamp(0, self.cols as isize - 1) as usize;
        Coordinate::new(row, col)
    }

    /// Iterate every state in index order.
    pub fn states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.state_count()).map(StateIndex::from)
    }
}
