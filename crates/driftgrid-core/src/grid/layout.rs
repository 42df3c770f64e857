use crate::grid::{
    cell::{CellKind, CellLegend},
    error::GridError,
    ids::Coordinate,
};

/// A parsed map: the cell kind of every coordinate plus the codes it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
    codes: Vec<char>,
    start: Coordinate,
}

impl GridSpec {
    /// Parse a map with the default legend.
    pub fn parse<S: AsRef<str>>(map: &[S]) -> Result<Self, GridError> {
        Self::parse_with_legend(map, &CellLegend::default())
    }

    /// Parse a rectangular map of single-character cell codes.
    ///
    /// The legend must give every code a single role, rows must share one
    /// length, every code must be in `legend`, and exactly one cell must be
    /// the start.
    pub fn parse_with_legend<S: AsRef<str>>(
        map: &[S],
        legend: &CellLegend,
    ) -> Result<Self, GridError> {
        legend.validate()?;

        let first = map.first().ok_or(GridError::EmptyMap)?;
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(GridError::EmptyMap);
        }

        let rows = map.len();
        let mut cells = Vec::with_capacity(rows * cols);
        let mut codes = Vec::with_capacity(rows * cols);
        let mut start: Option<Coordinate> = None;

        for (row, line) in map.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }

            for (col, code) in line.chars().enumerate() {
                let kind = legend
                    .classify(code)
                    .ok_or(GridError::UnknownCellCode { code, row, col })?;

                if kind == CellKind::Start {
                    let here = Coordinate::new(row, col);
                    if let Some(first) = start {
                        return Err(GridError::MultipleStarts {
                            first,
                            second: here,
                        });
                    }
                    start = Some(here);
                }

                cells.push(kind);
                codes.push(code);
            }
        }

        let start = start.ok_or(GridError::MissingStart)?;

        Ok(GridSpec {
            rows,
            cols,
            cells,
            codes,
            start,
        })
    }

    /// Grid shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Cell kind at `coord`, or `None` outside the grid.
    pub fn kind(&self, coord: Coordinate) -> Option<CellKind> {
        self.flat(coord).map(|idx| self.cells[idx])
    }

    /// The map character at `coord`.
    pub fn code(&self, coord: Coordinate) -> Option<char> {
        self.flat(coord).map(|idx| self.codes[idx])
    }

    /// Every coordinate whose kind matches, in row-major order.
    pub fn cells_of(&self, kind: CellKind) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == kind)
            .map(|(idx, _)| Coordinate::new(idx / self.cols, idx % self.cols))
            .collect()
    }

    fn flat(&self, coord: Coordinate) -> Option<usize> {
        if coord.row < self.rows && coord.col < self.cols {
            Some(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }
}
