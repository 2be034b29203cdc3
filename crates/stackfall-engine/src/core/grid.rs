use crate::ConfigError;

use super::piece::{ActivePiece, PieceColor, PieceKind, PieceShape, to_i32};

/// A single cell of the play grid.
///
/// The grid only ever holds locked pieces; the falling piece is kept
/// separately by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Unoccupied cell.
    #[default]
    Empty,
    /// Cell occupied by a locked piece of the given kind.
    Locked(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Locked(kind) => Some(kind),
        }
    }

    /// Display color, derived from the locked kind.
    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        self.kind().map(PieceKind::color)
    }
}

/// Fixed-size play grid, stored row-major with row 0 at the top.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Cell, Grid, PieceKind};
///
/// let grid = Grid::from_ascii(4, 3, "
///     ....
///     IIII
/// ");
/// assert_eq!(grid.cell(1, 0), Some(Cell::Empty));
/// assert_eq!(grid.cell(2, 3), Some(Cell::Locked(PieceKind::I)));
/// assert_eq!(grid.cell(3, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// Fails when either dimension is zero.
    pub fn new(columns: usize, rows: usize) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            cells: vec![Cell::Empty; columns * rows],
        })
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the cell at `(row, col)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.columns).then(|| self.cells[row * self.columns + col])
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.columns)
    }

    /// Resets every cell to [`Cell::Empty`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Checks whether `shape` can be placed with its top-left corner at
    /// `(row, col)`.
    ///
    /// Occupied shape cells must lie within the side walls and above the
    /// floor. Cells above the visible grid (negative row) are not checked for
    /// occupancy, which lets pieces straddle the top edge.
    #[must_use]
    pub fn is_valid_placement(&self, shape: &PieceShape, row: i32, col: i32) -> bool {
        let (rows, columns) = (to_i32(self.rows), to_i32(self.columns));
        shape.occupied_cells().all(|(r, c)| {
            let (gr, gc) = (row + to_i32(r), col + to_i32(c));
            if gc < 0 || gc >= columns || gr >= rows {
                return false;
            }
            gr < 0 || self.cells[self.index(gr, gc)].is_empty()
        })
    }

    /// Returns the lowest row `shape` reaches when dropped straight down from
    /// `(row, col)`.
    #[must_use]
    pub fn drop_row(&self, shape: &PieceShape, row: i32, col: i32) -> i32 {
        let mut row = row;
        while self.is_valid_placement(shape, row + 1, col) {
            row += 1;
        }
        row
    }

    /// Writes the piece's occupied cells into the grid.
    ///
    /// Cells above the visible grid are dropped.
    pub fn fill_piece(&mut self, piece: &ActivePiece) {
        let kind = piece.kind();
        for (gr, gc) in piece.occupied_positions() {
            if gr < 0 || gc < 0 || gr >= to_i32(self.rows) || gc >= to_i32(self.columns) {
                continue;
            }
            let index = self.index(gr, gc);
            self.cells[index] = Cell::Locked(kind);
        }
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row * self.columns..][..self.columns]
            .iter()
            .all(|cell| !cell.is_empty())
    }

    /// Clears filled rows and returns how many were cleared.
    ///
    /// Rows are scanned bottom to top. A full row is removed by shifting every
    /// row above it down by one and emptying the top row; the same index is
    /// then examined again, since it now holds the row that was above.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        let mut row = self.rows;
        while row > 0 {
            if self.is_row_full(row - 1) {
                let width = self.columns;
                self.cells.copy_within(..(row - 1) * width, width);
                self.cells[..width].fill(Cell::Empty);
                count += 1;
                continue;
            }
            row -= 1;
        }
        count
    }

    fn index(&self, row: i32, col: i32) -> usize {
        // callers have bounds-checked both coordinates
        usize::try_from(row).unwrap_or_default() * self.columns
            + usize::try_from(col).unwrap_or_default()
    }

    /// Creates a grid from ASCII art, for tests and fixtures.
    ///
    /// Lines are bottom-aligned: the last non-blank line becomes the bottom
    /// row. `.` is an empty cell, a piece letter (`IOTSZJL`) is a cell locked
    /// with that kind and `#` is shorthand for a locked `I` cell.
    #[must_use]
    pub fn from_ascii(columns: usize, rows: usize, art: &str) -> Self {
        let mut grid = Self::new(columns, rows).expect("grid dimensions must be positive");
        let lines = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        assert!(
            lines.len() <= rows,
            "art has {} rows but the grid only {rows}",
            lines.len()
        );

        let top = rows - lines.len();
        for (y, line) in lines.iter().enumerate() {
            let cells = line
                .chars()
                .map(|ch| match ch {
                    '.' => Cell::Empty,
                    '#' => Cell::Locked(PieceKind::I),
                    _ => Cell::Locked(
                        PieceKind::from_char(ch)
                            .unwrap_or_else(|| panic!("invalid cell {ch:?} at art row {y}")),
                    ),
                })
                .collect::<Vec<_>>();
            assert_eq!(
                cells.len(),
                columns,
                "Each row must have exactly {columns} cells, got {} at art row {y}",
                cells.len()
            );
            let start = (top + y) * columns;
            grid.cells[start..start + columns].copy_from_slice(&cells);
        }
        grid
    }
}
