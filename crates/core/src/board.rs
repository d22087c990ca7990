//! Board module - the grid of locked cells
//!
//! The board is a 10x20 grid stored as a flat row-major array of colour ids.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Cells above the top edge (negative y) are never stored; pieces may poke into
//! that space without colliding.

use crate::pieces::Shape;
use crate::types::{Cell, ClearedRows, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Highest colour id a cell can hold.
const MAX_CELL: Cell = 7;

const WIDTH: usize = BOARD_WIDTH as usize;

/// Result of [`Board::sweep`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sweep {
    /// Cleared row indices on the pre-sweep board, bottom first.
    pub rows: ClearedRows,
    pub count: u32,
}

impl Sweep {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    ///
    /// Values above the highest colour id are clamped to it.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell.min(MAX_CELL);
                true
            }
            None => false,
        }
    }

    /// In bounds and non-empty.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// One row as a slice. Panics if `y` is not a board row.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|&c| c != EMPTY)
    }

    /// Would `shape` with its top-left corner at (x, y) overlap anything?
    ///
    /// A filled shape cell collides when it lands left of column 0, right of the
    /// last column, below the bottom row, or on an occupied cell. Cells above
    /// the top edge never collide.
    pub fn collide(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled().any(|(dx, dy, _)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Write every filled cell of `shape` at (x, y) into the board.
    ///
    /// Callers only merge a position that [`Board::collide`] accepted. Cells
    /// that fall outside the grid (above the top edge) are dropped.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8) {
        for (dx, dy, value) in shape.filled() {
            self.set(x + dx, y + dy, value);
        }
    }

    /// Remove full rows and drop everything above them.
    ///
    /// Rows are scanned bottom to top while `y > 0`; the row sitting at index 0
    /// when the scan gets there is never examined. After a removal a fresh empty
    /// row is inserted at the top and the same `y` is checked again, since it
    /// now holds the row that was above.
    pub fn sweep(&mut self) -> Sweep {
        let mut sweep = Sweep::default();
        let mut y = BOARD_HEIGHT as usize - 1;

        while y > 0 {
            if !self.is_row_full(y) {
                y -= 1;
                continue;
            }

            // Physical row y currently holds pre-sweep row y - count.
            sweep.rows.push((y - sweep.count as usize) as u8);
            sweep.count += 1;
            self.remove_row(y);
        }

        sweep
    }

    /// Delete row `y`, shift rows above it down, and empty the top row.
    fn remove_row(&mut self, y: usize) {
        // copy_within handles overlapping ranges safely
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(EMPTY);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Copy into a `[row][col]` grid, the shape snapshots expose.
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Build from rows of text, `.` for empty and a digit for a colour id.
    ///
    /// Missing rows at the top are empty, so tests only spell out the bottom of the board.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["1111111111"]);
    /// assert!(board.is_row_full(19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = BOARD_HEIGHT as usize - rows.len().min(BOARD_HEIGHT as usize);
        for (i, line) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                let value = ch.to_digit(10).map(|d| (d as Cell).min(MAX_CELL)).unwrap_or(EMPTY);
                board.cells[(offset + i) * WIDTH + x] = value;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
