//! Pieces module - the seven template shapes and the rotation transform
//!
//! A [`Shape`] is a square matrix (2x2, 3x3 or 4x4) of colour ids where 0 is
//! empty and one non-zero id marks the piece. Shapes are plain `Copy` values:
//! handing one out always hands out an independent matrix, so turning the
//! active piece can never disturb a template or a queued piece.

use serde::Serialize;

use crate::types::{Cell, PieceKind, EMPTY};

/// Largest matrix side of any template (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    /// `dir > 0` is clockwise, `dir < 0` counter-clockwise, 0 is no turn.
    pub fn from_dir(dir: i8) -> Option<Self> {
        match dir.signum() {
            1 => Some(Turn::Clockwise),
            -1 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

/// A piece matrix. Only the top-left `size x size` block of `cells` is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    kind: PieceKind,
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

/// Template rows with `1` marking filled cells; the kind's colour id is filled in later.
const fn template(kind: PieceKind) -> (u8, [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) {
    match kind {
        PieceKind::T => (3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::O => (2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::L => (3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::J => (3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::I => (4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::S => (3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::Z => (3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    }
}

impl Shape {
    /// A fresh copy of the spawn-orientation template for `kind`.
    pub fn new(kind: PieceKind) -> Self {
        let (size, mask) = template(kind);
        let id = kind.id();
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (dst, src) in cells.iter_mut().zip(mask.iter()) {
            for (d, &s) in dst.iter_mut().zip(src.iter()) {
                *d = s * id;
            }
        }
        Self { kind, size, cells }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Matrix side length.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Matrix width; shapes are square so this equals [`Shape::size`].
    pub fn width(&self) -> u8 {
        self.size
    }

    /// Colour id of the filled cells.
    pub fn color(&self) -> Cell {
        self.kind.id()
    }

    /// Cell at local (x, y); out-of-matrix reads are empty.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        let n = self.size as usize;
        if x >= n || y >= n {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// Matrix rows, `size` rows of `size` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        let n = self.size as usize;
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// Filled cells as `(dx, dy, value)` local offsets.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != EMPTY)
                .map(move |(x, &v)| (x as i8, y as i8, v))
        })
    }

    /// Turn the matrix a quarter in place.
    ///
    /// Transpose, then reverse each row (clockwise) or the row order
    /// (counter-clockwise). Purely geometric: the caller validates placement.
    pub fn rotate(&mut self, turn: Turn) {
        let n = self.size as usize;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
        match turn {
            Turn::Clockwise => {
                for row in &mut self.cells[..n] {
                    row[..n].reverse();
                }
            }
            Turn::CounterClockwise => self.cells[..n].reverse(),
        }
    }

    /// Rotated copy; `self` is left untouched.
    pub fn rotated(mut self, turn: Turn) -> Self {
        self.rotate(turn);
        self
    }
}
