//! Player module - the falling piece and the queued next piece
//!
//! Every move is speculative: shift, test for collision, then keep or revert.
//! After any method here returns, the active piece does not overlap the board,
//! with one exception: a spawn that collides is left in place so the final
//! frame can still be drawn.

use serde::Serialize;

use crate::board::Board;
use crate::pieces::{Shape, Turn};
use crate::rng::PieceGenerator;
use crate::types::{PieceKind, BOARD_WIDTH};

/// The falling piece: its own matrix plus the board position of the matrix's top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place `shape` at the top row, horizontally centred.
    pub fn at_spawn(shape: Shape) -> Self {
        let x = (BOARD_WIDTH as i8 - shape.width() as i8) / 2;
        Self { shape, x, y: 0 }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collide(&self.shape, self.x, self.y)
    }

    /// Shift sideways by `dx`. Returns false and stays put if blocked.
    pub fn try_shift(&mut self, board: &Board, dx: i8) -> bool {
        self.x += dx;
        if self.collides(board) {
            self.x -= dx;
            return false;
        }
        true
    }

    /// Fall one row. Returns false and stays put if blocked.
    pub fn try_fall(&mut self, board: &Board) -> bool {
        self.y += 1;
        if self.collides(board) {
            self.y -= 1;
            return false;
        }
        true
    }

    /// Fall until blocked. Returns the number of rows fallen.
    pub fn fall_to_floor(&mut self, board: &Board) -> u32 {
        let mut rows = 0;
        while !board.collide(&self.shape, self.x, self.y + 1) {
            self.y += 1;
            rows += 1;
        }
        rows
    }

    /// Turn a quarter, then search sideways for room.
    ///
    /// The kick search is a simple linear one, not a per-orientation kick
    /// table: offsets 1, -2, 3, -4, ... are added to `x` in turn, so the piece
    /// probes one right, one left, two right and so on. The search gives up once
    /// the next offset exceeds the matrix width; the turn is then undone and
    /// `x` restored exactly.
    pub fn try_rotate(&mut self, board: &Board, turn: Turn) -> bool {
        let origin_x = self.x;
        let width = self.shape.width() as i8;
        let mut offset: i8 = 1;

        self.shape.rotate(turn);
        while self.collides(board) {
            self.x += offset;
            offset = -(offset + offset.signum());
            if offset > width {
                self.shape.rotate(turn.reverse());
                self.x = origin_x;
                return false;
            }
        }
        true
    }
}

/// Outcome of [`Player::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub kind: PieceKind,
    /// The new piece overlaps the board: the game is over.
    pub collided: bool,
}

/// Owns the active piece and the next-piece queue.
#[derive(Debug, Clone, Default)]
pub struct Player {
    active: Option<ActivePiece>,
    next: Option<Shape>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActivePiece> {
        self.active.as_mut()
    }

    pub fn next(&self) -> Option<&Shape> {
        self.next.as_ref()
    }

    /// Replace the queued piece.
    pub fn set_next(&mut self, shape: Shape) {
        self.next = Some(shape);
    }

    /// Promote the queued piece (drawing one if the queue is empty), queue a
    /// new one, and place the active piece at the spawn point.
    pub fn spawn(&mut self, board: &Board, generator: &mut PieceGenerator) -> Spawn {
        let shape = match self.next.take() {
            Some(shape) => shape,
            None => generator.next_shape(),
        };
        self.next = Some(generator.next_shape());

        let piece = ActivePiece::at_spawn(shape);
        let collided = piece.collides(board);
        self.active = Some(piece);

        Spawn {
            kind: shape.kind(),
            collided,
        }
    }

    /// Drop the active piece without locking it.
    pub fn clear_active(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EMPTY;

    fn piece(kind: PieceKind) -> ActivePiece {
        ActivePiece::at_spawn(Shape::new(kind))
    }

    #[test]
    fn test_spawn_positions_are_centred() {
        assert_eq!(piece(PieceKind::O).x, 4);
        assert_eq!(piece(PieceKind::T).x, 3);
        assert_eq!(piece(PieceKind::I).x, 3);
        assert_eq!(piece(PieceKind::I).y, 0);
    }

    #[test]
    fn test_shift_stops_at_walls() {
        let board = Board::new();
        let mut p = piece(PieceKind::O);
        let mut moved = 0;
        while p.try_shift(&board, -1) {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert_eq!(p.x, 0);

        while p.try_shift(&board, 1) {}
        assert_eq!(p.x, 8);
    }

    #[test]
    fn test_fall_to_floor_lands_on_bottom_row() {
        let board = Board::new();
        let mut p = piece(PieceKind::O);
        assert_eq!(p.fall_to_floor(&board), 18);
        assert_eq!(p.y, 18);
        assert!(!p.try_fall(&board));
        assert_eq!(p.y, 18);
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let board = Board::new();
        // Vertical I against the right wall: the filled column is matrix column 2.
        let mut p = piece(PieceKind::I);
        p.shape.rotate(Turn::Clockwise);
        p.x = 7;
        assert!(!p.collides(&board));

        // Turning back to horizontal needs columns 7..=10; the kick moves it left.
        assert!(p.try_rotate(&board, Turn::CounterClockwise));
        assert!(!p.collides(&board));
        assert!(p.x < 7);
    }

    #[test]
    fn test_rotate_blocked_restores_state() {
        // A vertical I in a one-wide shaft with no room to turn.
        let mut board = Board::new();
        for y in 0..20 {
            for x in 0..10 {
                if x != 4 {
                    board.set(x, y, 2);
                }
            }
        }
        let mut p = ActivePiece {
            shape: Shape::new(PieceKind::I).rotated(Turn::Clockwise),
            x: 2,
            y: 0,
        };
        assert!(!p.collides(&board));
        let before = p;
        assert!(!p.try_rotate(&board, Turn::Clockwise));
        assert_eq!(p, before);
    }

    /// A full board with a single pocket shaped like the clockwise T at column `x`.
    fn board_with_t_pocket(x: i8, y: i8) -> Board {
        let mut board = Board::new();
        for by in 0..20 {
            for bx in 0..10 {
                board.set(bx, by, 2);
            }
        }
        let turned = Shape::new(PieceKind::T).rotated(Turn::Clockwise);
        for (dx, dy, _) in turned.filled() {
            board.set(x + dx, y + dy, EMPTY);
        }
        board
    }

    #[test]
    fn test_rotate_kick_order() {
        // Offsets 1, -2, 3 reach net shifts +1, -1, +2. The search gives up
        // before testing -2.
        for (shift, expected) in [(1, Some(5)), (-1, Some(3)), (2, Some(6)), (-2, None)] {
            let board = board_with_t_pocket(4 + shift, 10);
            let mut p = ActivePiece {
                shape: Shape::new(PieceKind::T),
                x: 4,
                y: 10,
            };
            let before = p;
            let ok = p.try_rotate(&board, Turn::Clockwise);
            match expected {
                Some(x) => {
                    assert!(ok, "shift {shift} should fit");
                    assert_eq!(p.x, x);
                    assert!(!p.collides(&board));
                }
                None => {
                    assert!(!ok, "shift {shift} should not be tried");
                    assert_eq!(p, before);
                }
            }
        }
    }

    #[test]
    fn test_spawn_uses_queued_piece() {
        let board = Board::new();
        let mut gen = PieceGenerator::new(7);
        let mut player = Player::new();
        player.set_next(Shape::new(PieceKind::Z));

        let spawn = player.spawn(&board, &mut gen);
        assert_eq!(spawn.kind, PieceKind::Z);
        assert!(!spawn.collided);
        assert_eq!(player.active().map(|p| p.kind()), Some(PieceKind::Z));
        assert!(player.next().is_some());
    }

    #[test]
    fn test_spawn_reports_collision() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 0, 1);
            board.set(x, 1, 1);
        }
        let mut gen = PieceGenerator::new(7);
        let mut player = Player::new();
        let spawn = player.spawn(&board, &mut gen);
        assert!(spawn.collided);
        assert!(player.active().is_some());
    }
}
