use serde::Serialize;

use crate::pieces::Shape;
use crate::player::ActivePiece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Read-only copy of everything a renderer or score display needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActivePiece>,
    pub next: Option<Shape>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.high_score = 0;
        self.new_high_score = false;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.seed = 0;
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// Cell at (x, y) with the active piece drawn over the locked board.
    pub fn cell_with_active(&self, x: usize, y: usize) -> Cell {
        if let Some(active) = &self.active {
            let lx = x as i32 - active.x as i32;
            let ly = y as i32 - active.y as i32;
            if lx >= 0 && ly >= 0 {
                let v = active.shape.get(lx as usize, ly as usize);
                if v != EMPTY {
                    return v;
                }
            }
        }
        self.board[y][x]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            level: 1,
            lines: 0,
            high_score: 0,
            new_high_score: false,
            started: false,
            paused: false,
            game_over: false,
            seed: 0,
        }
    }
}
