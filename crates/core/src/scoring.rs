//! Scoring module - line-clear points, level progression and gravity speed
//!
//! Rules:
//! - A clear of `n` rows is worth `n * 100 * level`, using the level in force
//!   before the cleared lines are counted.
//! - Level is always recomputed as `lines / 10 + 1`; it is never stored.
//! - Gravity falls one row every `1000 / level` milliseconds.

use crate::types::{BASE_DROP_MS, LINES_PER_LEVEL, LINE_CLEAR_POINTS};

/// Level for a cumulative line count.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Points for clearing `rows` rows at `level`.
pub fn line_clear_score(rows: u32, level: u32) -> u32 {
    rows.saturating_mul(LINE_CLEAR_POINTS).saturating_mul(level)
}

/// Milliseconds between gravity steps at `level`.
pub fn drop_interval_ms(level: u32) -> u32 {
    (BASE_DROP_MS / level.max(1)).max(1)
}

/// Outcome of crediting a sweep to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub score: u32,
    pub lines: u32,
    pub old_level: u32,
    pub new_level: u32,
}

impl ScoreResult {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// Score and line counters for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    score: u32,
    lines: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for_lines(self.lines)
    }

    /// Credit `rows` cleared rows.
    pub fn credit(&mut self, rows: u32) -> ScoreResult {
        let old_level = self.level();
        let points = line_clear_score(rows, old_level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows);

        ScoreResult {
            points,
            score: self.score,
            lines: self.lines,
            old_level,
            new_level: self.level(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
