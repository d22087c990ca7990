//! Session module - one complete, independently owned game
//!
//! A [`GameSession`] aggregates the board, the player, the piece generator and
//! the score counters. Commands run to completion synchronously and return
//! the [`Events`] they produced; an empty list means the command was a no-op.
//!
//! Lock sequence, always in this order and never observable half-done:
//! merge the piece, sweep full rows, credit score and level, spawn the next piece.

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::{Shape, Turn};
use crate::player::{ActivePiece, Player};
use crate::rng::PieceGenerator;
use crate::scoring::{drop_interval_ms, Progress};
use crate::snapshot::GameSnapshot;
use crate::types::{Events, GameCommand, GameEvent, PieceKind};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    player: Player,
    generator: PieceGenerator,
    progress: Progress,
    /// Best score known to the session; raised as soon as the live score beats it.
    high_score: u32,
    /// The current game has beaten the best score it started with.
    new_high_score: bool,
    /// Time accumulated toward the next gravity step.
    drop_counter_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameSession {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_high_score(seed, 0)
    }

    /// Create a new game that reports `NewHighScore` once `high_score` is beaten.
    pub fn with_high_score(seed: u32, high_score: u32) -> Self {
        Self {
            board: Board::new(),
            player: Player::new(),
            generator: PieceGenerator::new(seed),
            progress: Progress::new(),
            high_score,
            new_high_score: false,
            drop_counter_ms: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece. Does nothing once started.
    pub fn start(&mut self) -> Events {
        if self.started {
            return Events::new();
        }
        self.reset()
    }

    /// Clear board and counters, then spawn. The queued next piece is kept.
    pub fn reset(&mut self) -> Events {
        self.board.clear();
        self.progress.clear();
        self.player.clear_active();
        self.drop_counter_ms = 0;
        self.new_high_score = false;
        self.paused = false;
        self.game_over = false;
        self.started = true;
        debug!(seed = self.generator.seed(), "game reset");

        let mut events = Events::new();
        self.spawn_into(&mut events);
        events
    }

    /// Spawn the queued piece, replacing any active one.
    ///
    /// On a session that has not started yet this starts it, like [`GameSession::start`].
    pub fn spawn(&mut self) -> Events {
        if !self.started {
            return self.reset();
        }
        let mut events = Events::new();
        if !self.is_live() {
            return events;
        }
        self.spawn_into(&mut events);
        events
    }

    /// Shift the active piece one column; `dir` is -1 (left) or +1 (right).
    pub fn move_piece(&mut self, dir: i8) -> Events {
        let mut events = Events::new();
        if !self.is_live() || dir == 0 {
            return events;
        }
        let Some(piece) = self.player.active_mut() else {
            return events;
        };

        if piece.try_shift(&self.board, dir.signum()) {
            events.push(GameEvent::Moved);
        } else {
            events.push(GameEvent::Blocked);
        }
        events
    }

    /// Turn the active piece; `dir` > 0 is clockwise, < 0 counter-clockwise.
    pub fn rotate(&mut self, dir: i8) -> Events {
        let mut events = Events::new();
        if !self.is_live() {
            return events;
        }
        let Some(turn) = Turn::from_dir(dir) else {
            return events;
        };
        let Some(piece) = self.player.active_mut() else {
            return events;
        };

        if piece.try_rotate(&self.board, turn) {
            events.push(GameEvent::Rotated);
        } else {
            debug!(kind = ?piece.kind(), x = piece.x, y = piece.y, "rotation blocked");
            events.push(GameEvent::Blocked);
        }
        events
    }

    /// Fall one row, or lock if the piece is resting on something.
    pub fn soft_drop(&mut self) -> Events {
        let mut events = Events::new();
        if !self.is_live() {
            return events;
        }
        let Some(piece) = self.player.active_mut() else {
            return events;
        };

        let fell = piece.try_fall(&self.board);
        self.drop_counter_ms = 0;
        if fell {
            events.push(GameEvent::Dropped);
        } else {
            self.lock(&mut events);
        }
        events
    }

    /// Fall to the lowest legal row and lock.
    pub fn hard_drop(&mut self) -> Events {
        let mut events = Events::new();
        if !self.is_live() {
            return events;
        }
        let Some(piece) = self.player.active_mut() else {
            return events;
        };

        let rows = piece.fall_to_floor(&self.board);
        self.drop_counter_ms = 0;
        events.push(GameEvent::HardDropped { rows });
        self.lock(&mut events);
        events
    }

    /// Pause or resume. Only meaningful while a game is running.
    pub fn toggle_pause(&mut self) -> Events {
        let mut events = Events::new();
        if !self.started || self.game_over {
            return events;
        }
        self.paused = !self.paused;
        events.push(if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
        events
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds [`GameSession::drop_interval_ms`] the
    /// piece soft-drops, which also resets the accumulator.
    pub fn tick(&mut self, elapsed_ms: u32) -> Events {
        if !self.is_live() || self.player.active().is_none() {
            return Events::new();
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms() {
            return self.soft_drop();
        }
        Events::new()
    }

    /// Apply a discrete command
    pub fn apply(&mut self, command: GameCommand) -> Events {
        match command {
            GameCommand::Spawn => self.spawn(),
            GameCommand::MoveLeft => self.move_piece(-1),
            GameCommand::MoveRight => self.move_piece(1),
            GameCommand::RotateCw => self.rotate(1),
            GameCommand::RotateCcw => self.rotate(-1),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::Pause => self.toggle_pause(),
            GameCommand::Reset => self.reset(),
        }
    }

    fn is_live(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    fn spawn_into(&mut self, events: &mut Events) {
        let spawn = self.player.spawn(&self.board, &mut self.generator);
        self.drop_counter_ms = 0;

        if spawn.collided {
            self.game_over = true;
            info!(score = self.progress.score(), lines = self.progress.lines(), "game over");
            events.push(GameEvent::GameOver {
                final_score: self.progress.score(),
            });
        } else {
            debug!(kind = ?spawn.kind, "spawned");
            events.push(GameEvent::Spawned { kind: spawn.kind });
        }
    }

    /// Merge, sweep, score, spawn.
    fn lock(&mut self, events: &mut Events) {
        let Some(piece) = self.player.active().copied() else {
            return;
        };

        self.board.merge(&piece.shape, piece.x, piece.y);
        debug!(kind = ?piece.kind(), x = piece.x, y = piece.y, "locked");
        events.push(GameEvent::Locked);

        let sweep = self.board.sweep();
        if !sweep.is_empty() {
            let result = self.progress.credit(sweep.count);
            info!(
                rows = sweep.count,
                points = result.points,
                score = result.score,
                lines = result.lines,
                "rows cleared"
            );
            events.push(GameEvent::RowsCleared {
                rows: sweep.rows,
                count: sweep.count,
            });

            if result.leveled_up() {
                info!(level = result.new_level, "level up");
                events.push(GameEvent::LeveledUp {
                    level: result.new_level,
                });
            }

            if result.score > self.high_score {
                self.high_score = result.score;
                self.new_high_score = true;
                info!(score = result.score, "new high score");
                events.push(GameEvent::NewHighScore {
                    score: result.score,
                });
            }
        }

        self.spawn_into(events);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True once this game has set a new best score.
    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.player.active()
    }

    pub fn next_shape(&self) -> Option<&Shape> {
        self.player.next()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up puzzles and test scenarios.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Queue `kind` as the next piece to spawn.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.player.set_next(Shape::new(kind));
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level())
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.player.active().copied();
        out.next = self.player.next().copied();
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
        out.high_score = self.high_score;
        out.new_high_score = self.new_high_score;
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.seed = self.generator.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
