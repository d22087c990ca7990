//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play one game of blockfall lives here, with no
//! dependency on a terminal, a clock or the filesystem. The host drives a
//! [`GameSession`] with commands and elapsed time and reads back events and
//! snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, collision, merge and row sweep
//! - [`pieces`]: the seven template shapes and quarter-turn rotation
//! - [`player`]: active piece movement, wall kicks and the next-piece queue
//! - [`rng`]: seeded uniform piece generation
//! - [`scoring`]: points, levels and gravity speed
//! - [`session`]: the game aggregate and its command surface
//! - [`snapshot`]: read-only copy of the state for rendering
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::{GameCommand, GameEvent};
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//!
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::RotateCw);
//! let events = game.apply(GameCommand::HardDrop);
//! assert!(events.contains(&GameEvent::Locked));
//!
//! // Gravity: call tick with the time since the last frame.
//! game.tick(16);
//! ```

pub mod board;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, Sweep};
pub use pieces::{Shape, Turn};
pub use player::{ActivePiece, Player, Spawn};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score, Progress, ScoreResult};
pub use session::GameSession;
pub use snapshot::GameSnapshot;
