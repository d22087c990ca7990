//! Blockfall: a falling-block puzzle game for the terminal.
//!
//! The game itself lives in the member crates under `crates/`; this package
//! re-exports them and adds the pieces only the binary needs: environment
//! configuration and durable high-score storage.

pub mod config;
pub mod high_score;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::{ConfigError, RunConfig};
pub use high_score::{HighScoreError, HighScoreStore, JsonFileStore, MemoryStore};
