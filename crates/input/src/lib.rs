//! Terminal input for blockfall.
//!
//! Maps `crossterm` key events onto [`crate::types::GameCommand`]s. Held-key
//! repeat is left to the terminal's own auto-repeat; every press is one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_start_key, should_quit};
