//! Terminal rendering for blockfall.
//!
//! A small game-oriented layer: the view draws a snapshot onto a plain
//! character [`Surface`], and the renderer flushes surfaces to the terminal.
//! Only the renderer does I/O.

pub mod game_view;
pub mod renderer;
pub mod surface;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use game_view::{piece_color, GameView, Layout, Viewport};
pub use renderer::{encode_changes_into, encode_frame_into, TerminalRenderer};
pub use surface::{Glyph, Rgb, Style, Surface};
