//! Shared types - constants, piece kinds, commands and events
//!
//! Everything here is plain data. The core crate mutates game state, the
//! platform crates (input, terminal) translate to and from these types, and
//! nothing in this crate knows about either.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Dimensions are compile-time constants; a board never changes size.
//!
//! # Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 (divided by level) |
//! | `LINES_PER_LEVEL` | 10 | Lines needed to advance one level |
//! | `LINE_CLEAR_POINTS` | 100 | Points per cleared row, multiplied by level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameCommand, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.id(), 1);
//! assert_eq!(PieceKind::from_id(5), Some(PieceKind::I));
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 1, in milliseconds. Level N falls every `BASE_DROP_MS / N`.
pub const BASE_DROP_MS: u32 = 1000;

/// Cleared lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for one cleared row at level 1.
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Upper bound on rows a single sweep can remove.
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// A board cell: `0` is empty, `1..=7` is the colour id of the piece that filled it.
pub type Cell = u8;

/// The empty cell value.
pub const EMPTY: Cell = 0;

/// Row indices removed by one sweep, bottom first.
pub type ClearedRows = ArrayVec<u8, MAX_CLEARED_ROWS>;

/// The seven piece kinds.
///
/// The declaration order is also the colour order: `T` is 1, `Z` is 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in colour-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Colour id written into board cells (1..=7).
    pub fn id(self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. `0` and anything above 7 map to `None`.
    pub fn from_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Discrete commands accepted by a game session.
///
/// `tick` is not listed: it carries elapsed time and is called directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameCommand {
    /// Spawn the queued piece as the active piece
    Spawn,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate clockwise, with wall kick
    RotateCw,
    /// Rotate counter-clockwise, with wall kick
    RotateCcw,
    /// Fall one row, locking if blocked
    SoftDrop,
    /// Fall to the lowest legal row and lock
    HardDrop,
    /// Toggle pause
    Pause,
    /// Clear the board and start over
    Reset,
}

impl GameCommand {
    /// Parse a command name (case-insensitive camelCase)
    ///
    /// ```
    /// use blockfall_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("ROTATECCW"), Some(GameCommand::RotateCcw));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spawn" => Some(GameCommand::Spawn),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "rotatecw" => Some(GameCommand::RotateCw),
            "rotateccw" => Some(GameCommand::RotateCcw),
            "softdrop" => Some(GameCommand::SoftDrop),
            "harddrop" => Some(GameCommand::HardDrop),
            "pause" => Some(GameCommand::Pause),
            "reset" | "restart" => Some(GameCommand::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Spawn => "spawn",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::RotateCw => "rotateCw",
            GameCommand::RotateCcw => "rotateCcw",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::Pause => "pause",
            GameCommand::Reset => "reset",
        }
    }
}

/// Something that happened while executing a command.
///
/// Collaborators (sound, haptics, animation, score display, persistence)
/// react to these; the core never calls out to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A new active piece entered the board.
    Spawned { kind: PieceKind },
    /// The active piece shifted sideways.
    Moved,
    /// The command was legal but the piece could not move or turn.
    Blocked,
    /// The active piece turned (possibly after a wall kick).
    Rotated,
    /// The active piece fell one row.
    Dropped,
    /// The active piece fell `rows` rows in one hard drop.
    HardDropped { rows: u32 },
    /// The active piece was merged into the board.
    Locked,
    /// Full rows were swept. `rows` are indices on the board as it was before the sweep.
    RowsCleared { rows: ClearedRows, count: u32 },
    /// The level went up.
    LeveledUp { level: u32 },
    /// The score beat the best score on record.
    NewHighScore { score: u32 },
    /// A freshly spawned piece collided; the game is over.
    GameOver { final_score: u32 },
    Paused,
    Resumed,
}

impl GameEvent {
    /// Short camelCase name, for logs and sound/haptic lookup tables.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::Moved => "moved",
            GameEvent::Blocked => "blocked",
            GameEvent::Rotated => "rotated",
            GameEvent::Dropped => "dropped",
            GameEvent::HardDropped { .. } => "hardDropped",
            GameEvent::Locked => "locked",
            GameEvent::RowsCleared { .. } => "rowsCleared",
            GameEvent::LeveledUp { .. } => "leveledUp",
            GameEvent::NewHighScore { .. } => "newHighScore",
            GameEvent::GameOver { .. } => "gameOver",
            GameEvent::Paused => "paused",
            GameEvent::Resumed => "resumed",
        }
    }
}

/// Upper bound on events produced by one command.
///
/// The longest chain is a hard drop: hardDropped, locked, rowsCleared,
/// leveledUp, newHighScore, then spawned or gameOver.
pub const MAX_EVENTS: usize = 8;

/// Events produced by one command, in the order they happened.
pub type Events = ArrayVec<GameEvent, MAX_EVENTS>;
