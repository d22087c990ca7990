//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game commands.
///
/// Release events are ignored so terminals that report them do not double
/// every move.
pub fn handle_key_event(key: KeyEvent) -> Option<GameCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameCommand::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameCommand::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameCommand::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameCommand::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(GameCommand::RotateCcw),

        KeyCode::Char(' ') => Some(GameCommand::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Reset),

        _ => None,
    }
}

/// Keys that start a game from the title screen.
pub fn is_start_key(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
