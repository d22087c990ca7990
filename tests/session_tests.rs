//! Session tests - whole-game scenarios driven through commands

use blockfall::core::GameSession;
use blockfall::types::{GameCommand, GameEvent, PieceKind, BOARD_WIDTH, EMPTY};

fn started(seed: u32, first: PieceKind) -> GameSession {
    let mut s = GameSession::new(seed);
    s.set_next(first);
    s.start();
    s
}

fn fill_row(s: &mut GameSession, y: i8, columns: std::ops::Range<i8>) {
    for x in columns {
        s.board_mut().set(x, y, PieceKind::J.id());
    }
}

fn slide(s: &mut GameSession, command: GameCommand) {
    while s.apply(command).contains(&GameEvent::Moved) {}
}

#[test]
fn hard_drop_o_lands_on_the_floor_and_spawns() {
    let mut s = started(1, PieceKind::O);
    s.set_next(PieceKind::T);

    let events = s.apply(GameCommand::HardDrop);
    assert_eq!(
        events.as_slice(),
        &[
            GameEvent::HardDropped { rows: 18 },
            GameEvent::Locked,
            GameEvent::Spawned { kind: PieceKind::T },
        ]
    );

    let id = PieceKind::O.id();
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(s.board().get(x, y), Some(id));
    }
    assert_eq!(s.board().cells().iter().filter(|&&c| c != EMPTY).count(), 4);
    assert_eq!(s.active().map(|p| (p.kind(), p.x, p.y)), Some((PieceKind::T, 3, 0)));
}

#[test]
fn only_the_completed_row_clears() {
    let mut s = started(1, PieceKind::O);
    fill_row(&mut s, 19, 2..BOARD_WIDTH as i8);
    fill_row(&mut s, 18, 2..BOARD_WIDTH as i8 - 1);

    slide(&mut s, GameCommand::MoveLeft);
    assert_eq!(s.active().map(|p| p.x), Some(0));

    let events = s.apply(GameCommand::HardDrop);
    let cleared = events.iter().find_map(|e| match e {
        GameEvent::RowsCleared { rows, count } => Some((rows.to_vec(), *count)),
        _ => None,
    });
    assert_eq!(cleared, Some((vec![19], 1)));
    assert_eq!(s.lines(), 1);
    assert_eq!(s.score(), 100);

    // The incomplete row moved down into the bottom row, gap and all.
    assert_eq!(s.board().get(0, 19), Some(PieceKind::O.id()));
    assert_eq!(s.board().get(8, 19), Some(PieceKind::J.id()));
    assert_eq!(s.board().get(9, 19), Some(EMPTY));
    assert!(s.board().row(18).iter().all(|&c| c == EMPTY));
}

#[test]
fn double_clears_score_at_the_current_level() {
    let mut s = started(3, PieceKind::O);

    for round in 1..=6u32 {
        fill_row(&mut s, 18, 0..8);
        fill_row(&mut s, 19, 0..8);
        s.set_next(PieceKind::O);
        slide(&mut s, GameCommand::MoveRight);

        let level_before = s.level();
        let score_before = s.score();
        let events = s.apply(GameCommand::HardDrop);

        assert!(events.contains(&GameEvent::RowsCleared {
            rows: [19, 18].into_iter().collect(),
            count: 2
        }));
        assert_eq!(s.score() - score_before, 2 * 100 * level_before);
        assert_eq!(s.lines(), round * 2);
        assert_eq!(s.level(), (round * 2) / 10 + 1);
        assert_eq!(
            events.contains(&GameEvent::LeveledUp { level: 2 }),
            round == 5
        );
        assert!(s.board().cells().iter().all(|&c| c == EMPTY));
    }

    assert_eq!(s.score(), 5 * 200 + 400);
    assert_eq!(s.drop_interval_ms(), 500);
}

#[test]
fn game_over_fires_once_and_freezes_the_board() {
    let mut s = started(9, PieceKind::O);
    for y in 2..20 {
        fill_row(&mut s, y, 0..BOARD_WIDTH as i8 - 1);
    }
    s.set_next(PieceKind::O);

    let mut game_overs = 0;
    let events = s.apply(GameCommand::HardDrop);
    game_overs += events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));
    assert!(s.game_over());

    let board = s.board().clone();
    for command in [
        GameCommand::MoveLeft,
        GameCommand::MoveRight,
        GameCommand::RotateCw,
        GameCommand::RotateCcw,
        GameCommand::SoftDrop,
        GameCommand::HardDrop,
        GameCommand::Spawn,
        GameCommand::Pause,
    ] {
        let events = s.apply(command);
        game_overs += events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert!(events.is_empty(), "{:?} should be a no-op after game over", command);
    }
    assert!(s.tick(60_000).is_empty());

    assert_eq!(game_overs, 1);
    assert_eq!(s.board(), &board);
}

#[test]
fn reset_after_game_over_starts_fresh() {
    let mut s = started(9, PieceKind::O);
    for y in 2..20 {
        fill_row(&mut s, y, 0..BOARD_WIDTH as i8 - 1);
    }
    s.set_next(PieceKind::O);
    s.apply(GameCommand::HardDrop);
    assert!(s.game_over());

    let events = s.apply(GameCommand::Reset);
    assert!(matches!(events.as_slice(), [GameEvent::Spawned { .. }]));
    assert!(!s.game_over());
    assert_eq!(s.score(), 0);
    assert_eq!(s.level(), 1);
    assert!(s.board().cells().iter().all(|&c| c == EMPTY));
}

#[test]
fn move_then_opposite_move_is_identity() {
    let mut s = started(5, PieceKind::S);
    let start = *s.active().unwrap();

    assert_eq!(s.move_piece(1).as_slice(), &[GameEvent::Moved]);
    assert_eq!(s.move_piece(-1).as_slice(), &[GameEvent::Moved]);
    assert_eq!(*s.active().unwrap(), start);

    assert_eq!(s.move_piece(-1).as_slice(), &[GameEvent::Moved]);
    assert_eq!(s.move_piece(1).as_slice(), &[GameEvent::Moved]);
    assert_eq!(*s.active().unwrap(), start);
}

#[test]
fn rotation_against_the_wall_kicks() {
    let mut s = started(5, PieceKind::I);
    s.apply(GameCommand::RotateCw);
    slide(&mut s, GameCommand::MoveRight);
    let x_at_wall = s.active().unwrap().x;

    assert_eq!(s.apply(GameCommand::RotateCcw).as_slice(), &[GameEvent::Rotated]);
    let piece = *s.active().unwrap();
    assert!(piece.x < x_at_wall);
    assert!(!piece.collides(s.board()));
}

#[test]
fn blocked_rotation_changes_nothing() {
    let mut s = started(5, PieceKind::I);
    s.apply(GameCommand::RotateCw);
    // Vertical I occupies column 5; wall it in on both sides.
    for y in 0..20 {
        for x in 0..BOARD_WIDTH as i8 {
            if x != 5 {
                s.board_mut().set(x, y, 1);
            }
        }
    }
    let before = s.snapshot();

    assert_eq!(s.apply(GameCommand::RotateCw).as_slice(), &[GameEvent::Blocked]);
    assert_eq!(s.snapshot(), before);
}

#[test]
fn gravity_follows_elapsed_time() {
    let mut s = started(1, PieceKind::T);

    let mut drops = 0;
    for _ in 0..100 {
        // 100 frames of 50ms = 5 seconds at 1000ms per row.
        if s.tick(50).contains(&GameEvent::Dropped) {
            drops += 1;
        }
    }
    // A drop happens once the counter is strictly past 1000, i.e. every 21 frames.
    assert_eq!(drops, 4);
    assert_eq!(s.active().unwrap().y, 4);
}

#[test]
fn pause_and_resume() {
    let mut s = GameSession::new(1);
    assert!(s.apply(GameCommand::Pause).is_empty());

    s.start();
    assert_eq!(s.apply(GameCommand::Pause).as_slice(), &[GameEvent::Paused]);
    assert!(s.paused());
    assert!(s.tick(5_000).is_empty());
    assert!(s.apply(GameCommand::HardDrop).is_empty());
    assert_eq!(s.apply(GameCommand::Pause).as_slice(), &[GameEvent::Resumed]);
    assert!(!s.paused());
}

#[test]
fn high_score_is_reported_once_per_improvement() {
    let mut s = GameSession::with_high_score(1, 150);
    s.set_next(PieceKind::O);
    s.start();

    fill_row(&mut s, 19, 2..BOARD_WIDTH as i8);
    s.set_next(PieceKind::O);
    slide(&mut s, GameCommand::MoveLeft);
    let events = s.apply(GameCommand::HardDrop);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore { .. })));
    assert_eq!(s.high_score(), 150);

    // The O's upper half is now in row 19; completing it clears on the next lock.
    fill_row(&mut s, 19, 2..BOARD_WIDTH as i8);
    slide(&mut s, GameCommand::MoveLeft);
    let events = s.apply(GameCommand::HardDrop);
    assert!(events.contains(&GameEvent::NewHighScore { score: 200 }));
    assert_eq!(s.high_score(), 200);
    assert!(s.snapshot().new_high_score);
}

#[test]
fn reset_keeps_the_queued_piece() {
    let mut s = started(77, PieceKind::Z);
    s.set_next(PieceKind::I);
    let events = s.reset();
    assert_eq!(events.as_slice(), &[GameEvent::Spawned { kind: PieceKind::I }]);
}

#[test]
fn sessions_are_independent() {
    let mut a = started(11, PieceKind::T);
    let b = started(11, PieceKind::T);

    a.apply(GameCommand::HardDrop);
    assert_ne!(a.board(), b.board());
    assert!(b.board().cells().iter().all(|&c| c == EMPTY));
}

#[test]
fn same_seed_same_game() {
    let play = |seed| {
        let mut s = GameSession::new(seed);
        s.start();
        let mut kinds = Vec::new();
        for _ in 0..20 {
            kinds.push(s.active().map(|p| p.kind()));
            s.apply(GameCommand::HardDrop);
            if s.game_over() {
                break;
            }
        }
        (kinds, s.snapshot())
    };
    assert_eq!(play(31337), play(31337));
}

#[test]
fn snapshot_serializes_to_json() {
    let s = started(4, PieceKind::L);
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["score"], 0);
    assert_eq!(json["level"], 1);
    assert_eq!(json["started"], true);
    assert_eq!(json["board"].as_array().map(|rows| rows.len()), Some(20));
    assert_eq!(json["active"]["x"], 3);
    assert_eq!(json["active"]["shape"]["kind"], "L");
}
