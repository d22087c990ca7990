//! Terminal blockfall runner.
//!
//! Owns the clock: every frame it feeds the elapsed wall time to the session,
//! maps key presses to commands, persists new high scores and redraws.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::config::RunConfig;
use blockfall::core::{GameSession, GameSnapshot};
use blockfall::high_score::{HighScoreStore, JsonFileStore, MemoryStore};
use blockfall::input::{handle_key_event, is_start_key, should_quit};
use blockfall::term::{GameView, Surface, TerminalRenderer, Viewport};
use blockfall::types::{Events, GameEvent};

/// Upper bound on how long the loop sleeps waiting for input.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = RunConfig::from_env()?;
    init_logging(&config)?;

    let mut store = open_store(&config);
    let best = store.load_or_default();
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, best, "starting blockfall");

    let mut session = GameSession::with_high_score(seed, best);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session, store.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = session.score(), best = session.high_score(), "exiting");
    result
}

fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_store(config: &RunConfig) -> Box<dyn HighScoreStore> {
    if config.no_save {
        return Box::new(MemoryStore::default());
    }
    match config.resolved_high_score_path() {
        Some(path) => {
            debug!(path = %path.display(), "high score file");
            Box::new(JsonFileStore::new(path))
        }
        None => {
            warn!("no data directory, high score will not be saved");
            Box::new(MemoryStore::default())
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut GameSession,
    store: &mut dyn HighScoreStore,
) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut frame = Surface::new(0, 0);
    let mut last = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut frame);
        term.draw_swap(&mut frame)?;

        if event::poll(FRAME.saturating_sub(last.elapsed()))? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if !session.started() {
                        if is_start_key(key) {
                            let events = session.start();
                            handle_events(&events, store);
                        }
                    } else if let Some(command) = handle_key_event(key) {
                        let events = session.apply(command);
                        handle_events(&events, store);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = take_elapsed_ms(&mut last, Instant::now());
        if elapsed > 0 {
            let events = session.tick(elapsed);
            handle_events(&events, store);
        }
    }
}

/// Whole milliseconds from `last` to `now`. `last` advances by exactly that
/// much, so the sub-millisecond remainder carries into the next frame.
fn take_elapsed_ms(last: &mut Instant, now: Instant) -> u32 {
    let elapsed = now.saturating_duration_since(*last).as_millis().min(u32::MAX as u128) as u32;
    *last += Duration::from_millis(u64::from(elapsed));
    elapsed
}

fn handle_events(events: &Events, store: &mut dyn HighScoreStore) {
    for event in events {
        match event {
            GameEvent::NewHighScore { score } => {
                if let Err(err) = store.save(*score) {
                    warn!(error = %err, score, "could not save high score");
                }
            }
            GameEvent::GameOver { final_score } => {
                info!(final_score, "game over");
            }
            other => debug!(event = other.name(), "game event"),
        }
    }
}
