//! Terminal Bubble Pop runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout). Hovering the mouse selects a group, a left
//! click pops it; the keyboard drives a cursor for terminals without mouse
//! reporting.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use bubble_pop::config::AppConfig;
use bubble_pop::core::{BoardSnapshot, GameSession};
use bubble_pop::input::{
    handle_key_event, handle_mouse_event, should_quit, Cursor, InputCommand, PointerEvent,
};
use bubble_pop::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use bubble_pop::types::{GameAction, POP_FLASH_MS, TICK_MS};

/// Redraw unchanged frames this often anyway.
const STATIC_REFRESH_MS: u64 = 1000;

fn main() -> Result<()> {
    let config = AppConfig::load().context("load configuration")?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file when one is configured; the terminal itself is busy.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let session_config = config.session_config();
    tracing::info!(
        seed = session_config.seed,
        width = session_config.width,
        height = session_config.height,
        "starting session"
    );

    let mut session = GameSession::new(session_config);
    let mut cursor = Cursor::new(session.config().width, session.config().height);
    session.apply_action(cursor.force_select());

    let view = GameView::new(config.cell_w, 1);
    let mut snap = BoardSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REFRESH_MS);

    let started = Instant::now();
    let tick = Duration::from_millis(TICK_MS as u64);
    let flash = Duration::from_millis(POP_FLASH_MS as u64);
    let mut popped_at: Option<Instant> = None;
    let mut viewport = terminal_viewport();

    loop {
        if popped_at.is_some_and(|t| t.elapsed() >= flash) {
            session.take_popped();
            popped_at = None;
        }

        // Render.
        session.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        let (cx, cy) = cursor.position();
        let fingerprint = snap.fingerprint() ^ ((cx as u32 as u64) << 32 | cy as u32 as u64);
        if throttle.should_render(now_ms, fingerprint) {
            view.render_into_with_cursor(&snap, Some(cursor.position()), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        if !event::poll(tick)? {
            continue;
        }

        let mut popped = false;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    tracing::info!(score = session.score(), "quit");
                    return Ok(());
                }
                if let Some(command) = handle_key_event(key) {
                    if let Some(action) = cursor.apply(command) {
                        popped = apply(&mut session, &cursor, action);
                    }
                    if command == InputCommand::Restart {
                        tracing::info!(episode = session.episode_id(), "restart");
                    }
                }
            }
            Event::Mouse(mouse) => match handle_mouse_event(mouse) {
                Some(PointerEvent::Hover { column, row }) => {
                    let (x, y) = view.board_coord_at(&snap, viewport, column, row);
                    if on_board(&snap, x, y) {
                        cursor.set_position(x, y);
                    }
                    session.apply_action(GameAction::Select { x, y });
                }
                Some(PointerEvent::Click { column, row }) => {
                    let (x, y) = view.board_coord_at(&snap, viewport, column, row);
                    if on_board(&snap, x, y) {
                        cursor.set_position(x, y);
                        session.apply_action(GameAction::ForceSelect { x, y });
                        popped = apply(&mut session, &cursor, GameAction::Pop);
                    }
                }
                None => {}
            },
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
                throttle.reset();
            }
            _ => {}
        }

        if popped {
            popped_at = Some(Instant::now());
        }
    }
}

/// Apply an action; after pops and restarts the board moved under the
/// cursor, so the selection is recomputed. Returns true if bubbles popped.
fn apply(session: &mut GameSession, cursor: &Cursor, action: GameAction) -> bool {
    match action {
        GameAction::Pop => {
            let popped = session.pop().is_some();
            if popped {
                session.apply_action(cursor.force_select());
            }
            popped
        }
        GameAction::Restart => {
            session.restart();
            session.apply_action(cursor.force_select());
            false
        }
        other => {
            session.apply_action(other);
            false
        }
    }
}

fn on_board(snap: &BoardSnapshot, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && x < snap.width as i32 && y < snap.height as i32
}

fn terminal_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
