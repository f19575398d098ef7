//! Terminal voxfall runner.
//!
//! Crossterm input (keyboard plus mouse for the portrait control pad) and a
//! framebuffer-based renderer with diff redraws. The game ticks at a fixed
//! period; input is polled with a timeout until the next tick is due.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use voxfall::core::GameState;
use voxfall::input::{handle_key_event, should_quit};
use voxfall::persist::HighScoreStore;
use voxfall::term::{GameView, TerminalRenderer, Viewport};
use voxfall::types::{GAME_OVER_BANNER_TICKS, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut store = HighScoreStore::open_default();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(1);
    let mut game_state = GameState::new(seed, store.best());

    let view = GameView::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut banner_ticks: u32 = 0;
    let mut banner_text = String::new();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let banner = (banner_ticks > 0).then_some(banner_text.as_str());
        let mut fb = view.render(&game_state, viewport, banner);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = handle_key_event(key) {
                            game_state.apply_action(action);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        if let Some(pad) = view.control_pad(viewport) {
                            if let Some(action) = pad.hit(mouse.column, mouse.row) {
                                game_state.apply_action(action);
                            }
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            banner_ticks = banner_ticks.saturating_sub(1);

            game_state.tick();

            if let Some(tick_event) = game_state.take_last_event() {
                // Persistence failures should not end a game in progress.
                let _ = store.record(game_state.best_score());

                if tick_event.game_over {
                    banner_text = format!("GAME OVER  SCORE {}", tick_event.final_score);
                    banner_ticks = GAME_OVER_BANNER_TICKS;
                }
            }
        }
    }
}
