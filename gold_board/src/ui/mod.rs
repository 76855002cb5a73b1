//! Terminal front end.
//!
//! - `app`: state and key handling
//! - `render`: drawing
//! - `terminal`: raw-mode setup and teardown
pub mod app;
mod render;
mod terminal;

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{self, Event, KeyEventKind};
use gold_common::{BoardEvent, Result};
use log::{info, warn};

use app::App;

/// Longest wait for input when no animation frame is due.
const IDLE_POLL: Duration = Duration::from_millis(200);

/// Run the board until the user quits.
///
/// The terminal is restored even when the loop fails.
pub fn run(app: App, events: Receiver<BoardEvent>) -> Result<()> {
    let mut terminal = terminal::setup()?;
    let outcome = event_loop(&mut terminal, app, &events);
    terminal::restore(&mut terminal)?;
    outcome
}

fn event_loop(
    terminal: &mut terminal::BoardTerminal,
    mut app: App,
    events: &Receiver<BoardEvent>,
) -> Result<()> {
    let mut worker_alive = true;
    while !app.should_quit() {
        let now = Instant::now();
        while worker_alive {
            match events.try_recv() {
                Ok(event) => app.handle_event(event, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Price worker stopped; showing last known state");
                    worker_alive = false;
                }
            }
        }
        app.tick(now);
        terminal.draw(|f| render::draw(f, &app))?;

        let timeout = app
            .board
            .next_frame_due()
            .map(|due| due.saturating_duration_since(Instant::now()).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }
    }
    info!("Board closed by user");
    Ok(())
}
