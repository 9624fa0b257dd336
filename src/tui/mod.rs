//! Terminal User Interface (TUI) for focus sessions.
//!
//! Draws the countdown and daily stats, polling the driver about once a
//! second. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, SessionOutcome};

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::FocusError;
use crate::focus::{FocusDriver, FocusStorage};

/// Nominal period between scheduler polls.
const TICK_RATE: Duration = Duration::from_secs(1);

/// Run a started session until it ends and the user quits.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(driver: &mut FocusDriver, storage: &FocusStorage) -> Result<SessionOutcome, FocusError> {
    enable_raw_mode().map_err(|e| FocusError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FocusError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FocusError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = App::new(driver, storage).and_then(|mut app| run_app(&mut terminal, &mut app));

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_>,
) -> Result<SessionOutcome, FocusError> {
    let mut last_tick = Instant::now();
    app.tick(Local::now());

    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if let Some(action) = event::handle_events(timeout)? {
            match action {
                event::Action::Quit => {
                    app.abort();
                    break;
                }
                event::Action::TogglePause => app.toggle_pause(Local::now()),
                event::Action::Abort => app.abort(),
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick(Local::now());
            last_tick = Instant::now();
        }
    }

    Ok(app.outcome.unwrap_or(SessionOutcome::Aborted))
}
