//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::FocusError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the TUI, aborting a running session.
    Quit,
    /// Pause or resume the countdown.
    TogglePause,
    /// Abort the session but stay on screen.
    Abort,
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if the timeout elapsed or the key is
/// not bound.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(timeout: Duration) -> Result<Option<Action>, FocusError> {
    if !event::poll(timeout)
        .map_err(|e| FocusError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| FocusError::Terminal(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };

    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    Ok(match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('p' | ' ') => Some(Action::TogglePause),
        KeyCode::Char('a') => Some(Action::Abort),
        _ => None,
    })
}
