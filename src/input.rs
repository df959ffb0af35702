//! Input thread: blocking crossterm reads mapped to semantic events so the
//! main loop never touches raw key codes.

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::thread;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Char(char),
    Backspace,
    Enter,
    HistoryUp,
    HistoryDown,
    Resize(u16, u16),
    Exit,
}

/// Map one key event to its semantic meaning, or `None` for keys the
/// dispatcher layer ignores.
pub(crate) fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Exit);
    }
    match key.code {
        KeyCode::Esc => Some(InputEvent::Exit),
        KeyCode::Enter => Some(InputEvent::Enter),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Up => Some(InputEvent::HistoryUp),
        KeyCode::Down => Some(InputEvent::HistoryDown),
        KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(InputEvent::Char(ch))
        }
        _ => None,
    }
}

/// Read terminal events until the receiver hangs up or reads start failing.
pub(crate) fn spawn_input_thread(tx: Sender<InputEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let mapped = match event::read() {
            Ok(Event::Key(key)) => map_key_event(key),
            Ok(Event::Resize(cols, rows)) => Some(InputEvent::Resize(cols, rows)),
            Ok(_) => None,
            Err(err) => {
                debug!("terminal event read error: {err}");
                break;
            }
        };
        if let Some(event) = mapped {
            if tx.send(event).is_err() {
                return;
            }
        }
    })
}
