//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the mouse and keyboard modules.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use spark_hello::state::input::{poll_event, route_event};
//!
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
    KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers, MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::execute;

use super::keyboard::{self, KeyState, KeyboardEvent, Modifiers};
use super::mouse::{self, MouseAction, MouseButton, MouseEvent};
use crate::pipeline::terminal::set_terminal_size;

/// Unified event type for the framework
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Key(KeyboardEvent),
    /// New terminal size (width, height)
    Resize(u16, u16),
    /// Anything we don't handle (focus, paste, scroll)
    None,
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse).map_or(InputEvent::None, InputEvent::Mouse),
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Convert a crossterm mouse event. Scroll events have no counterpart.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> Option<MouseEvent> {
    let (action, button) = match event.kind {
        MouseEventKind::Down(btn) => (MouseAction::Down, convert_mouse_button(btn)),
        MouseEventKind::Up(btn) => (MouseAction::Up, convert_mouse_button(btn)),
        MouseEventKind::Drag(btn) => (MouseAction::Move, convert_mouse_button(btn)),
        MouseEventKind::Moved => (MouseAction::Move, MouseButton::None),
        _ => return None,
    };

    Some(MouseEvent::new(action, button, event.column, event.row))
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert a crossterm key event. Back-tab becomes Tab with shift.
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let mut modifiers = convert_modifiers(event.modifiers);
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => {
            modifiers.shift = true;
            "Tab".to_string()
        }
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent { key, modifiers, state }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::META),
    }
}

// =============================================================================
// POLLING AND ROUTING
// =============================================================================

/// Poll for an event. `None` if nothing arrived within `timeout`.
pub fn poll_event(timeout: Duration) -> io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(convert_event(read()?)))
    } else {
        Ok(None)
    }
}

/// Route an event to its handlers. Returns true if consumed.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Mouse(event) => mouse::dispatch(event),
        InputEvent::Key(event) => keyboard::dispatch(event),
        InputEvent::Resize(w, h) => {
            tracing::debug!(width = w, height = h, "terminal resized");
            set_terminal_size(w, h);
            false
        }
        InputEvent::None => false,
    }
}

pub fn enable_mouse() -> io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

pub fn disable_mouse() -> io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    use crate::pipeline::terminal::{terminal_height, terminal_width};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_char_and_named_keys() {
        assert_eq!(convert_key_event(key(KeyCode::Char('+'), KeyModifiers::NONE)).key, "+");
        assert_eq!(convert_key_event(key(KeyCode::Enter, KeyModifiers::NONE)).key, "Enter");
        assert_eq!(convert_key_event(key(KeyCode::Esc, KeyModifiers::NONE)).key, "Escape");
        assert_eq!(convert_key_event(key(KeyCode::Char(' '), KeyModifiers::NONE)).key, " ");
    }

    #[test]
    fn test_convert_ctrl_c() {
        let event = convert_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(event, KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
    }

    #[test]
    fn test_back_tab_is_shift_tab() {
        let event = convert_key_event(key(KeyCode::BackTab, KeyModifiers::NONE));
        assert_eq!(event.key, "Tab");
        assert!(event.modifiers.shift);
    }

    #[test]
    fn test_convert_mouse() {
        let event = convert_mouse_event(CrosstermMouseEvent {
            kind: MouseEventKind::Down(CrosstermMouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(event, Some(MouseEvent::down(MouseButton::Left, 4, 2)));

        let scroll = convert_mouse_event(CrosstermMouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(scroll, None);
    }

    #[test]
    fn test_resize_updates_terminal_size() {
        assert!(!route_event(convert_event(CrosstermEvent::Resize(100, 30))));
        assert_eq!((terminal_width(), terminal_height()), (100, 30));
    }
}
