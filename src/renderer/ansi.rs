//! ANSI escape sequences for terminal control.
//!
//! Writers for every sequence the renderers emit: cursor movement, screen
//! control, synchronized output, foreground color and text attributes. Each takes any
//! `Write` so the same code targets `OutputBuffer`, stdout, or a test `Vec`.

use std::io::{Result, Write};

use crate::types::{Attr, Rgba};

// =============================================================================
// Cursor
// =============================================================================

/// Move cursor to absolute position (0-indexed in, 1-indexed on the wire).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> Result<()> {
    write!(w, "\x1b[{};{}H", y as u32 + 1, x as u32 + 1)
}

#[inline]
pub fn cursor_up<W: Write>(w: &mut W, n: u16) -> Result<()> {
    if n > 0 { write!(w, "\x1b[{}A", n) } else { Ok(()) }
}

#[inline]
pub fn cursor_column_zero<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[G")
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[?25l")
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Screen Control
// =============================================================================

/// Clear from cursor to end of screen.
#[inline]
pub fn erase_down<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[J")
}

/// Clear screen and scrollback, cursor home.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[2J\x1b[3J\x1b[H")
}

#[inline]
pub fn enter_alt_screen<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[?1049h")
}

#[inline]
pub fn exit_alt_screen<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[?1049l")
}

/// Begin synchronized output (terminal buffers until `end_sync`).
#[inline]
pub fn begin_sync<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[?2026h")
}

#[inline]
pub fn end_sync<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[?2026l")
}

// =============================================================================
// Colors
// =============================================================================

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> Result<()> {
    write!(w, "\x1b[0m")
}

/// Set the foreground: terminal default or truecolor.
pub fn fg<W: Write>(w: &mut W, color: Rgba) -> Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[39m")
    } else {
        write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

// =============================================================================
// Text Attributes
// =============================================================================

/// Set text attributes as one SGR sequence. Empty attrs write nothing.
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> Result<()> {
    const CODES: [(Attr, u8); 4] = [(Attr::BOLD, 1), (Attr::DIM, 2), (Attr::UNDERLINE, 4), (Attr::INVERSE, 7)];

    let codes: Vec<String> = CODES
        .iter()
        .filter(|(flag, _)| attr.contains(*flag))
        .map(|(_, code)| code.to_string())
        .collect();
    if codes.is_empty() {
        return Ok(());
    }
    write!(w, "\x1b[{}m", codes.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_cursor_to() {
        assert_eq!(to_string(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(to_string(|w| cursor_to(w, 5, 10)), "\x1b[11;6H");
    }

    #[test]
    fn test_cursor_up_zero_is_noop() {
        assert_eq!(to_string(|w| cursor_up(w, 0)), "");
        assert_eq!(to_string(|w| cursor_up(w, 3)), "\x1b[3A");
    }

    #[test]
    fn test_screen_control() {
        assert_eq!(to_string(enter_alt_screen), "\x1b[?1049h");
        assert_eq!(to_string(exit_alt_screen), "\x1b[?1049l");
        assert_eq!(to_string(begin_sync), "\x1b[?2026h");
    }

    #[test]
    fn test_colors() {
        assert_eq!(to_string(|w| fg(w, Rgba::TERMINAL_DEFAULT)), "\x1b[39m");
        assert_eq!(to_string(|w| fg(w, Rgba::rgb(1, 2, 3))), "\x1b[38;2;1;2;3m");
    }

    #[test]
    fn test_attrs() {
        assert_eq!(to_string(|w| attrs(w, Attr::NONE)), "");
        assert_eq!(to_string(|w| attrs(w, Attr::BOLD | Attr::UNDERLINE)), "\x1b[1;4m");
        assert_eq!(to_string(|w| attrs(w, Attr::BOLD | Attr::DIM | Attr::INVERSE)), "\x1b[1;2;7m");
    }
}
