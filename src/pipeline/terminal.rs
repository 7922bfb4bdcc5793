//! Terminal state signals.
//!
//! Terminal dimensions and render mode are the root signals of the whole
//! pipeline: changing any of them re-runs layout and the frame buffer.
//! Raw mode lives here too, behind a guard that restores on drop.

use std::io;

use spark_signals::{signal, Signal};

// =============================================================================
// Terminal Size Signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: Signal<u16> = signal(80);
    static TERMINAL_HEIGHT: Signal<u16> = signal(24);
    static RENDER_MODE: Signal<RenderMode> = signal(RenderMode::Fullscreen);
}

/// Current terminal width (reactive).
pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|w| w.get())
}

/// Current terminal height (reactive).
pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|h| h.get())
}

/// Set the terminal size (startup, resize events, headless renders).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|w| {
        if w.get() != width {
            w.set(width);
        }
    });
    TERMINAL_HEIGHT.with(|h| {
        if h.get() != height {
            h.set(height);
        }
    });
}

/// Query the real terminal and store its size. Returns what was stored.
pub fn detect_terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((width, height)) if width > 0 && height > 0 => {
            set_terminal_size(width, height);
            (width, height)
        }
        Ok(_) | Err(_) => {
            tracing::debug!("terminal size unavailable, keeping current size");
            (terminal_width(), terminal_height())
        }
    }
}

// =============================================================================
// Render Mode
// =============================================================================

/// How frames reach the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Alternate screen, differential rendering.
    #[default]
    Fullscreen,
    /// Normal screen below the cursor, full redraw per frame.
    Inline,
}

pub fn render_mode() -> RenderMode {
    RENDER_MODE.with(|m| m.get())
}

pub fn set_render_mode(mode: RenderMode) {
    RENDER_MODE.with(|m| m.set(mode));
}

// =============================================================================
// Raw Mode
// =============================================================================

/// Raw mode plus mouse capture for the lifetime of the guard.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enter raw mode and enable mouse capture.
    pub fn enter() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        crate::state::input::enable_mouse()?;
        Ok(Self { active: true })
    }

    /// Leave raw mode. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        crate::state::input::disable_mouse()?;
        crossterm::terminal::disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}
