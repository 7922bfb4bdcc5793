//! Focus System - Keyboard navigation and focus state
//!
//! - `focused_index` signal (currently focused component)
//! - Focus cycling (Tab/Shift+Tab) in allocation order
//!
//! # Example
//!
//! ```ignore
//! use spark_hello::state::focus;
//!
//! focus::focus_next();
//! focus::focus(component_index);
//! focus::blur();
//! ```

use spark_signals::{signal, Signal};

use crate::engine::arrays::interaction;
use crate::engine::get_allocated_indices;

// =============================================================================
// FOCUSED INDEX SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_INDEX: Signal<Option<usize>> = signal(None);
}

/// Currently focused component (reactive).
pub fn get_focused_index() -> Option<usize> {
    FOCUSED_INDEX.with(|s| s.get())
}

pub fn is_focused(index: usize) -> bool {
    get_focused_index() == Some(index)
}

fn set_focused(index: Option<usize>) {
    let previous = get_focused_index();
    if previous == index {
        return;
    }
    tracing::debug!(?previous, current = ?index, "focus changed");
    FOCUSED_INDEX.with(|s| s.set(index));
}

// =============================================================================
// FOCUSABLE QUERIES
// =============================================================================

/// Focusable components in allocation order, which is also paint order.
pub fn get_focusable_indices() -> Vec<usize> {
    get_allocated_indices()
        .into_iter()
        .filter(|&i| interaction::get_focusable(i))
        .collect()
}

// =============================================================================
// FOCUS NAVIGATION
// =============================================================================

fn find_next_focusable(from: Option<usize>, forward: bool) -> Option<usize> {
    let focusables = get_focusable_indices();
    if focusables.is_empty() {
        return None;
    }

    let len = focusables.len();
    let position = from.and_then(|idx| focusables.iter().position(|&i| i == idx));
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(pos), true) => (pos + 1) % len,
        (Some(pos), false) => (pos + len - 1) % len,
    };
    Some(focusables[next])
}

/// Move focus to the next focusable component, wrapping around.
pub fn focus_next() -> bool {
    move_focus(true)
}

/// Move focus to the previous focusable component, wrapping around.
pub fn focus_previous() -> bool {
    move_focus(false)
}

fn move_focus(forward: bool) -> bool {
    let current = get_focused_index();
    match find_next_focusable(current, forward) {
        Some(next) if Some(next) != current => {
            set_focused(Some(next));
            true
        }
        _ => false,
    }
}

/// Focus a specific component. Fails for non-focusable ones.
pub fn focus(index: usize) -> bool {
    if interaction::get_focusable(index) {
        set_focused(Some(index));
        return true;
    }
    false
}

/// Clear focus (no component focused)
pub fn blur() {
    set_focused(None);
}

/// Drop focus from a component being released.
pub fn cleanup_index(index: usize) {
    if is_focused(index) {
        blur();
    }
}

/// Reset all focus state (for testing)
pub fn reset_focus_state() {
    FOCUSED_INDEX.with(|s| s.set(None));
}
