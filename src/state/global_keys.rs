//! Global Keys Module - Global keyboard shortcuts
//!
//! - Ctrl+C: graceful shutdown
//! - Tab: focus next component
//! - Shift+Tab: focus previous component
//!
//! Registered on mount and cleaned up on unmount.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//! use spark_hello::state::global_keys;
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let handle = global_keys::setup_global_keys(running.clone());
//! handle.cleanup();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::focus;
use super::keyboard;

/// Cleanup handle for global key handlers
pub struct GlobalKeysHandle {
    cleanups: Vec<Box<dyn FnOnce()>>,
}

impl GlobalKeysHandle {
    /// Unregister all global key handlers.
    pub fn cleanup(self) {
        for cleanup in self.cleanups {
            cleanup();
        }
    }
}

/// Set up global key handlers. `running` is cleared on Ctrl+C.
pub fn setup_global_keys(running: Arc<AtomicBool>) -> GlobalKeysHandle {
    let ctrl_c = keyboard::on(move |event| {
        if event.modifiers.ctrl && event.key == "c" {
            tracing::info!("ctrl+c, stopping");
            running.store(false, Ordering::SeqCst);
            true
        } else {
            false
        }
    });

    let tab = keyboard::on(|event| {
        if event.key != "Tab" {
            return false;
        }
        if event.modifiers.shift {
            focus::focus_previous();
        } else {
            focus::focus_next();
        }
        true
    });

    GlobalKeysHandle {
        cleanups: vec![Box::new(ctrl_c), Box::new(tab)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arrays::interaction;
    use crate::engine::{allocate_index, reset_registry};
    use crate::state::keyboard::{KeyboardEvent, Modifiers};

    fn setup() {
        reset_registry();
        focus::reset_focus_state();
        keyboard::reset_keyboard_state();
    }

    #[test]
    fn test_ctrl_c_sets_running_false() {
        setup();
        let running = Arc::new(AtomicBool::new(true));
        let handle = setup_global_keys(running.clone());

        keyboard::dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
        assert!(!running.load(Ordering::SeqCst));
        handle.cleanup();
    }

    #[test]
    fn test_plain_c_keeps_running() {
        setup();
        let running = Arc::new(AtomicBool::new(true));
        let handle = setup_global_keys(running.clone());

        keyboard::dispatch(KeyboardEvent::new("c"));
        assert!(running.load(Ordering::SeqCst));
        handle.cleanup();
    }

    #[test]
    fn test_tab_and_shift_tab_cycle_focus() {
        setup();
        let a = allocate_index(None);
        let b = allocate_index(None);
        interaction::set_focusable(a, true);
        interaction::set_focusable(b, true);
        let handle = setup_global_keys(Arc::new(AtomicBool::new(true)));

        assert!(keyboard::dispatch(KeyboardEvent::new("Tab")));
        assert_eq!(focus::get_focused_index(), Some(a));
        keyboard::dispatch(KeyboardEvent::new("Tab"));
        assert_eq!(focus::get_focused_index(), Some(b));
        keyboard::dispatch(KeyboardEvent::with_modifiers("Tab", Modifiers::shift()));
        assert_eq!(focus::get_focused_index(), Some(a));
        handle.cleanup();
    }

    #[test]
    fn test_cleanup_unregisters() {
        setup();
        let running = Arc::new(AtomicBool::new(true));
        setup_global_keys(running.clone()).cleanup();

        keyboard::dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
        assert!(running.load(Ordering::SeqCst));
    }
}
