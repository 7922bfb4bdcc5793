//! Layout Derived - Reactive layout computation.
//!
//! Re-computes layout whenever:
//! - Terminal size changes
//! - Render mode changes
//! - Any layout or text slot read by the bridge changes
//! - Components are added or removed

use spark_signals::{derived, Derived};

use crate::layout::{compute_layout, ComputedLayout};
use super::terminal::{render_mode, terminal_height, terminal_width, RenderMode};

/// Create the layout derived.
pub fn create_layout_derived() -> Derived<ComputedLayout, impl Fn() -> ComputedLayout> {
    derived(|| {
        let tw = terminal_width();
        let th = terminal_height();

        // Inline frames grow with content instead of filling the screen.
        let constrain_height = render_mode() == RenderMode::Fullscreen;

        compute_layout(tw, th, constrain_height)
    })
}
