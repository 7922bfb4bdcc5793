//! Reactive Pipeline
//!
//! Connects the component arrays to terminal output.
//!
//! ```text
//! Component Tree → Arrays → layoutDerived → frameBufferDerived → render effect
//! ```
//!
//! 1. **layoutDerived** - Reads layout/text slots, calls Taffy, returns ComputedLayout
//! 2. **frameBufferDerived** - Reads layout + visual arrays, fills a FrameBuffer
//! 3. **render effect** - Refreshes the hit grid and calls the renderer
//!
//! The deriveds are pure. Only the render effect mutates state (hit grid,
//! terminal I/O).

pub mod frame_buffer_derived;
pub mod layout_derived;
pub mod mount;
pub mod terminal;

pub use frame_buffer_derived::{create_frame_buffer_derived, FrameBufferResult, HitRegion};
pub use layout_derived::create_layout_derived;
pub use mount::{mount, mount_headless, render_to_string, HeadlessMount, MountHandle, MountOptions};
pub use terminal::{
    detect_terminal_size, render_mode, set_render_mode, set_terminal_size, terminal_height, terminal_width,
    RenderMode,
};
