//! State Module - Runtime state management systems
//!
//! The reactive state systems behind interactivity:
//!
//! - **Focus** - Focused index signal, Tab cycling
//! - **Keyboard** - Event types, dispatch chain, handler registry
//! - **Mouse** - HitGrid, hover/press tracking, click bubbling
//! - **Global keys** - Ctrl+C and Tab bindings installed by mount
//! - **Input** - crossterm conversion, polling and routing

pub mod focus;
pub mod global_keys;
pub mod input;
pub mod keyboard;
pub mod mouse;
