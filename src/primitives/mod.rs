//! TUI Primitives - Component building blocks.
//!
//! - [`box_primitive`] - Flexbox container that can take focus and clicks
//! - [`text`] - Text display with styling
//!
//! # Architecture
//!
//! Components are indices into parallel arrays. Each primitive:
//! 1. Allocates an index from the registry
//! 2. Binds props directly to array slots (preserving reactivity)
//! 3. Returns a cleanup function that releases the index
//!
//! Pass signals or getters as props rather than their current value:
//!
//! ```ignore
//! // Stays connected
//! box_primitive(BoxProps { gap: Some(PropValue::Signal(gap)), ..Default::default() });
//!
//! // Frozen at the value read here
//! box_primitive(BoxProps { gap: Some(PropValue::Static(gap.get())), ..Default::default() });
//! ```

mod box_primitive;
mod text;
mod types;

pub use box_primitive::box_primitive;
pub use text::text;
pub use types::*;
