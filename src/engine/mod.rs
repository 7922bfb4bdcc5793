//! Engine - Component registry and parallel arrays.
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Box  (parent=None, direction=column, padding=1, ...)
//! Index 1: Text (parent=0,    content="Hello, John Doe!", ...)
//! Index 2: Box  (parent=0,    direction=row, ...)
//! ```
//!
//! Each array cell is a stable reactive slot, so a derived that reads index
//! `i` only re-runs when something bound to index `i` changes.

mod registry;
pub mod arrays;

pub use registry::*;
