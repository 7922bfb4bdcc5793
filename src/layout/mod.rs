//! Layout Module
//!
//! Flexbox layout for the terminal using [Taffy](https://github.com/DioxusLabs/taffy).
//!
//! The bridge:
//!
//! 1. Converts the layout arrays into Taffy styles
//! 2. Builds the Taffy tree from parent relationships
//! 3. Measures text nodes with `unicode-width`
//! 4. Extracts positions and sizes into `ComputedLayout`
//!
//! # Example
//!
//! ```ignore
//! use spark_hello::layout::compute_layout;
//! use spark_signals::derived;
//!
//! let layout = derived(|| compute_layout(80, 24, true));
//! ```

mod types;
mod text_measure;
mod taffy_bridge;

pub use types::*;
pub use text_measure::*;
pub use taffy_bridge::compute_layout;
