//! Terminal renderer - the output layer.
//!
//! The renderer knows only about cells. It takes a filled `FrameBuffer`
//! and writes ANSI sequences; components, layout and reactivity are not
//! its concern.
//!
//! ```text
//! components → arrays → layout derived → frame buffer derived
//!                                               │
//!                                               ▼
//!                                          FrameBuffer
//!                                               │
//!                                 DiffRenderer / InlineRenderer
//!                                               │
//!                                               ▼
//!                                            terminal
//! ```
//!
//! # Rendering Modes
//!
//! - **Fullscreen** ([`DiffRenderer`]): alternate screen, only changed
//!   cells are written
//! - **Inline** ([`InlineRenderer`]): normal screen, the frame is erased
//!   and redrawn below the cursor
//!
//! # Example
//!
//! ```no_run
//! use spark_hello::renderer::{DiffRenderer, FrameBuffer};
//! use spark_hello::types::{Attr, Rgba};
//!
//! let mut buffer = FrameBuffer::new(40, 3);
//! buffer.draw_text(1, 1, "Hello, John Doe!", Rgba::WHITE, Attr::NONE, None);
//!
//! let mut renderer = DiffRenderer::new();
//! renderer.enter_fullscreen()?;
//! renderer.render(&buffer)?;
//! renderer.exit_fullscreen()?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod ansi;
pub mod buffer;
pub mod diff;
pub mod inline;
pub mod output;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use inline::InlineRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
