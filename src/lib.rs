//! # spark-hello
//!
//! A greeting and a counter on a reactive terminal UI runtime.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Components are indices into columnar arrays rather than objects. Each
//! array cell is a reactive slot bound to a signal, a getter, or a static
//! value. Rendering is purely derived:
//!
//! ```text
//! Component Tree → Arrays → layoutDerived → frameBufferDerived → render effect
//! ```
//!
//! An `increment()` writes a signal; the label slot reading it invalidates
//! layout and frame buffer, and the render effect writes the diff.
//!
//! ## Modules
//!
//! - [`components`] - Greeting, Counter and the App host
//! - [`primitives`] - box and text building blocks
//! - [`engine`] - Component registry and parallel arrays
//! - [`layout`] - Taffy flexbox bridge and text measurement
//! - [`renderer`] - Frame buffer and ANSI output
//! - [`pipeline`] - Reactive deriveds, mount and render effect
//! - [`state`] - Mouse, keyboard, focus and input routing
//!
//! ## Example
//!
//! ```
//! use spark_hello::components::App;
//! use spark_hello::pipeline::render_to_string;
//!
//! let app = App::new();
//! let frame = render_to_string(|| app.render(), 40, 10);
//! assert!(frame.contains("Hello, John Doe!"));
//! assert!(frame.contains("Count: 0"));
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

pub use components::{counter_label, greeting, greeting_text, App, Counter, GreetingProps};
pub use config::{Cli, Config};
pub use error::{Error, Result};
pub use pipeline::{mount, mount_headless, render_to_string, MountHandle, MountOptions, RenderMode};
pub use primitives::{box_primitive, text, BoxProps, Cleanup, PropValue, TextProps};
