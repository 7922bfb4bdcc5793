//! Application components built from the primitives.
//!
//! - [`greeting`] - stateless `Hello, <name>!` line
//! - [`Counter`] - `Count: N` with a `[ + ]` trigger
//! - [`App`] - host container for one of each

mod app;
mod counter;
mod greeting;

pub use app::{App, DEFAULT_NAME};
pub use counter::{counter_label, Counter, TRIGGER_LABEL};
pub use greeting::{greeting, greeting_text, GreetingProps};
