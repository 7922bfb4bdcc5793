//! Greeting - a stateless display component.

use crate::primitives::{text, Cleanup, TextProps};

/// Props for [`greeting`]. Taken as-is: empty, whitespace and non-ASCII
/// names are all rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GreetingProps {
    pub name: String,
}

impl GreetingProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The greeting line for `props`.
pub fn greeting_text(props: &GreetingProps) -> String {
    format!("Hello, {}!", props.name)
}

/// Mount the greeting under the current parent.
pub fn greeting(props: GreetingProps) -> Cleanup {
    text(TextProps {
        content: greeting_text(&props).into(),
        ..Default::default()
    })
}
