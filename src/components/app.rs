//! App - the host container.

use super::counter::Counter;
use super::greeting::{greeting, GreetingProps};
use crate::primitives::{box_primitive, BoxProps, Cleanup};

/// Name greeted by [`App::new`].
pub const DEFAULT_NAME: &str = "John Doe";

/// Root component: a greeting above a counter.
pub struct App {
    greeting: GreetingProps,
    counter: Counter,
}

impl App {
    pub fn new() -> Self {
        Self::with_name(DEFAULT_NAME)
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            greeting: GreetingProps::new(name),
            counter: Counter::new(),
        }
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn greeting_props(&self) -> &GreetingProps {
        &self.greeting
    }

    /// Mount the tree: a padded column with the greeting, then the counter.
    pub fn render(&self) -> Cleanup {
        let props = self.greeting.clone();
        let counter_view = self.counter.view();
        box_primitive(BoxProps {
            padding: Some(1.into()),
            gap: Some(1.into()),
            children: Some(Box::new(move || {
                greeting(props);
                counter_view();
            })),
            ..Default::default()
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
