//! Primitive types - Props and cleanup.
//!
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::types::{Attr, FlexDirection, Rgba};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

pub use crate::state::mouse::MouseCallback;

/// Keyboard callback. Return true to consume the event.
pub use crate::state::keyboard::KeyHandler as KeyCallback;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Binding keeps the reactive connection: a signal or getter prop is read
/// again by whichever derived depends on the slot.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    Static(T),
    Signal(Signal<T>),
    /// Called each time the value is needed.
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

/// Bind a PropValue to an array slot.
///
/// Static values are set directly; signals and getters are wrapped in a
/// getter so the slot stays reactive.
macro_rules! bind_prop {
    ($prop:expr, $index:expr, $set:path, $set_getter:path) => {
        match $prop {
            PropValue::Static(v) => $set($index, v),
            PropValue::Signal(s) => $set_getter($index, move || s.get()),
            PropValue::Getter(g) => $set_getter($index, move || g()),
        }
    };
}
pub(crate) use bind_prop;

// =============================================================================
// Box Props
// =============================================================================

/// Properties for the Box component.
///
/// # Example
///
/// ```ignore
/// use spark_hello::primitives::{box_primitive, BoxProps};
///
/// let cleanup = box_primitive(BoxProps {
///     flex_direction: Some(FlexDirection::Row.into()),
///     gap: Some(1.into()),
///     children: Some(Box::new(|| {
///         // Child components here
///     })),
///     ..Default::default()
/// });
/// ```
#[derive(Default)]
pub struct BoxProps {
    /// Optional component ID for lookup.
    pub id: Option<String>,

    /// Column (default) or row.
    pub flex_direction: Option<PropValue<FlexDirection>>,
    /// Gap between children.
    pub gap: Option<PropValue<u16>>,
    /// Padding on all four sides.
    pub padding: Option<PropValue<u16>>,

    /// Foreground color, inherited by descendant text.
    pub fg: Option<PropValue<Rgba>>,

    /// Whether the component can receive focus. A focusable box also takes
    /// focus when clicked.
    pub focusable: Option<bool>,
    /// Fires on mouse up if the press was on the same component.
    pub on_click: Option<MouseCallback>,
    /// Keyboard callback while focused.
    pub on_key: Option<KeyCallback>,

    /// Child render function, run with this box as the current parent.
    pub children: Option<Box<dyn FnOnce()>>,
}

// =============================================================================
// Text Props
// =============================================================================

/// Properties for the Text component.
///
/// # Example
///
/// ```ignore
/// use spark_hello::primitives::{text, PropValue, TextProps};
///
/// let count = spark_signals::signal(0u64);
/// let shown = count.clone();
/// text(TextProps {
///     content: PropValue::getter(move || format!("Count: {}", shown.get())),
///     attrs: Some(Attr::BOLD.into()),
///     ..Default::default()
/// });
/// ```
#[derive(Default)]
pub struct TextProps {
    pub id: Option<String>,
    /// Text to display.
    pub content: PropValue<String>,
    /// Foreground color (default: inherited).
    pub fg: Option<PropValue<Rgba>>,
    pub attrs: Option<PropValue<Attr>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    #[test]
    fn test_prop_value_get() {
        let s = signal(3u16);
        let from_signal: PropValue<u16> = s.clone().into();
        let from_getter = PropValue::getter(move || s.get() * 2);
        let fixed: PropValue<u16> = 7.into();

        assert_eq!(from_signal.get(), 3);
        assert_eq!(from_getter.get(), 6);
        assert_eq!(fixed.get(), 7);
    }

    #[test]
    fn test_conversions() {
        let text: PropValue<String> = "hi".into();
        assert_eq!(text.get(), "hi");

        let direction: PropValue<FlexDirection> = FlexDirection::Row.into();
        assert_eq!(direction.get(), FlexDirection::Row);
    }
}
