//! Counter - a component owning one integer.
//!
//! The count lives in a private signal. The label is a getter over it, so
//! an increment re-runs layout and paint before the next frame without
//! the component asking for a render.
//!
//! The trigger shows its interaction state through text attributes:
//! inverse while focused, underlined while hovered, dim while pressed.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::engine::arrays::interaction;
use crate::engine::get_current_parent_index;
use crate::primitives::{box_primitive, text, BoxProps, Cleanup, PropValue, TextProps};
use crate::state::focus;
use crate::state::keyboard::KeyboardEvent;
use crate::types::{Attr, FlexDirection, Rgba};

/// Label of the trigger element.
pub const TRIGGER_LABEL: &str = "[ + ]";

/// Display text for a count.
pub fn counter_label(count: u64) -> String {
    format!("Count: {count}")
}

/// Shared count state.
///
/// `signal` drives the view; `value` mirrors it so a write can compute the
/// next value without subscribing the running effect or derived to the
/// count.
#[derive(Clone)]
struct Count {
    value: Rc<Cell<u64>>,
    signal: Signal<u64>,
}

impl Count {
    fn new() -> Self {
        Self { value: Rc::new(Cell::new(0)), signal: signal(0) }
    }

    /// Tracked read.
    fn get(&self) -> u64 {
        self.signal.get()
    }

    fn set(&self, value: u64) {
        self.value.set(value);
        self.signal.set(value);
    }

    fn increment(&self) {
        let next = self.value.get().saturating_add(1);
        tracing::debug!(count = next, "counter incremented");
        self.set(next);
    }
}

/// A counter starting at 0.
///
/// Not `Clone`: each `Counter` owns its state, and two counters never
/// share a count.
pub struct Counter {
    count: Count,
}

impl Counter {
    pub fn new() -> Self {
        Self { count: Count::new() }
    }

    /// Add one. Saturates at `u64::MAX`.
    ///
    /// Does not read the count reactively, so calling it from inside an
    /// effect or event handler never subscribes the caller to the counter.
    pub fn increment(&self) {
        self.count.increment();
    }

    /// Current count.
    ///
    /// Tracked: a derived or effect that calls this re-runs on the next
    /// increment.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// `"Count: N"` for the current count. Tracked like [`Counter::count`].
    pub fn label(&self) -> String {
        counter_label(self.count())
    }

    /// A detached callback that increments this counter.
    ///
    /// Holds its own handle to the count, so it can outlive the borrow of
    /// `self`. Global key bindings use it.
    pub fn incrementer(&self) -> impl Fn() + 'static {
        let count = self.count.clone();
        move || count.increment()
    }

    /// Mount the counter under the current parent: the label, then the
    /// `[ + ]` trigger, in a row. Returns the cleanup that unmounts both.
    pub fn render(&self) -> Cleanup {
        counter_view(self.count.clone())
    }

    /// Deferred [`Counter::render`], for a parent's children closure,
    /// which must be `'static` and so cannot borrow the counter.
    pub(crate) fn view(&self) -> impl FnOnce() -> Cleanup + 'static {
        let count = self.count.clone();
        move || counter_view(count)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

/// Row: `Count: N` label, then the focusable trigger.
fn counter_view(count: Count) -> Cleanup {
    box_primitive(BoxProps {
        flex_direction: Some(FlexDirection::Row.into()),
        gap: Some(1.into()),
        children: Some(Box::new(move || {
            let shown = count.clone();
            text(TextProps {
                content: PropValue::getter(move || counter_label(shown.get())),
                ..Default::default()
            });

            let clicked = count.clone();
            box_primitive(BoxProps {
                fg: Some(Rgba::GREEN.into()),
                focusable: Some(true),
                on_click: Some(Rc::new(move |_| clicked.increment())),
                on_key: Some(Rc::new(move |event: &KeyboardEvent| {
                    if event.is_activation() {
                        count.increment();
                        return true;
                    }
                    false
                })),
                children: Some(Box::new(trigger_label)),
                ..Default::default()
            });
        })),
        ..Default::default()
    })
}

/// Attributes of the trigger text for the trigger box's current state.
fn trigger_attrs(trigger: usize) -> Attr {
    let mut attrs = Attr::BOLD;
    if focus::is_focused(trigger) {
        attrs |= Attr::INVERSE;
    }
    if interaction::get_hovered(trigger) {
        attrs |= Attr::UNDERLINE;
    }
    if interaction::get_pressed(trigger) {
        attrs |= Attr::DIM;
    }
    attrs
}

/// Trigger text, styled from its box's focus, hover and press state.
fn trigger_label() {
    let trigger = get_current_parent_index();
    text(TextProps {
        content: TRIGGER_LABEL.into(),
        attrs: Some(PropValue::getter(move || trigger.map_or(Attr::BOLD, trigger_attrs))),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;

    use crate::engine::{allocate_index, reset_registry};
    use crate::pipeline::render_to_string;

    #[test]
    fn test_counter_label() {
        assert_eq!(counter_label(0), "Count: 0");
        assert_eq!(counter_label(42), "Count: 42");
    }

    #[test]
    fn test_increment() {
        let counter = Counter::new();
        assert_eq!(counter.count(), 0);
        counter.increment();
        counter.increment();
        assert_eq!(counter.count(), 2);
        assert_eq!(counter.label(), "Count: 2");
    }

    #[test]
    fn test_increment_saturates() {
        let counter = Counter::new();
        counter.count.set(u64::MAX);
        counter.increment();
        assert_eq!(counter.count(), u64::MAX);
    }

    #[test]
    fn test_increment_inside_effect_does_not_subscribe() {
        let counter = Counter::new();
        let inc = counter.incrementer();
        let runs = Rc::new(Cell::new(0));
        let seen = runs.clone();
        let stop = effect(move || {
            seen.set(seen.get() + 1);
            inc();
        });

        assert_eq!((runs.get(), counter.count()), (1, 1));
        counter.increment();
        assert_eq!((runs.get(), counter.count()), (1, 2));
        stop();
    }

    #[test]
    fn test_count_is_tracked() {
        let counter = Counter::new();
        let inc = counter.incrementer();
        let shown = Rc::new(Cell::new(None));
        let seen = shown.clone();
        let count = counter.count.clone();
        let stop = effect(move || seen.set(Some(counter_label(count.get()))));

        inc();
        assert_eq!(shown.take().as_deref(), Some("Count: 1"));
        stop();
    }

    #[test]
    fn test_trigger_attrs_follow_interaction_state() {
        reset_registry();
        let trigger = allocate_index(None);
        interaction::set_focusable(trigger, true);
        assert_eq!(trigger_attrs(trigger), Attr::BOLD);

        interaction::set_hovered(trigger, true);
        interaction::set_pressed(trigger, true);
        assert_eq!(trigger_attrs(trigger), Attr::BOLD | Attr::UNDERLINE | Attr::DIM);

        focus::focus(trigger);
        interaction::set_hovered(trigger, false);
        interaction::set_pressed(trigger, false);
        assert_eq!(trigger_attrs(trigger), Attr::BOLD | Attr::INVERSE);
        focus::blur();
    }

    #[test]
    fn test_incrementer_shares_state() {
        let counter = Counter::new();
        let inc = counter.incrementer();
        inc();
        inc();
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_counters_are_independent() {
        let a = Counter::new();
        let b = Counter::default();
        a.increment();
        assert_eq!((a.count(), b.count()), (1, 0));
    }

    #[test]
    fn test_render_shows_label_and_trigger() {
        reset_registry();
        let counter = Counter::new();
        counter.increment();
        let out = render_to_string(|| counter.render(), 30, 3);
        assert_eq!(out, "Count: 1 [ + ]");
    }
}
