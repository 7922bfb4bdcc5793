//! Keyboard Module - Key events and the binding table they dispatch to.
//!
//! Does NOT own stdin (that is the input module).
//!
//! Bindings come in three scopes, tried in this order:
//!
//! 1. the focused component (`on_focused`)
//! 2. one unmodified key (`on_key`)
//! 3. every event (`on`)
//!
//! The first handler returning `true` consumes the event. Release events
//! never reach handlers.
//!
//! # Example
//!
//! ```ignore
//! use spark_hello::state::keyboard;
//!
//! let cleanup = keyboard::on_key("+", || {
//!     counter.increment();
//!     true
//! });
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::focus;

// =============================================================================
// Events
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    /// Ctrl or Alt held, so the key is a chord rather than plain input.
    fn is_chord(&self) -> bool {
        self.ctrl || self.alt
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// Key name: a character (`"a"`, `" "`) or a named key (`"Enter"`, `"Tab"`).
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A plain key press.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::default())
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self { key: key.into(), modifiers, state: KeyState::Press }
    }

    /// Enter or Space without a chord modifier.
    pub fn is_activation(&self) -> bool {
        !self.modifiers.is_chord() && (self.key == "Enter" || self.key == " ")
    }
}

/// Return true to consume the event.
pub type KeyHandler = Rc<dyn Fn(&KeyboardEvent) -> bool>;

// =============================================================================
// Bindings
// =============================================================================

enum Scope {
    Focused(usize),
    Key(String),
    Any,
}

impl Scope {
    /// Position in the dispatch chain, `None` when the scope does not apply.
    fn rank(&self, event: &KeyboardEvent, focused: Option<usize>) -> Option<u8> {
        match self {
            Scope::Focused(index) => (focused == Some(*index)).then_some(0),
            Scope::Key(key) => (*key == event.key && !event.modifiers.is_chord()).then_some(1),
            Scope::Any => Some(2),
        }
    }
}

struct Binding {
    id: u64,
    scope: Scope,
    handler: KeyHandler,
}

#[derive(Default)]
struct Bindings {
    entries: Vec<Binding>,
    next_id: u64,
}

thread_local! {
    static BINDINGS: RefCell<Bindings> = RefCell::new(Bindings::default());
}

fn bind(scope: Scope, handler: KeyHandler) -> impl FnOnce() {
    let id = BINDINGS.with(|b| {
        let mut b = b.borrow_mut();
        let id = b.next_id;
        b.next_id += 1;
        b.entries.push(Binding { id, scope, handler });
        id
    });

    move || BINDINGS.with(|b| b.borrow_mut().entries.retain(|binding| binding.id != id))
}

/// Handlers that apply to `event`, in dispatch order.
fn matching(event: &KeyboardEvent) -> Vec<KeyHandler> {
    let focused = focus::get_focused_index();
    let mut ranked: Vec<(u8, KeyHandler)> = BINDINGS.with(|b| {
        b.borrow()
            .entries
            .iter()
            .filter_map(|binding| Some((binding.scope.rank(event, focused)?, binding.handler.clone())))
            .collect()
    });
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, handler)| handler).collect()
}

// =============================================================================
// Public API
// =============================================================================

/// Route a key event through the binding chain. Returns true if consumed.
pub fn dispatch(event: KeyboardEvent) -> bool {
    if event.state == KeyState::Release {
        return false;
    }
    // Handlers run with the table unborrowed so they may bind or unbind.
    let consumed = matching(&event).iter().any(|handler| handler(&event));
    tracing::trace!(key = %event.key, consumed, "key dispatched");
    consumed
}

/// Handle every key event. Returns the cleanup that unbinds it.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    bind(Scope::Any, Rc::new(handler))
}

/// Handle one key pressed without Ctrl or Alt.
pub fn on_key<F>(key: &str, handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + 'static,
{
    bind(Scope::Key(key.to_string()), Rc::new(move |_: &KeyboardEvent| handler()))
}

/// Handle key events while component `index` has focus.
pub fn on_focused<F>(index: usize, handler: F) -> impl FnOnce()
where
    F: Fn(&KeyboardEvent) -> bool + 'static,
{
    bind(Scope::Focused(index), Rc::new(handler))
}

pub fn reset_keyboard_state() {
    BINDINGS.with(|b| *b.borrow_mut() = Bindings::default());
}
