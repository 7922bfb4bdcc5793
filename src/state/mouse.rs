//! Mouse Module - Hit testing, pointer state and click handlers.
//!
//! The hit grid maps every terminal cell to the component painted there.
//! The render effect refills it each frame from the frame buffer's hit
//! regions; `dispatch` reads it to find the target of an event.
//!
//! Hover and press are mirrored into the interaction arrays so styles can
//! react to them. Like a pointer over nested boxes, the flags cover the hit
//! component and every ancestor.
//!
//! A click is a press and release on the same component with the same
//! button, and bubbles up the parent chain.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_hello::state::mouse;
//!
//! let cleanup = mouse::on_click(index, Rc::new(|event| {
//!     tracing::info!(x = event.x, y = event.y, "clicked");
//! }));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::engine::arrays::{core, interaction};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    /// Pointer moved, with or without a button held.
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Mouse event
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    /// X coordinate (0-indexed)
    pub x: u16,
    /// Y coordinate (0-indexed)
    pub y: u16,
    /// Component under the cursor, filled by dispatch.
    pub component_index: Option<usize>,
}

impl MouseEvent {
    pub fn new(action: MouseAction, button: MouseButton, x: u16, y: u16) -> Self {
        Self { action, button, x, y, component_index: None }
    }

    pub fn down(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Down, button, x, y)
    }

    pub fn up(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Up, button, x, y)
    }

    pub fn move_to(x: u16, y: u16) -> Self {
        Self::new(MouseAction::Move, MouseButton::None, x, y)
    }
}

// =============================================================================
// HIT GRID
// =============================================================================

const EMPTY: usize = usize::MAX;

/// Cell-to-component lookup for mouse hit detection.
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<usize>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, EMPTY);
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Fill a rectangle, clipped to the grid. Later fills win.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, index: usize) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for cy in y..y_end {
            let row = cy as usize * self.width as usize;
            for cx in x..x_end {
                self.cells[row + cx as usize] = index;
            }
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        match self.cells.get(y as usize * self.width as usize + x as usize) {
            Some(&EMPTY) | None => None,
            Some(&index) => Some(index),
        }
    }
}

thread_local! {
    static HIT_GRID: RefCell<HitGrid> = RefCell::new(HitGrid::new(80, 24));
}

pub fn resize_hit_grid(width: u16, height: u16) {
    HIT_GRID.with(|g| g.borrow_mut().resize(width, height));
}

pub fn clear_hit_grid() {
    HIT_GRID.with(|g| g.borrow_mut().clear());
}

pub fn fill_hit_rect(x: u16, y: u16, width: u16, height: u16, index: usize) {
    HIT_GRID.with(|g| g.borrow_mut().fill_rect(x, y, width, height, index));
}

/// Component at a screen position.
pub fn hit_test(x: u16, y: u16) -> Option<usize> {
    HIT_GRID.with(|g| g.borrow().get(x, y))
}

pub fn hit_grid_size() -> (u16, u16) {
    HIT_GRID.with(|g| {
        let grid = g.borrow();
        (grid.width(), grid.height())
    })
}

// =============================================================================
// POINTER STATE
// =============================================================================

pub type MouseCallback = Rc<dyn Fn(&MouseEvent)>;

#[derive(Default)]
struct Pointer {
    hovered: Option<usize>,
    /// Component and button of the press still waiting for its release.
    pressed: Option<(usize, MouseButton)>,
    click_handlers: HashMap<usize, MouseCallback>,
}

thread_local! {
    static POINTER: RefCell<Pointer> = RefCell::new(Pointer::default());
}

fn with_pointer<R>(f: impl FnOnce(&mut Pointer) -> R) -> R {
    POINTER.with(|p| f(&mut p.borrow_mut()))
}

pub fn hovered_component() -> Option<usize> {
    with_pointer(|p| p.hovered)
}

pub fn pressed_component() -> Option<usize> {
    with_pointer(|p| p.pressed.map(|(index, _)| index))
}

/// Call `handler` when component `index` is clicked. Returns the cleanup
/// that removes it.
pub fn on_click(index: usize, handler: MouseCallback) -> impl FnOnce() {
    with_pointer(|p| p.click_handlers.insert(index, handler));
    move || {
        with_pointer(|p| p.click_handlers.remove(&index));
    }
}

/// Drop a released component's handler. A hover or press it held passes
/// to its parent, which still owns the flags above it.
pub fn cleanup_index(index: usize) {
    let parent = core::get_parent_index(index);
    with_pointer(|p| {
        p.click_handlers.remove(&index);
        if p.hovered == Some(index) {
            p.hovered = parent;
        }
        if let Some((pressed, button)) = p.pressed {
            if pressed == index {
                p.pressed = parent.map(|parent| (parent, button));
            }
        }
    });
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Dispatch a mouse event. Returns true if a click handler ran.
pub fn dispatch(mut event: MouseEvent) -> bool {
    event.component_index = hit_test(event.x, event.y);
    update_hover(event.component_index);

    match event.action {
        MouseAction::Down => {
            press(&event);
            false
        }
        MouseAction::Up => release(&event),
        MouseAction::Move => false,
    }
}

/// `index` and its ancestors, innermost first.
fn ancestry(index: Option<usize>) -> Vec<usize> {
    std::iter::successors(index, |&idx| core::get_parent_index(idx)).collect()
}

/// Move an interaction flag from one target's ancestry to another's,
/// touching only the slots that change.
fn move_flag(from: Option<usize>, to: Option<usize>, set: fn(usize, bool)) {
    let old = ancestry(from);
    let new = ancestry(to);
    for &idx in old.iter().filter(|idx| !new.contains(idx)) {
        set(idx, false);
    }
    for &idx in new.iter().filter(|idx| !old.contains(idx)) {
        set(idx, true);
    }
}

fn update_hover(current: Option<usize>) {
    let previous = with_pointer(|p| std::mem::replace(&mut p.hovered, current));
    // Array writes happen after the pointer borrow ends.
    if previous != current {
        move_flag(previous, current, interaction::set_hovered);
    }
}

fn press(event: &MouseEvent) {
    let target = event.component_index.map(|idx| (idx, event.button));
    let previous = with_pointer(|p| std::mem::replace(&mut p.pressed, target));
    move_flag(previous.map(|(idx, _)| idx), event.component_index, interaction::set_pressed);
}

fn release(event: &MouseEvent) -> bool {
    let Some((pressed, button)) = with_pointer(|p| p.pressed.take()) else {
        return false;
    };
    move_flag(Some(pressed), None, interaction::set_pressed);

    if event.component_index == Some(pressed) && event.button == button {
        bubble_click(pressed, event)
    } else {
        false
    }
}

/// Walk up from `target` to the first component with a click handler.
fn bubble_click(target: usize, event: &MouseEvent) -> bool {
    let mut current = Some(target);
    while let Some(idx) = current {
        if let Some(handler) = with_pointer(|p| p.click_handlers.get(&idx).cloned()) {
            tracing::debug!(component = idx, x = event.x, y = event.y, "click");
            handler(event);
            return true;
        }
        current = core::get_parent_index(idx);
    }
    false
}

/// Reset all mouse state (for testing)
pub fn reset_mouse_state() {
    with_pointer(|p| *p = Pointer::default());
    clear_hit_grid();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::engine::arrays::core;
    use crate::engine::{allocate_index, reset_registry};

    fn setup() {
        reset_registry();
        reset_mouse_state();
        resize_hit_grid(20, 10);
    }

    fn counting_handler(hits: &Rc<Cell<u32>>) -> MouseCallback {
        let hits = hits.clone();
        Rc::new(move |_: &MouseEvent| hits.set(hits.get() + 1))
    }

    #[test]
    fn test_hit_grid_fill_and_get() {
        let mut grid = HitGrid::new(10, 5);
        grid.fill_rect(2, 1, 3, 2, 7);

        assert_eq!(grid.get(2, 1), Some(7));
        assert_eq!(grid.get(4, 2), Some(7));
        assert_eq!(grid.get(5, 2), None);
        assert_eq!(grid.get(50, 50), None);
    }

    #[test]
    fn test_hit_grid_clips_and_overwrites() {
        let mut grid = HitGrid::new(4, 4);
        grid.fill_rect(0, 0, 4, 4, 1);
        grid.fill_rect(2, 2, 10, 10, 2);

        assert_eq!(grid.get(1, 1), Some(1));
        assert_eq!(grid.get(3, 3), Some(2));

        grid.resize(2, 2);
        assert_eq!(grid.get(0, 0), None);
        assert_eq!((grid.width(), grid.height()), (2, 2));
    }

    #[test]
    fn test_click_requires_same_component_and_button() {
        setup();
        let a = allocate_index(None);
        let b = allocate_index(None);
        fill_hit_rect(0, 0, 5, 1, a);
        fill_hit_rect(5, 0, 5, 1, b);

        let clicks = Rc::new(Cell::new(0));
        let _cleanup = on_click(a, counting_handler(&clicks));

        dispatch(MouseEvent::down(MouseButton::Left, 1, 0));
        dispatch(MouseEvent::up(MouseButton::Left, 6, 0));
        dispatch(MouseEvent::down(MouseButton::Left, 1, 0));
        dispatch(MouseEvent::up(MouseButton::Right, 1, 0));
        assert_eq!(clicks.get(), 0);

        dispatch(MouseEvent::down(MouseButton::Left, 1, 0));
        assert!(dispatch(MouseEvent::up(MouseButton::Left, 2, 0)));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_click_bubbles_to_parent() {
        setup();
        let parent = allocate_index(None);
        let child = allocate_index(None);
        core::set_parent_index(child, Some(parent));
        fill_hit_rect(0, 0, 10, 3, parent);
        fill_hit_rect(1, 1, 3, 1, child);

        let clicked = Rc::new(Cell::new(None));
        let c = clicked.clone();
        let _cleanup = on_click(parent, Rc::new(move |e: &MouseEvent| c.set(e.component_index)));

        dispatch(MouseEvent::down(MouseButton::Left, 2, 1));
        dispatch(MouseEvent::up(MouseButton::Left, 2, 1));
        assert_eq!(clicked.get(), Some(child));
    }

    #[test]
    fn test_hover_and_pressed_flags() {
        setup();
        let idx = allocate_index(None);
        fill_hit_rect(0, 0, 3, 1, idx);

        dispatch(MouseEvent::move_to(1, 0));
        assert!(interaction::get_hovered(idx));
        assert_eq!(hovered_component(), Some(idx));

        dispatch(MouseEvent::down(MouseButton::Left, 1, 0));
        assert!(interaction::get_pressed(idx));
        assert_eq!(pressed_component(), Some(idx));

        // Dragging off keeps the press until the button comes up.
        dispatch(MouseEvent::new(MouseAction::Move, MouseButton::Left, 10, 5));
        assert!(!interaction::get_hovered(idx));
        assert!(interaction::get_pressed(idx));

        assert!(!dispatch(MouseEvent::up(MouseButton::Left, 10, 5)));
        assert!(!interaction::get_pressed(idx));
        assert_eq!(pressed_component(), None);
    }

    #[test]
    fn test_flags_cover_ancestors() {
        setup();
        let root = allocate_index(None);
        let button = allocate_index(None);
        let label = allocate_index(None);
        core::set_parent_index(button, Some(root));
        core::set_parent_index(label, Some(button));
        let other = allocate_index(None);
        core::set_parent_index(other, Some(root));
        fill_hit_rect(0, 0, 10, 3, root);
        fill_hit_rect(0, 0, 5, 1, label);
        fill_hit_rect(6, 0, 3, 1, other);

        dispatch(MouseEvent::down(MouseButton::Left, 1, 0));
        assert_eq!(hovered_component(), Some(label));
        assert!(interaction::get_hovered(button) && interaction::get_pressed(button));
        assert!(interaction::get_hovered(root));

        dispatch(MouseEvent::new(MouseAction::Move, MouseButton::Left, 7, 0));
        assert!(!interaction::get_hovered(button) && !interaction::get_hovered(label));
        assert!(interaction::get_hovered(root) && interaction::get_hovered(other));
        assert!(interaction::get_pressed(button));

        dispatch(MouseEvent::up(MouseButton::Left, 7, 0));
        assert!(!interaction::get_pressed(button) && !interaction::get_pressed(root));
    }

    #[test]
    fn test_released_target_hands_hover_to_parent() {
        setup();
        let parent = allocate_index(None);
        let child = allocate_index(None);
        core::set_parent_index(child, Some(parent));
        fill_hit_rect(0, 0, 5, 1, child);

        dispatch(MouseEvent::move_to(0, 0));
        cleanup_index(child);
        assert_eq!(hovered_component(), Some(parent));

        dispatch(MouseEvent::move_to(10, 5));
        assert!(!interaction::get_hovered(parent));
    }

    #[test]
    fn test_cleanup_removes_handler_and_state() {
        setup();
        let idx = allocate_index(None);
        fill_hit_rect(0, 0, 3, 1, idx);

        let clicks = Rc::new(Cell::new(0));
        let cleanup = on_click(idx, counting_handler(&clicks));
        cleanup();

        dispatch(MouseEvent::down(MouseButton::Left, 0, 0));
        assert!(!dispatch(MouseEvent::up(MouseButton::Left, 0, 0)));
        assert_eq!(clicks.get(), 0);

        dispatch(MouseEvent::down(MouseButton::Left, 0, 0));
        cleanup_index(idx);
        assert_eq!(hovered_component(), None);
        assert_eq!(pressed_component(), None);
    }

    #[test]
    fn test_handler_may_register_handlers() {
        setup();
        let idx = allocate_index(None);
        fill_hit_rect(0, 0, 3, 1, idx);

        let _cleanup = on_click(idx, Rc::new(move |_: &MouseEvent| {
            let _ = on_click(99, Rc::new(|_: &MouseEvent| {}));
        }));

        dispatch(MouseEvent::down(MouseButton::Left, 0, 0));
        assert!(dispatch(MouseEvent::up(MouseButton::Left, 0, 0)));
    }
}
