//! Box Primitive - Container component with flexbox layout.
//!
//! Lays out its children and handles clicks and focused key presses.
//! Props are bound directly to array slots, so a signal prop stays live:
//! setting it re-runs layout or paint automatically.
//!
//! # Example
//!
//! ```ignore
//! use spark_hello::primitives::{box_primitive, text, BoxProps, TextProps};
//!
//! let cleanup = box_primitive(BoxProps {
//!     padding: Some(1.into()),
//!     children: Some(Box::new(|| {
//!         text(TextProps {
//!             content: "Hello!".into(),
//!             ..Default::default()
//!         });
//!     })),
//!     ..Default::default()
//! });
//! ```

use std::rc::Rc;

use super::types::{bind_prop, BoxProps, Cleanup, MouseCallback, PropValue};
use crate::engine::arrays::{core, interaction, layout, visual};
use crate::engine::{
    allocate_index, get_current_parent_index, on_destroy, pop_parent_context, push_parent_context, release_index,
};
use crate::state::{focus, keyboard, mouse};
use crate::types::ComponentType;

/// Create a box container component.
///
/// Returns a cleanup function that releases the box and its subtree.
pub fn box_primitive(props: BoxProps) -> Cleanup {
    let index = allocate_index(props.id.as_deref());
    core::set_component_type(index, ComponentType::Box);
    core::set_parent_index(index, get_current_parent_index());

    if let Some(dir) = props.flex_direction {
        bind_prop!(dir, index, layout::set_flex_direction, layout::set_flex_direction_getter);
    }
    if let Some(gap) = props.gap {
        bind_prop!(gap, index, layout::set_gap, layout::set_gap_getter);
    }
    if let Some(padding) = props.padding {
        bind_prop!(padding, index, layout::set_padding, layout::set_padding_getter);
    }
    if let Some(fg) = props.fg {
        bind_prop!(fg, index, visual::set_fg_color, visual::set_fg_color_getter);
    }

    let focusable = props.focusable.unwrap_or(false);
    interaction::set_focusable(index, focusable);

    // Clicking a focusable box focuses it before the user callback runs.
    let on_click: Option<MouseCallback> = match (focusable, props.on_click) {
        (true, user) => Some(Rc::new(move |event: &mouse::MouseEvent| {
            focus::focus(index);
            if let Some(handler) = &user {
                handler(event);
            }
        })),
        (false, user) => user,
    };
    if let Some(handler) = on_click {
        on_destroy(index, mouse::on_click(index, handler));
    }
    if let Some(on_key) = props.on_key {
        on_destroy(index, keyboard::on_focused(index, move |event| on_key(event)));
    }
    on_destroy(index, move || {
        mouse::cleanup_index(index);
        focus::cleanup_index(index);
    });

    if let Some(children) = props.children {
        push_parent_context(index);
        children();
        pop_parent_context();
    }

    Box::new(move || release_index(index))
}
