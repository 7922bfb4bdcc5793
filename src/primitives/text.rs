//! Text Primitive - Display text with styling.
//!
//! A pure display component. Cannot have children. Content can be a static
//! string, signal, or getter; when the source changes, layout re-measures
//! the text and the frame is repainted.

use super::types::{bind_prop, Cleanup, PropValue, TextProps};
use crate::engine::arrays::{core, text as text_arrays, visual};
use crate::engine::{allocate_index, get_current_parent_index, release_index};
use crate::types::ComponentType;

/// Create a text display component.
///
/// Returns a cleanup function that releases resources when called.
pub fn text(props: TextProps) -> Cleanup {
    let index = allocate_index(props.id.as_deref());

    core::set_component_type(index, ComponentType::Text);
    core::set_parent_index(index, get_current_parent_index());

    bind_prop!(
        props.content,
        index,
        text_arrays::set_text_content,
        text_arrays::set_text_content_getter
    );

    if let Some(fg) = props.fg {
        bind_prop!(fg, index, visual::set_fg_color, visual::set_fg_color_getter);
    }
    if let Some(attrs) = props.attrs {
        bind_prop!(attrs, index, text_arrays::set_text_attrs, text_arrays::set_text_attrs_getter);
    }

    Box::new(move || release_index(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::signal;

    use crate::engine::{get_allocated_count, get_index, reset_registry};
    use crate::types::{Attr, Rgba};

    #[test]
    fn test_static_content() {
        reset_registry();
        let cleanup = text(TextProps {
            id: Some("label".into()),
            content: "Hello, Jane Smith!".into(),
            fg: Some(Rgba::CYAN.into()),
            attrs: Some(Attr::BOLD.into()),
            ..Default::default()
        });

        let idx = get_index("label").unwrap();
        assert_eq!(core::get_component_type(idx), ComponentType::Text);
        assert_eq!(text_arrays::get_text_content(idx), "Hello, Jane Smith!");
        assert_eq!(visual::get_fg_color(idx), Rgba::CYAN);
        assert_eq!(text_arrays::get_text_attrs(idx), Attr::BOLD);

        cleanup();
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_getter_content_is_reactive() {
        reset_registry();
        let count = signal(0u64);
        let shown = count.clone();
        let _cleanup = text(TextProps {
            id: Some("count".into()),
            content: PropValue::getter(move || format!("Count: {}", shown.get())),
            ..Default::default()
        });

        let idx = get_index("count").unwrap();
        assert_eq!(text_arrays::get_text_content(idx), "Count: 0");
        count.set(4);
        assert_eq!(text_arrays::get_text_content(idx), "Count: 4");
    }
}
