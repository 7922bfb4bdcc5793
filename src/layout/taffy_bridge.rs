//! Taffy Bridge - Integration with the Taffy layout engine
//!
//! Reads the layout arrays into Taffy styles, runs flexbox, and extracts
//! the result into `ComputedLayout`.
//!
//! Called from the layout derived: every array read below is tracked, so
//! the derived re-runs when any of them changes.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection as TaffyFlexDirection, LengthPercentage, NodeId, Rect, Size,
    Style, TaffyTree,
};

use crate::engine::arrays::{core, layout, text};
use crate::engine::get_allocated_indices;
use crate::types::{ComponentType, FlexDirection};

use super::text_measure::{measure_text_height, string_width};
use super::types::ComputedLayout;

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn build_style(idx: usize) -> Style {
    if core::get_component_type(idx) == ComponentType::Text {
        // Sized by the measure function; never squeezed below its content.
        return Style { flex_shrink: 0.0, ..Default::default() };
    }

    let padding = LengthPercentage::Length(layout::get_padding(idx) as f32);
    let gap = LengthPercentage::Length(layout::get_gap(idx) as f32);
    Style {
        display: Display::Flex,
        flex_direction: match layout::get_flex_direction(idx) {
            FlexDirection::Column => TaffyFlexDirection::Column,
            FlexDirection::Row => TaffyFlexDirection::Row,
        },
        padding: Rect { top: padding, right: padding, bottom: padding, left: padding },
        gap: Size { width: gap, height: gap },
        ..Default::default()
    }
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

fn measure_text(
    idx: usize,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let content = text::get_text_content(idx);
    if content.is_empty() {
        return Size::ZERO;
    }

    let text_width = string_width(&content);
    let wrap_width = match available_space.width {
        AvailableSpace::Definite(w) => (w.max(0.0) as u16).min(text_width),
        AvailableSpace::MinContent | AvailableSpace::MaxContent => text_width,
    };
    let width = known_dimensions.width.map(|w| w as u16).unwrap_or(wrap_width).max(1);
    let height = measure_text_height(&content, width);

    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(height as f32),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for every allocated component.
///
/// Roots fill the terminal width. `constrain_height` also pins them to the
/// terminal height (fullscreen); otherwise they grow to their content
/// (inline).
pub fn compute_layout(terminal_width: u16, terminal_height: u16, constrain_height: bool) -> ComputedLayout {
    let indices = get_allocated_indices();
    let Some(&max_index) = indices.last() else {
        return ComputedLayout::new();
    };

    let mut tree: TaffyTree<usize> = TaffyTree::new();
    let mut nodes: HashMap<usize, NodeId> = HashMap::new();
    let mut roots: Vec<(usize, NodeId)> = Vec::new();

    // Ascending indices: a parent exists before its children, and siblings
    // keep creation order.
    for &idx in &indices {
        let mut style = build_style(idx);
        let parent = core::get_parent_index(idx);
        if parent.is_none() {
            style.size.width = Dimension::Length(terminal_width as f32);
            if constrain_height {
                style.size.height = Dimension::Length(terminal_height as f32);
            }
        }

        let node = match core::get_component_type(idx) {
            ComponentType::Text => tree.new_leaf_with_context(style, idx),
            _ => tree.new_leaf(style),
        };
        let node = match node {
            Ok(node) => node,
            Err(err) => {
                tracing::warn!(idx, %err, "failed to create layout node");
                continue;
            }
        };
        nodes.insert(idx, node);

        match parent.and_then(|p| nodes.get(&p)) {
            Some(&parent_node) => {
                if let Err(err) = tree.add_child(parent_node, node) {
                    tracing::warn!(idx, %err, "failed to attach layout node");
                }
            }
            None => roots.push((idx, node)),
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(terminal_width as f32),
        height: if constrain_height {
            AvailableSpace::Definite(terminal_height as f32)
        } else {
            AvailableSpace::MaxContent
        },
    };
    let mut measure_fn = |known: Size<Option<f32>>,
                          space: Size<AvailableSpace>,
                          _node: NodeId,
                          context: Option<&mut usize>,
                          _style: &Style| {
        match context {
            Some(&mut idx) => measure_text(idx, known, space),
            None => Size::ZERO,
        }
    };
    for &(root, node) in &roots {
        if let Err(err) = tree.compute_layout_with_measure(node, available, &mut measure_fn) {
            tracing::warn!(root, %err, "layout computation failed");
        }
    }

    let mut result = ComputedLayout::with_len(max_index + 1);
    for (&idx, &node) in &nodes {
        if let Ok(l) = tree.layout(node) {
            result.x[idx] = l.location.x.round() as u16;
            result.y[idx] = l.location.y.round() as u16;
            result.width[idx] = l.size.width.round() as u16;
            result.height[idx] = l.size.height.round() as u16;
        }
    }
    if let Some(&(first_root, _)) = roots.first() {
        result.content_width = result.width[first_root];
        result.content_height = result.height[first_root];
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, reset_registry};

    fn new_box(parent: Option<usize>) -> usize {
        let idx = allocate_index(None);
        core::set_component_type(idx, ComponentType::Box);
        core::set_parent_index(idx, parent);
        idx
    }

    fn new_text(parent: usize, content: &str) -> usize {
        let idx = allocate_index(None);
        core::set_component_type(idx, ComponentType::Text);
        core::set_parent_index(idx, Some(parent));
        text::set_text_content(idx, content.to_string());
        idx
    }

    #[test]
    fn test_empty() {
        reset_registry();
        let result = compute_layout(80, 24, true);
        assert_eq!(result.content_width, 0);
        assert!(result.x.is_empty());
    }

    #[test]
    fn test_root_fills_terminal_when_fullscreen() {
        reset_registry();
        let root = new_box(None);

        let result = compute_layout(80, 24, true);
        assert_eq!(result.get(root), (0, 0, 80, 24));
    }

    #[test]
    fn test_text_is_measured() {
        reset_registry();
        let root = new_box(None);
        layout::set_flex_direction(root, FlexDirection::Row);
        let label = new_text(root, "Count: 0");

        let result = compute_layout(40, 10, false);
        assert_eq!(result.width[label], 8);
        assert_eq!(result.height[label], 1);
        assert_eq!(result.content_height, 1);
    }

    #[test]
    fn test_row_places_children_side_by_side_with_gap() {
        reset_registry();
        let root = new_box(None);
        layout::set_flex_direction(root, FlexDirection::Row);
        layout::set_gap(root, 1);
        let a = new_text(root, "Count: 0");
        let b = new_text(root, "[ + ]");

        let result = compute_layout(40, 10, false);
        assert_eq!(result.x[a], 0);
        assert_eq!(result.x[b], 9);
    }

    #[test]
    fn test_padding_offsets_children() {
        reset_registry();
        let root = new_box(None);
        layout::set_padding(root, 1);
        let child = new_text(root, "hi");

        let result = compute_layout(40, 10, false);
        assert_eq!((result.x[child], result.y[child]), (1, 1));
        assert_eq!(result.content_height, 3);
    }

    #[test]
    fn test_column_stacks_with_gap() {
        reset_registry();
        let root = new_box(None);
        layout::set_gap(root, 1);
        let greeting = new_text(root, "Hello, John Doe!");
        let row = new_box(Some(root));
        layout::set_flex_direction(row, FlexDirection::Row);
        let label = new_text(row, "Count: 0");

        let result = compute_layout(40, 10, false);
        assert_eq!(result.y[greeting], 0);
        assert_eq!(result.y[row], 2);
        assert_eq!(result.y[label], 0);
        assert_eq!(result.width[row], 40);
    }
}
