//! FrameBuffer Derived - Reactive frame buffer computation.
//!
//! Paints every component into a `FrameBuffer` whenever layout or a
//! visual/text slot changes. Hit regions are collected as data here; the
//! render effect applies them to the hit grid.

use std::collections::HashMap;

use spark_signals::{derived, Derived};

use crate::engine::arrays::{core, layout as layout_arrays, text, visual};
use crate::engine::get_allocated_indices;
use crate::layout::{wrap_text, ComputedLayout};
use crate::renderer::FrameBuffer;
use crate::types::{ClipRect, ComponentType, Rgba};
use super::terminal::{render_mode, terminal_height, terminal_width, RenderMode};

// =============================================================================
// Types
// =============================================================================

/// Screen rectangle owned by one component, for mouse hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub component_index: usize,
}

/// Output of one render invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBufferResult {
    pub buffer: FrameBuffer,
    /// In paint order: parents before children.
    pub hit_regions: Vec<HitRegion>,
    pub terminal_size: (u16, u16),
}

// =============================================================================
// FrameBuffer Derived Factory
// =============================================================================

/// Create the frame buffer derived on top of a layout derived.
pub fn create_frame_buffer_derived<F>(
    layout_derived: Derived<ComputedLayout, F>,
) -> Derived<FrameBufferResult, impl Fn() -> FrameBufferResult>
where
    F: Fn() -> ComputedLayout + 'static,
{
    derived(move || {
        let tw = terminal_width();
        let th = terminal_height();
        let computed = layout_derived.get();

        let buffer_height = match render_mode() {
            RenderMode::Fullscreen => th,
            RenderMode::Inline => computed.content_height.max(1),
        };

        let mut buffer = FrameBuffer::new(tw, buffer_height);
        let mut hit_regions = Vec::new();

        // Children in ascending index order = creation order.
        let mut child_map: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for idx in get_allocated_indices() {
            match core::get_parent_index(idx) {
                Some(parent) => child_map.entry(parent).or_default().push(idx),
                None => roots.push(idx),
            }
        }

        let mut painter = Painter {
            buffer: &mut buffer,
            layout: &computed,
            child_map: &child_map,
            hit_regions: &mut hit_regions,
        };
        for root in roots {
            painter.paint(root, None, 0, 0);
        }

        FrameBufferResult {
            buffer,
            hit_regions,
            terminal_size: (tw, th),
        }
    })
}

// =============================================================================
// Painting
// =============================================================================

struct Painter<'a> {
    buffer: &'a mut FrameBuffer,
    layout: &'a ComputedLayout,
    child_map: &'a HashMap<usize, Vec<usize>>,
    hit_regions: &'a mut Vec<HitRegion>,
}

impl Painter<'_> {
    /// Paint `index` and its subtree. `parent_x`/`parent_y` are the parent's
    /// absolute origin; layout positions are relative to it.
    fn paint(&mut self, index: usize, parent_clip: Option<&ClipRect>, parent_x: u16, parent_y: u16) {
        let (rel_x, rel_y, w, h) = self.layout.get(index);
        if w == 0 || h == 0 {
            return;
        }

        let x = parent_x.saturating_add(rel_x);
        let y = parent_y.saturating_add(rel_y);
        let bounds = ClipRect::new(x, y, w, h);
        let clip = match parent_clip {
            Some(parent) => match bounds.intersect(parent) {
                Some(clip) => clip,
                None => return,
            },
            None => bounds,
        };

        self.hit_regions.push(HitRegion {
            x: clip.x,
            y: clip.y,
            width: clip.width,
            height: clip.height,
            component_index: index,
        });

        let padding = layout_arrays::get_padding(index);
        let content = ClipRect::new(
            x.saturating_add(padding),
            y.saturating_add(padding),
            w.saturating_sub(2 * padding),
            h.saturating_sub(2 * padding),
        );

        if core::get_component_type(index) == ComponentType::Text {
            if let Some(content_clip) = content.intersect(&clip) {
                self.paint_text(index, &content, &content_clip);
            }
        }

        if let Some(children) = self.child_map.get(&index) {
            for &child in children {
                self.paint(child, Some(&clip), x, y);
            }
        }
    }

    fn paint_text(&mut self, index: usize, area: &ClipRect, clip: &ClipRect) {
        let content = text::get_text_content(index);
        if content.is_empty() {
            return;
        }

        let fg = inherited_fg(index);
        let attrs = text::get_text_attrs(index);
        for (row, line) in wrap_text(&content, area.width).iter().take(area.height as usize).enumerate() {
            self.buffer.draw_text(area.x, area.y + row as u16, line, fg, attrs, Some(clip));
        }
    }
}

/// First explicit foreground color up the parent chain.
fn inherited_fg(index: usize) -> Rgba {
    let mut current = Some(index);
    while let Some(idx) = current {
        let fg = visual::get_fg_color(idx);
        if !fg.is_terminal_default() {
            return fg;
        }
        current = core::get_parent_index(idx);
    }
    Rgba::TERMINAL_DEFAULT
}
