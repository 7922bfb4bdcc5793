//! Layout Types
//!
//! Output of the layout computation.

/// Computed layout result.
///
/// Parallel arrays indexed by component index. `x`/`y` are relative to
/// the parent's box; the frame buffer accumulates them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    pub x: Vec<u16>,
    pub y: Vec<u16>,
    pub width: Vec<u16>,
    pub height: Vec<u16>,

    /// Width of the first root.
    pub content_width: u16,

    /// Height of the first root. Inline mode sizes its frame from this.
    pub content_height: u16,
}

impl ComputedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty layout with room for indices `0..len`.
    pub fn with_len(len: usize) -> Self {
        Self {
            x: vec![0; len],
            y: vec![0; len],
            width: vec![0; len],
            height: vec![0; len],
            content_width: 0,
            content_height: 0,
        }
    }

    /// (x, y, width, height), zeros when out of bounds.
    pub fn get(&self, index: usize) -> (u16, u16, u16, u16) {
        (
            self.x.get(index).copied().unwrap_or(0),
            self.y.get(index).copied().unwrap_or(0),
            self.width.get(index).copied().unwrap_or(0),
            self.height.get(index).copied().unwrap_or(0),
        )
    }
}
