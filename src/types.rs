//! Core types for spark-hello.
//!
//! These types flow through the reactive pipeline and define what the
//! renderer understands: colors, cells and clip rects, plus the two enums
//! the primitives expose.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// `r == -1` marks the terminal default color, so the renderer can skip the
/// escape entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r: r as i16, g: g as i16, b: b as i16, a: 255 }
    }

    /// Terminal default color (let the terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self { r: -1, g: -1, b: -1, a: -1 };

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }
}

// =============================================================================
// Cell Attributes
// =============================================================================

bitflags::bitflags! {
    /// Text attributes. Combine with `|`: `Attr::BOLD | Attr::UNDERLINE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const INVERSE = 1 << 3;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single terminal cell. The whole pipeline exists to compute these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint. 0 marks the right half of a wide character.
    pub char: u32,
    /// Zero-width characters (combining marks, joiners, variation selectors)
    /// that follow `char` in the same grapheme.
    pub combining: String,
    pub fg: Rgba,
    pub attrs: Attr,
}

impl Cell {
    /// The cell's grapheme: base character plus any combining marks.
    /// Empty for the right half of a wide character.
    pub fn grapheme(&self) -> String {
        let mut out = String::new();
        if let Some(c) = char::from_u32(self.char).filter(|_| self.char != 0) {
            out.push(c);
            out.push_str(&self.combining);
        }
        out
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            combining: String::new(),
            fg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// Clipping rectangle used while painting nested components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && (x as u32) < self.x as u32 + self.width as u32
            && y >= self.y
            && (y as u32) < self.y as u32 + self.height as u32
    }

    /// Overlap of two rects, `None` when they are disjoint.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x.saturating_add(self.width).min(other.x.saturating_add(other.width));
        let y2 = self.y.saturating_add(self.height).min(other.y.saturating_add(other.height));

        (x2 > x1 && y2 > y1).then(|| ClipRect::new(x1, y1, x2 - x1, y2 - y1))
    }
}

// =============================================================================
// Component Types
// =============================================================================

/// What kind of primitive lives at an index of the parallel arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentType {
    #[default]
    None,
    Box,
    Text,
}

/// Main axis of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_rect_contains() {
        let rect = ClipRect::new(2, 2, 3, 3);
        assert!(rect.contains(2, 2));
        assert!(rect.contains(4, 4));
        assert!(!rect.contains(5, 4));
        assert!(!rect.contains(1, 3));
    }

    #[test]
    fn test_clip_rect_intersect() {
        let a = ClipRect::new(0, 0, 10, 10);
        let b = ClipRect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(ClipRect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&ClipRect::new(20, 20, 2, 2)), None);
    }

    #[test]
    fn test_grapheme_keeps_combining_marks() {
        let cell = Cell { char: 'e' as u32, combining: "\u{301}".into(), ..Cell::default() };
        assert_eq!(cell.grapheme(), "e\u{301}");

        let continuation = Cell { char: 0, ..Cell::default() };
        assert_eq!(continuation.grapheme(), "");
    }
}
