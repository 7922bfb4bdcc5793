//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells: what the terminal should show
//! after the next render. Flat storage, row-major (`y * width + x`).
//! Every drawing call takes an optional `ClipRect`.

use crate::layout::char_width;
use crate::types::{Attr, Cell, ClipRect, Rgba};

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer filled with default (blank) cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    /// Raw cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell. Returns true if the cell was inside bounds and clip.
    pub fn set_cell(&mut self, x: u16, y: u16, char: u32, fg: Rgba, attrs: Attr, clip: Option<&ClipRect>) -> bool {
        if !self.in_bounds(x, y) || clip.is_some_and(|c| !c.contains(x, y)) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = Cell { char, combining: String::new(), fg, attrs };
        true
    }

    /// Draw one line of text. Returns the number of columns advanced.
    ///
    /// Wide characters take two cells; the second holds the continuation
    /// marker `0`. Zero-width characters join the grapheme of the cell
    /// drawn before them, and are dropped with it when it is clipped.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, attrs: Attr, clip: Option<&ClipRect>) -> u16 {
        let mut col = x;
        let mut base: Option<usize> = None;

        for ch in text.chars() {
            let w = char_width(ch);
            if w == 0 {
                if let Some(idx) = base {
                    self.cells[idx].combining.push(ch);
                }
                continue;
            }
            if col >= self.width {
                break;
            }

            base = self.set_cell(col, y, ch as u32, fg, attrs, clip).then(|| self.index(col, y));
            if base.is_some() && w == 2 {
                self.set_cell(col + 1, y, 0, fg, attrs, clip);
            }
            col = col.saturating_add(w);
        }

        col.saturating_sub(x)
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Graphemes of one row, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        let end = start + self.width as usize;
        let line: String = self.cells[start..end].iter().map(Cell::grapheme).collect();
        line.trim_end().to_string()
    }

    /// Plain-text snapshot: one line per row, trailing blanks and trailing
    /// empty rows trimmed. Colors and attributes are dropped.
    pub fn to_text(&self) -> String {
        let mut rows: Vec<String> = (0..self.height).map(|y| self.row_text(y)).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        rows.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let buf = FrameBuffer::new(4, 2);
        assert_eq!(buf.cells().len(), 8);
        assert_eq!(buf.to_text(), "");
    }

    #[test]
    fn test_draw_text() {
        let mut buf = FrameBuffer::new(20, 1);
        let used = buf.draw_text(1, 0, "Count: 4", Rgba::WHITE, Attr::NONE, None);

        assert_eq!(used, 8);
        assert_eq!(buf.row_text(0), " Count: 4");
        assert_eq!(buf.get(1, 0).map(|c| c.fg), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_text_respects_clip() {
        let mut buf = FrameBuffer::new(20, 1);
        let clip = ClipRect::new(0, 0, 5, 1);
        buf.draw_text(0, 0, "Hello, world", Rgba::WHITE, Attr::NONE, Some(&clip));

        assert_eq!(buf.row_text(0), "Hello");
    }

    #[test]
    fn test_wide_chars_use_continuation() {
        let mut buf = FrameBuffer::new(10, 1);
        let used = buf.draw_text(0, 0, "日x", Rgba::WHITE, Attr::NONE, None);

        assert_eq!(used, 3);
        assert_eq!(buf.get(1, 0).map(|c| c.char), Some(0));
        assert_eq!(buf.row_text(0), "日x");
    }

    #[test]
    fn test_combining_marks_stay_with_their_base() {
        let mut buf = FrameBuffer::new(20, 1);
        let used = buf.draw_text(0, 0, "Hello, Jose\u{301}!", Rgba::WHITE, Attr::NONE, None);

        assert_eq!(used, 12);
        assert_eq!(buf.get(10, 0).map(|c| c.grapheme()), Some("e\u{301}".to_string()));
        assert_eq!(buf.get(11, 0).map(|c| c.char), Some('!' as u32));
        assert_eq!(buf.row_text(0), "Hello, Jose\u{301}!");
    }

    #[test]
    fn test_mark_on_clipped_base_is_dropped() {
        let mut buf = FrameBuffer::new(20, 1);
        let clip = ClipRect::new(0, 0, 3, 1);
        buf.draw_text(0, 0, "abe\u{301}x\u{301}", Rgba::WHITE, Attr::NONE, Some(&clip));

        assert_eq!(buf.row_text(0), "abe\u{301}");
    }

    #[test]
    fn test_redraw_clears_old_marks() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.draw_text(0, 0, "e\u{301}", Rgba::WHITE, Attr::NONE, None);
        buf.draw_text(0, 0, "e", Rgba::WHITE, Attr::NONE, None);

        assert_eq!(buf.row_text(0), "e");
    }
}
