//! Output buffering and stateful cell rendering.
//!
//! A frame is accumulated in one `OutputBuffer` and written with a single
//! flush. `StatefulCellRenderer` remembers the last cursor position, colors
//! and attributes so only changes hit the wire.

use std::io::{self, Write};

use crate::types::{Attr, Cell, Rgba};

use super::ansi;

// =============================================================================
// OutputBuffer
// =============================================================================

/// Accumulates a frame's bytes for one batched write.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self { data: Vec::with_capacity(16 * 1024) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    /// Write a cell's base character followed by its combining marks.
    /// Invalid codepoints are dropped along with their marks.
    #[inline]
    pub fn write_grapheme(&mut self, cell: &Cell) {
        if let Some(c) = char::from_u32(cell.char) {
            self.write_char(c);
            self.write_str(&cell.combining);
        }
    }

    /// Write everything to stdout and clear.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)?;
        stdout.flush()
    }

    /// Write everything to `writer` and clear.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }

    /// Accumulated bytes as a (lossy) string.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Emits cells while tracking terminal state.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Rgba>,
    last_attrs: Attr,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Forget tracked state. Call at the start of every frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Render a cell at an absolute position.
    pub fn render_cell(&mut self, output: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        // Right half of a wide char: the terminal already advanced.
        if cell.char == 0 {
            self.last_x = x as i32;
            self.last_y = y as i32;
            return;
        }

        if y as i32 != self.last_y || x as i32 != self.last_x + 1 {
            let _ = ansi::cursor_to(output, x, y);
        }

        self.emit_style(output, cell);
        output.write_grapheme(cell);

        self.last_x = x as i32;
        self.last_y = y as i32;
    }

    /// Render a cell at the current cursor position (inline mode).
    pub fn render_cell_inline(&mut self, output: &mut OutputBuffer, cell: &Cell) {
        if cell.char == 0 {
            return;
        }
        self.emit_style(output, cell);
        output.write_grapheme(cell);
    }

    fn emit_style(&mut self, output: &mut OutputBuffer, cell: &Cell) {
        if cell.attrs != self.last_attrs {
            let _ = ansi::reset(output);
            let _ = ansi::attrs(output, cell.attrs);
            // Reset also cleared the color.
            self.last_fg = None;
            self.last_attrs = cell.attrs;
        }
        if self.last_fg != Some(cell.fg) {
            let _ = ansi::fg(output, cell.fg);
            self.last_fg = Some(cell.fg);
        }
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}
