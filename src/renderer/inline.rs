//! Inline renderer for normal terminal mode.
//!
//! Writes into the normal screen below the cursor instead of the alternate
//! buffer. Each frame erases the previous one and rewrites it in full, so
//! scrollback above stays intact.

use std::io::{self, Write};

use super::ansi;
use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

pub struct InlineRenderer {
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous_height: u16,
}

impl InlineRenderer {
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous_height: 0,
        }
    }

    /// Render a frame to stdout.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<()> {
        self.render_to(buffer, &mut io::stdout().lock())
    }

    /// Render a frame to `writer`, replacing the previous one.
    pub fn render_to<W: Write>(&mut self, buffer: &FrameBuffer, writer: &mut W) -> io::Result<()> {
        ansi::begin_sync(&mut self.output)?;
        self.erase_previous()?;
        self.cell_renderer.reset();

        let height = buffer.height();
        for y in 0..height {
            for x in 0..buffer.width() {
                if let Some(cell) = buffer.get(x, y) {
                    self.cell_renderer.render_cell_inline(&mut self.output, cell);
                }
            }
            if y + 1 < height {
                self.output.write_str("\r\n");
            }
        }

        ansi::reset(&mut self.output)?;
        ansi::end_sync(&mut self.output)?;
        self.output.flush_to(writer)?;
        writer.flush()?;

        self.previous_height = height;
        Ok(())
    }

    /// Erase the last frame from the screen.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.previous_height == 0 {
            return Ok(());
        }
        self.erase_previous()?;
        self.previous_height = 0;
        self.output.flush_stdout()
    }

    // The cursor sits on the last row written.
    fn erase_previous(&mut self) -> io::Result<()> {
        if self.previous_height > 0 {
            ansi::cursor_up(&mut self.output, self.previous_height - 1)?;
            ansi::cursor_column_zero(&mut self.output)?;
            ansi::erase_down(&mut self.output)?;
        }
        Ok(())
    }

    pub fn previous_height(&self) -> u16 {
        self.previous_height
    }
}

impl Default for InlineRenderer {
    fn default() -> Self {
        Self::new()
    }
}
