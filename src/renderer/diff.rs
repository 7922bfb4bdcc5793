//! Differential renderer for fullscreen mode.
//!
//! Compares the new frame with the previous one and writes only the cells
//! that changed, wrapped in a synchronized-output block:
//!
//! 1. begin_sync
//! 2. For each cell: skip if unchanged, otherwise render it statefully
//! 3. end_sync, one flush
//! 4. Keep the frame for the next comparison

use std::io::{self, Write};

use super::ansi;
use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

/// Differential renderer for the alternate screen.
pub struct DiffRenderer {
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous: None,
        }
    }

    /// Render a frame to stdout. Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        self.render_to(buffer, &mut io::stdout().lock())
    }

    /// Render a frame to `writer`. Returns the number of cells written.
    ///
    /// A size change since the previous frame forces a full redraw.
    pub fn render_to<W: Write>(&mut self, buffer: &FrameBuffer, writer: &mut W) -> io::Result<usize> {
        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        ansi::begin_sync(&mut self.output)?;
        self.cell_renderer.reset();

        let mut changed = 0;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else { continue };
                if previous.as_ref().and_then(|prev| prev.get(x, y)) == Some(cell) {
                    continue;
                }
                self.cell_renderer.render_cell(&mut self.output, x, y, cell);
                changed += 1;
            }
        }

        ansi::end_sync(&mut self.output)?;
        self.output.flush_to(writer)?;
        writer.flush()?;

        self.previous = Some(buffer.clone());
        Ok(changed)
    }

    /// Drop the previous frame; the next render redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter the alternate screen with a hidden cursor.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        ansi::enter_alt_screen(&mut self.output)?;
        ansi::cursor_hide(&mut self.output)?;
        ansi::clear_screen(&mut self.output)?;
        self.output.flush_stdout()?;
        self.invalidate();
        Ok(())
    }

    /// Leave the alternate screen and restore the cursor.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        ansi::reset(&mut self.output)?;
        ansi::cursor_show(&mut self.output)?;
        ansi::exit_alt_screen(&mut self.output)?;
        self.output.flush_stdout()
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}
