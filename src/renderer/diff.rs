//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: move (if not already there), set colors (if changed), print
//! 3. Flush output buffer (single write)
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::queue;

use super::buffer::{Cell, FrameBuffer, Rgb};

/// Differential renderer for fullscreen mode.
pub struct DiffRenderer {
    output: Vec<u8>,
    previous: Option<FrameBuffer>,
    // Terminal state after the last emitted cell
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self {
            output: Vec::with_capacity(16384),
            previous: None,
            cursor: None,
            fg: None,
            bg: None,
        }
    }

    /// Render a frame to stdout, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        self.render_to(&mut io::stdout(), buffer)
    }

    /// Render a frame to any writer.
    pub fn render_to<W: Write>(&mut self, out: &mut W, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;

        queue!(self.output, BeginSynchronizedUpdate)?;
        self.reset_state();

        let width = buffer.width();
        let height = buffer.height();

        let comparable = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);

        for (x, y, cell) in buffer.iter() {
            let changed = match comparable {
                Some(prev) => prev.get(x, y) != Some(cell),
                None => true,
            };

            if changed {
                has_changes = true;
                Self::emit(
                    &mut self.output,
                    &mut self.cursor,
                    &mut self.fg,
                    &mut self.bg,
                    x,
                    y,
                    cell,
                )?;
            }
        }

        queue!(self.output, EndSynchronizedUpdate)?;
        self.flush(out)?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Force a full redraw (no diffing) on the next render.
    ///
    /// Use this after terminal resize or when the screen is corrupted.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.output, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.flush(&mut io::stdout())?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.output, ResetColor, Show, LeaveAlternateScreen)?;
        self.flush(&mut io::stdout())
    }

    fn reset_state(&mut self) {
        self.cursor = None;
        self.fg = None;
        self.bg = None;
    }

    fn emit(
        output: &mut Vec<u8>,
        cursor: &mut Option<(u16, u16)>,
        fg: &mut Option<Rgb>,
        bg: &mut Option<Rgb>,
        x: u16,
        y: u16,
        cell: &Cell,
    ) -> io::Result<()> {
        if *cursor != Some((x, y)) {
            queue!(output, MoveTo(x, y))?;
        }
        if *fg != Some(cell.fg) {
            queue!(output, SetForegroundColor(term_color(cell.fg)))?;
            *fg = Some(cell.fg);
        }
        if *bg != Some(cell.bg) {
            queue!(output, SetBackgroundColor(term_color(cell.bg)))?;
            *bg = Some(cell.bg);
        }
        queue!(output, Print(cell.ch))?;

        // Half blocks and label text are all single width
        *cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.output)?;
        out.flush()?;
        self.output.clear();
        Ok(())
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn term_color((r, g, b): Rgb) -> TermColor {
    TermColor::Rgb { r, g, b }
}

// =============================================================================
// Tests
// =============================================================================
