//! FrameBuffer - terminal cells to be diffed and written.
//!
//! Uses flat storage with row-major indexing: `index = y * width + x`.

/// 8-bit RGB triple as sent to the terminal.
pub type Rgb = (u8, u8, u8);

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: (0, 0, 0),
            bg: (255, 255, 255),
        }
    }
}

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer filled with blank white cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
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

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            (x, y, cell)
        })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Write a line of text starting at (x, y), clipped to the buffer.
    ///
    /// Returns the number of columns advanced.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb) -> u16 {
        use unicode_width::UnicodeWidthChar;

        let mut col = x;
        for ch in text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if let Some(cell) = self.get_mut(col, y) {
                *cell = Cell { ch, fg, bg };
            }
            // Continuation column of a wide char
            for extra in 1..w {
                if let Some(cell) = self.get_mut(col + extra, y) {
                    *cell = Cell { ch: ' ', fg, bg };
                }
            }
            col = col.saturating_add(w);
        }
        col - x
    }

    /// Fill a rectangle of cells with a background color.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, bg: Rgb) {
        for row in y..y.saturating_add(height) {
            for col in x..x.saturating_add(width) {
                if let Some(cell) = self.get_mut(col, row) {
                    *cell = Cell { ch: ' ', fg: cell.fg, bg };
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buf = FrameBuffer::new(10, 5);
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 5);
        assert_eq!(buf.cells().len(), 50);
    }

    #[test]
    fn test_buffer_bounds() {
        let buf = FrameBuffer::new(10, 5);
        assert!(buf.in_bounds(9, 4));
        assert!(!buf.in_bounds(10, 0));
        assert!(buf.get(0, 5).is_none());
    }

    #[test]
    fn test_draw_text_clips() {
        let mut buf = FrameBuffer::new(4, 1);
        let advanced = buf.draw_text(2, 0, "12345", (0, 0, 0), (255, 255, 255));

        assert_eq!(advanced, 5);
        assert_eq!(buf.get(2, 0).unwrap().ch, '1');
        assert_eq!(buf.get(3, 0).unwrap().ch, '2');
    }

    #[test]
    fn test_iter_coordinates() {
        let buf = FrameBuffer::new(3, 2);
        let last = buf.iter().last().unwrap();
        assert_eq!((last.0, last.1), (2, 1));
    }
}
