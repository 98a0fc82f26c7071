//! Painting drawables into terminal cells.
//!
//! Each cell shows two vertically stacked pixels with the upper half block
//! `▀`: foreground is the top pixel, background the bottom one. A terminal
//! of `cols x rows` cells is therefore a `cols x 2*rows` pixel canvas with
//! roughly square pixels.
//!
//! Circles are filled by alpha-blending over a white page, then stroked
//! with a one pixel ring. The label panel is written last as plain text.

use crate::error::FactorResult;
use crate::layout::{layout_label, DrawCircleData};
use crate::pipeline::FactorScene;
use crate::types::{Color, Rect, Size};

use super::buffer::{Cell, FrameBuffer};

const HALF_BLOCK: char = '▀';
const STROKE_WIDTH: f64 = 1.0;

/// Pixel canvas size for a terminal of `cols x rows` cells.
pub fn pixel_size(cols: u16, rows: u16) -> Size {
    Size::new(f64::from(cols), f64::from(rows) * 2.0)
}

/// Opaque pixel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    fn blend(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            self.pixels[idx] = Color::over(color, self.pixels[idx]);
        }
    }

    /// Paint one drawable: fill, then stroke.
    pub fn draw_circle(&mut self, circle: &DrawCircleData) {
        if !circle.fill.is_transparent() {
            self.fill_ellipse(&circle.rect, circle.fill);
        }
        if !circle.stroke.is_transparent() {
            self.stroke_ellipse(&circle.rect, circle.stroke);
        }
    }

    pub fn fill_ellipse(&mut self, rect: &Rect, color: Color) {
        let rx = rect.width.abs() / 2.0;
        let ry = rect.height.abs() / 2.0;
        let c = rect.center();

        // Smaller than a pixel: paint the pixel under the center
        if rx < 0.5 && ry < 0.5 {
            if rx > 0.0 && c.x >= 0.0 && c.y >= 0.0 {
                self.blend(c.x as usize, c.y as usize, color);
            }
            return;
        }

        self.scan(rect, |q| q <= 1.0, color);
    }

    pub fn stroke_ellipse(&mut self, rect: &Rect, color: Color) {
        let r_min = (rect.width.abs().min(rect.height.abs()) / 2.0).max(f64::EPSILON);
        let band = STROKE_WIDTH / 2.0 / r_min;
        self.scan(rect, |q| (q - 1.0).abs() <= band, color);
    }

    /// Blend `color` into every pixel whose center satisfies `inside`,
    /// given the normalized ellipse radius `q` of that center.
    fn scan(&mut self, rect: &Rect, inside: impl Fn(f64) -> bool, color: Color) {
        let rx = (rect.width.abs() / 2.0).max(f64::EPSILON);
        let ry = (rect.height.abs() / 2.0).max(f64::EPSILON);
        let c = rect.center();

        let pad = STROKE_WIDTH;
        let x0 = (c.x - rx - pad).floor().max(0.0) as usize;
        let y0 = (c.y - ry - pad).floor().max(0.0) as usize;
        let x1 = ((c.x + rx + pad).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((c.y + ry + pad).ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f64 + 0.5 - c.x) / rx;
                let dy = (y as f64 + 0.5 - c.y) / ry;
                let q = (dx * dx + dy * dy).sqrt();
                if inside(q) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Fold pixel pairs into half-block cells.
    pub fn to_frame_buffer(&self) -> FrameBuffer {
        let cols = self.width.min(u16::MAX as usize) as u16;
        let rows = (self.height / 2).min(u16::MAX as usize) as u16;
        let mut fb = FrameBuffer::new(cols, rows);

        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = (col as usize, row as usize * 2);
                let top = self.get(x, y).unwrap_or(Color::WHITE);
                let bottom = self.get(x, y + 1).unwrap_or(Color::WHITE);
                if let Some(cell) = fb.get_mut(col, row) {
                    *cell = Cell {
                        ch: HALF_BLOCK,
                        fg: top.to_rgb8(),
                        bg: bottom.to_rgb8(),
                    };
                }
            }
        }
        fb
    }
}

/// Render the scene's current frame for a `cols x rows` terminal.
///
/// The scene canvas should already be [`pixel_size`] of the same terminal.
pub fn paint_scene(scene: &FactorScene, cols: u16, rows: u16) -> FactorResult<FrameBuffer> {
    let mut canvas = PixelCanvas::new(cols as usize, rows as usize * 2);

    for circle in scene.drawables() {
        canvas.draw_circle(&circle);
    }
    for circle in scene.debug_drawables() {
        canvas.draw_circle(circle);
    }

    let mut fb = canvas.to_frame_buffer();

    // Label is laid out in cell units
    let label = scene.label();
    if !label.number_text.is_empty() {
        let cells = Size::new(f64::from(cols), f64::from(rows));
        let layout = layout_label(&label, &scene.config().label, cells)?;

        let white = Color::WHITE.to_rgb8();
        let black = Color::BLACK.to_rgb8();
        let p = layout.panel;
        fb.fill_rect(
            p.x as u16,
            p.y as u16,
            p.width.ceil() as u16,
            p.height.ceil() as u16,
            white,
        );
        fb.draw_text(
            layout.number_origin.x.round() as u16,
            layout.number_origin.y as u16,
            &label.number_text,
            black,
            white,
        );
        fb.draw_text(
            layout.factors_origin.x.round() as u16,
            layout.factors_origin.y as u16,
            &label.factors_text,
            black,
            white,
        );
    }

    Ok(fb)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FactorConfig;
    use crate::types::Point;

    #[test]
    fn test_pixel_size_doubles_rows() {
        assert_eq!(pixel_size(80, 24), Size::new(80.0, 48.0));
    }

    #[test]
    fn test_fill_covers_center_not_corner() {
        let mut canvas = PixelCanvas::new(10, 10);
        let red = Color::new(1.0, 0.0, 0.0, 1.0);
        canvas.fill_ellipse(&Rect::new(0.0, 0.0, 10.0, 10.0), red);

        assert_eq!(canvas.get(5, 5), Some(red));
        assert_eq!(canvas.get(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_transparent_fill_is_noop() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.draw_circle(&DrawCircleData::new(
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Color::TRANSPARENT,
            Color::TRANSPARENT,
        ));
        assert_eq!(canvas, PixelCanvas::new(4, 4));
    }

    #[test]
    fn test_stroke_leaves_inside_empty() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.stroke_ellipse(&Rect::new(0.0, 0.0, 20.0, 20.0), Color::BLACK);

        assert_eq!(canvas.get(10, 10), Some(Color::WHITE));
        assert_eq!(canvas.get(10, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_half_blocks() {
        let mut canvas = PixelCanvas::new(2, 2);
        canvas.fill_ellipse(&Rect::centered(Point::new(0.5, 0.5), Size::new(1.0, 1.0)), Color::BLACK);
        let fb = canvas.to_frame_buffer();

        assert_eq!(fb.width(), 2);
        assert_eq!(fb.height(), 1);
        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, HALF_BLOCK);
        assert_eq!(cell.fg, (0, 0, 0));
        assert_eq!(cell.bg, (255, 255, 255));
    }

    #[test]
    fn test_paint_scene_with_label() {
        let mut scene = FactorScene::new(FactorConfig::default(), pixel_size(40, 20)).unwrap();
        scene.set_target_number(12).unwrap();
        while scene.tick() {}

        let fb = paint_scene(&scene, 40, 20).unwrap();
        assert_eq!(fb.width(), 40);
        assert_eq!(fb.height(), 20);

        // "3x2x2" starts at the margin on the second label line
        assert_eq!(fb.get(2, 3).unwrap().ch, '3');
        // Some circle pixels are colored
        assert!(fb
            .cells()
            .iter()
            .any(|c| c.fg != (255, 255, 255) && c.fg != (0, 0, 0)));
    }
}
