//! Core types for factor-circles.
//!
//! Plain value types shared by the layout engine, the transition state and
//! the renderer. Everything here is `Copy` and interpolation always produces
//! new values instead of mutating in place.

use std::f64::consts::PI;

// =============================================================================
// Point / Size / Rect
// =============================================================================

/// 2D point. Lives in the unit square before fitting, in canvas units after.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Center of the unit square.
    pub const UNIT_CENTER: Self = Self { x: 0.5, y: 0.5 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point on the unit circle at angle `a` (radians).
    #[inline]
    pub fn on_unit_circle(a: f64) -> Self {
        Self::new(a.cos(), a.sin())
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_sq(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// `self + scale * offset`, used to resolve circle-relative offsets.
    #[inline]
    pub fn offset(self, offset: Self, scale: f64) -> Self {
        Self::new(self.x + scale * offset.x, self.y + scale * offset.y)
    }

    #[inline]
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Side of the largest square that fits.
    #[inline]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(lerp(a.width, b.width, t), lerp(a.height, b.height, t))
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `center`.
    #[inline]
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Square bounding box of a circle.
    #[inline]
    pub fn from_circle(center: Point, diameter: f64) -> Self {
        Self::centered(center, Size::new(diameter, diameter))
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Interpolate center and size independently, so a growing circle stays
    /// centered while it moves.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        let center = Point::lerp(a.center(), b.center(), t);
        let size = Size::lerp(a.size(), b.size(), t);
        Self::centered(center, size)
    }
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with channels in `[0, 1]`.
///
/// Kept as floats so interpolation between frames does not drift through
/// integer rounding. Converted to a renderer format only at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Black with the given alpha. Debug overlays use this.
    #[inline]
    pub const fn black_alpha(a: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, a)
    }

    /// Create an opaque color from HSV.
    ///
    /// - `h`: hue in degrees, wrapped into `[0, 360)`
    /// - `s`: saturation `[0, 1]`
    /// - `v`: value `[0, 1]`
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        if s <= 0.0 {
            return Self::new(v, v, v, 1.0);
        }

        let h = h.rem_euclid(360.0) / 60.0;
        let sector = h.floor();
        let f = h - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(
            lerp(a.r, b.r, t),
            lerp(a.g, b.g, t),
            lerp(a.b, b.b, t),
            lerp(a.a, b.a, t),
        )
    }

    /// Porter-Duff "over": composite `src` onto an opaque `dst`.
    pub fn over(src: Self, dst: Self) -> Self {
        let a = src.a.clamp(0.0, 1.0);
        Self::new(
            src.r * a + dst.r * (1.0 - a),
            src.g * a + dst.g * (1.0 - a),
            src.b * a + dst.b * (1.0 - a),
            1.0,
        )
    }

    /// 8-bit channels, rounded and clamped.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }

    /// CSS `rgba(...)` string for canvas-style renderers.
    pub fn to_css(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("rgba({},{},{},{})", r, g, b, self.a.clamp(0.0, 1.0))
    }
}

// =============================================================================
// Angles
// =============================================================================

/// Default starting angle for rings: straight up on a y-down canvas.
pub const DEFAULT_BASE_ANGLE: f64 = -PI / 2.0;

/// Angular step between `count` evenly spaced items.
#[inline]
pub fn angle_step(count: usize) -> f64 {
    2.0 * PI / count as f64
}

// =============================================================================
// Debug layers (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Which debug overlays to emit when debug mode is on.
    ///
    /// Combine with bitwise OR: `DebugLayers::NODE_BOUNDS | DebugLayers::LEAF_CENTERS`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DebugLayers: u8 {
        /// Bounding circle of every composite node.
        const NODE_BOUNDS = 1 << 0;
        /// Ring of every leaf node.
        const LEAF_BOUNDS = 1 << 1;
        /// Marker at every leaf center.
        const LEAF_CENTERS = 1 << 2;
        /// Marker at every point.
        const POINT_MARKERS = 1 << 3;

        const DEFAULT = Self::NODE_BOUNDS.bits()
            | Self::LEAF_CENTERS.bits()
            | Self::POINT_MARKERS.bits();
    }
}

impl Default for DebugLayers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rect_center_and_size() {
        let r = Rect::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(r.center(), Point::new(12.0, 23.0));
        assert_eq!(r.size(), Size::new(4.0, 6.0));
    }

    #[test]
    fn test_rect_lerp_keeps_center_path() {
        let a = Rect::from_circle(Point::new(0.0, 0.0), 2.0);
        let b = Rect::from_circle(Point::new(10.0, 0.0), 6.0);

        let mid = Rect::lerp(a, b, 0.5);
        assert_eq!(mid.center(), Point::new(5.0, 0.0));
        assert!(approx(mid.width, 4.0));
        assert!(approx(mid.height, 4.0));
    }

    #[test]
    fn test_hsv_primaries() {
        let red = Color::from_hsv(0.0, 1.0, 1.0);
        assert_eq!(red.to_rgb8(), (255, 0, 0));

        let green = Color::from_hsv(120.0, 1.0, 1.0);
        assert_eq!(green.to_rgb8(), (0, 255, 0));

        let blue = Color::from_hsv(240.0, 1.0, 1.0);
        assert_eq!(blue.to_rgb8(), (0, 0, 255));
    }

    #[test]
    fn test_hsv_wraps_hue() {
        assert_eq!(Color::from_hsv(360.0, 0.6, 0.6), Color::from_hsv(0.0, 0.6, 0.6));
        assert_eq!(Color::from_hsv(-120.0, 0.6, 0.6), Color::from_hsv(240.0, 0.6, 0.6));
    }

    #[test]
    fn test_hsv_zero_saturation_is_gray() {
        let c = Color::from_hsv(200.0, 0.0, 0.6);
        assert!(approx(c.r, 0.6) && approx(c.g, 0.6) && approx(c.b, 0.6));
    }

    #[test]
    fn test_color_over() {
        let half_black = Color::black_alpha(0.5);
        let c = Color::over(half_black, Color::WHITE);
        assert!(approx(c.r, 0.5));
        assert!(approx(c.a, 1.0));

        assert_eq!(Color::over(Color::TRANSPARENT, Color::WHITE), Color::WHITE);
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Color::new(1.0, 0.0, 0.0, 0.5).to_css(), "rgba(255,0,0,0.5)");
    }

    #[test]
    fn test_debug_layers_default() {
        let layers = DebugLayers::default();
        assert!(layers.contains(DebugLayers::NODE_BOUNDS));
        assert!(layers.contains(DebugLayers::POINT_MARKERS));
        assert!(!layers.contains(DebugLayers::LEAF_BOUNDS));
    }
}
