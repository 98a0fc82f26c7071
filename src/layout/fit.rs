//! Global fit - normalize a placed tree into the drawing region.
//!
//! The closest pair of points sets the point footprint `s`; the bounding box
//! of all points grown by `s/2` sets the scale. Nothing in the tree is
//! mutated: the parameters are applied when mapping to the canvas, which
//! keeps `fit` idempotent.

use crate::types::{Point, Rect, Size};

use super::node::CircleNode;
use super::place::closest_distance_sq;

/// Below this squared spacing all points are treated as coincident.
const COINCIDENT_EPSILON: f64 = 1e-6;

/// Scale parameters computed by [`fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// Closest point spacing (footprint of one point) in unit-frame units.
    pub s: f64,
    /// Larger side of the expanded bounding box.
    pub max_span: f64,
    /// Center of the expanded bounding box.
    pub center: Point,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            s: 1.0,
            max_span: 1.0,
            center: Point::UNIT_CENTER,
        }
    }
}

impl FitParams {
    /// Map a unit-frame point into a canvas of the given size.
    ///
    /// The box center lands on the canvas center and `max_span` fills the
    /// shorter canvas side.
    pub fn to_canvas(&self, p: Point, canvas: Size) -> Point {
        let scale = self.scale(canvas);
        let origin = canvas.center();
        Point::new(
            origin.x + (p.x - self.center.x) * scale,
            origin.y + (p.y - self.center.y) * scale,
        )
    }

    /// Canvas units per unit-frame unit.
    #[inline]
    pub fn scale(&self, canvas: Size) -> f64 {
        canvas.min_side() / self.max_span
    }

    /// Diameter of one point circle on the canvas.
    #[inline]
    pub fn point_diameter(&self, canvas: Size, point_scale: f64) -> f64 {
        point_scale * self.s * self.scale(canvas)
    }

    /// Fitted bounding box in unit-frame units.
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.center, Size::new(self.max_span, self.max_span))
    }
}

/// Compute the fit parameters of a placed tree.
pub fn fit(root: &CircleNode) -> FitParams {
    let points = root.absolute_points();
    if points.is_empty() {
        return FitParams::default();
    }

    let s = match closest_distance_sq(&points) {
        Some(d) if d > COINCIDENT_EPSILON => d.sqrt(),
        _ => 1.0 / points.len() as f64,
    };

    let mut xmin = f64::INFINITY;
    let mut ymin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    for p in &points {
        xmin = xmin.min(p.x);
        ymin = ymin.min(p.y);
        xmax = xmax.max(p.x);
        ymax = ymax.max(p.y);
    }

    xmin -= s / 2.0;
    ymin -= s / 2.0;
    xmax += s / 2.0;
    ymax += s / 2.0;

    FitParams {
        s,
        max_span: (xmax - xmin).max(ymax - ymin),
        center: Point::new((xmin + xmax) / 2.0, (ymin + ymax) / 2.0),
    }
}

// =============================================================================
// Tests
// =============================================================================
