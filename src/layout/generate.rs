//! Generate - flatten a placed, fitted tree into drawables.
//!
//! One filled circle per point, in pre-order. Hues are spread over the total
//! number of identifiers of the whole tree, not per leaf, so neighbouring
//! units get neighbouring colors across the composition.

use crate::types::{Color, DebugLayers, Rect, Size};

use super::fit::FitParams;
use super::node::{CircleNode, NodeKind};

/// One circle handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawCircleData {
    pub rect: Rect,
    pub stroke: Color,
    pub fill: Color,
}

impl DrawCircleData {
    pub const fn new(rect: Rect, stroke: Color, fill: Color) -> Self {
        Self { rect, stroke, fill }
    }

    /// Interpolate geometry and both colors.
    pub fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            rect: Rect::lerp(from.rect, to.rect, t),
            stroke: Color::lerp(from.stroke, to.stroke, t),
            fill: Color::lerp(from.fill, to.fill, t),
        }
    }
}

/// Inputs of a generate pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub canvas: Size,
    pub point_scale: f64,
    pub hsv_saturation: f64,
    pub hsv_value: f64,
    /// Debug overlays, empty when debug mode is off.
    pub debug_layers: DebugLayers,
    pub marker_size: f64,
}

/// Output of a generate pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generated {
    pub circles: Vec<DrawCircleData>,
    pub debug: Vec<DrawCircleData>,
}

/// Flatten `root` into drawables.
pub fn generate(
    root: &CircleNode,
    params: &FitParams,
    total_ids: usize,
    options: &GenerateOptions,
) -> Generated {
    let mut out = Generated::default();
    let mut pass = GeneratePass {
        params,
        total_ids: total_ids.max(1) as f64,
        options,
        out: &mut out,
    };
    pass.node(root);
    out
}

struct GeneratePass<'a> {
    params: &'a FitParams,
    total_ids: f64,
    options: &'a GenerateOptions,
    out: &'a mut Generated,
}

impl GeneratePass<'_> {
    fn node(&mut self, node: &CircleNode) {
        let canvas = self.options.canvas;
        let layers = self.options.debug_layers;

        match &node.kind {
            NodeKind::Composite { children } => {
                for child in children {
                    self.node(child);
                }
                if layers.contains(DebugLayers::NODE_BOUNDS) {
                    self.bounds(node);
                }
            }
            NodeKind::Leaf { id, points } => {
                if layers.contains(DebugLayers::LEAF_CENTERS) {
                    let c = self.params.to_canvas(node.center, canvas);
                    self.marker(Rect::from_circle(c, self.options.marker_size), 0.4);
                }

                let diameter = self.params.point_diameter(canvas, self.options.point_scale);
                for (i, &offset) in points.iter().enumerate() {
                    let p = self.params.to_canvas(node.center.offset(offset, node.radius), canvas);

                    let hue = 360.0 * (id + i) as f64 / self.total_ids;
                    let fill =
                        Color::from_hsv(hue, self.options.hsv_saturation, self.options.hsv_value);
                    self.out.circles.push(DrawCircleData::new(
                        Rect::from_circle(p, diameter),
                        Color::TRANSPARENT,
                        fill,
                    ));

                    if layers.contains(DebugLayers::POINT_MARKERS) {
                        self.marker(Rect::from_circle(p, self.options.marker_size), 1.0);
                    }
                }

                if layers.contains(DebugLayers::LEAF_BOUNDS) {
                    self.bounds(node);
                }
            }
        }
    }

    fn marker(&mut self, rect: Rect, alpha: f64) {
        self.out.debug.push(DrawCircleData::new(
            rect,
            Color::TRANSPARENT,
            Color::black_alpha(alpha),
        ));
    }

    fn bounds(&mut self, node: &CircleNode) {
        let canvas = self.options.canvas;
        let c = self.params.to_canvas(node.center, canvas);
        let diameter = 2.0 * node.radius.abs() * self.params.scale(canvas);
        self.out.debug.push(DrawCircleData::new(
            Rect::from_circle(c, diameter),
            Color::black_alpha(0.4),
            Color::TRANSPARENT,
        ));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fit::fit;
    use crate::layout::node::LayoutContext;

    fn options(debug_layers: DebugLayers) -> GenerateOptions {
        GenerateOptions {
            canvas: Size::new(400.0, 400.0),
            point_scale: 0.9,
            hsv_saturation: 0.6,
            hsv_value: 0.6,
            debug_layers,
            marker_size: 8.0,
        }
    }

    fn run(factors: &[u64], layers: DebugLayers) -> Generated {
        let mut ctx = LayoutContext::default();
        let mut root = CircleNode::build(factors, &mut ctx).unwrap();
        root.place(&mut ctx).unwrap();
        let params = fit(&root);
        generate(&root, &params, ctx.total_ids(), &options(layers))
    }

    #[test]
    fn test_one_circle_per_unit() {
        let out = run(&[3, 2, 2], DebugLayers::empty());
        assert_eq!(out.circles.len(), 12);
        assert!(out.debug.is_empty());
    }

    #[test]
    fn test_circles_are_transparent_stroked() {
        let out = run(&[2, 2], DebugLayers::empty());
        for circle in &out.circles {
            assert_eq!(circle.stroke, Color::TRANSPARENT);
            assert_eq!(circle.fill.a, 1.0);
            assert!((circle.rect.width - circle.rect.height).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hue_follows_identifier() {
        let out = run(&[2, 2], DebugLayers::empty());
        assert_eq!(out.circles[0].fill, Color::from_hsv(0.0, 0.6, 0.6));
        assert_eq!(out.circles[1].fill, Color::from_hsv(90.0, 0.6, 0.6));
        assert_eq!(out.circles[3].fill, Color::from_hsv(270.0, 0.6, 0.6));
    }

    #[test]
    fn test_debug_counts() {
        // [3, 2]: one composite, three leaves, six points
        let out = run(&[3, 2], DebugLayers::DEFAULT);
        assert_eq!(out.debug.len(), 1 + 3 + 6);

        let out = run(&[3, 2], DebugLayers::all());
        assert_eq!(out.debug.len(), 1 + 3 + 3 + 6);
    }

    #[test]
    fn test_single_unit_fills_canvas() {
        let out = run(&[1], DebugLayers::empty());
        assert_eq!(out.circles.len(), 1);

        let rect = out.circles[0].rect;
        assert!((rect.width - 0.9 * 400.0).abs() < 1e-9);
        assert_eq!(rect.center().x, 200.0);
        assert_eq!(rect.center().y, 200.0);
    }

    #[test]
    fn test_draw_circle_lerp_endpoints() {
        let a = DrawCircleData::new(Rect::new(0.0, 0.0, 2.0, 2.0), Color::BLACK, Color::TRANSPARENT);
        let b = DrawCircleData::new(Rect::new(10.0, 10.0, 4.0, 4.0), Color::WHITE, Color::BLACK);

        assert_eq!(DrawCircleData::lerp(&a, &b, 0.0), a);
        assert_eq!(DrawCircleData::lerp(&a, &b, 1.0), b);
    }
}
