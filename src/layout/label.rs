//! Label - number and factorization text, plus its panel layout.
//!
//! The panel sits `margin` from the top-left corner, is as wide as the wider
//! line and two lines tall; the narrower line is centered under the wider
//! one. Layout goes through Taffy so the same flexbox rules apply whatever
//! units the metrics use (terminal cells or pixels).

use taffy::{
    AlignItems, AvailableSpace, Dimension, FlexDirection, LengthPercentage, NodeId, Style,
    TaffyTree,
};
use unicode_width::UnicodeWidthStr;

use crate::config::LabelMetrics;
use crate::error::{FactorError, FactorResult};
use crate::prime::factors_text;
use crate::types::{Point, Rect, Size};

/// Text shown next to the picture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    /// The number itself, e.g. `"12"`.
    pub number_text: String,
    /// `"3x2x2"`, or `"Prime"` for a single factor.
    pub factors_text: String,
}

impl Label {
    pub fn new(number: u64, factors: &[u64]) -> Self {
        Self {
            number_text: number.to_string(),
            factors_text: factors_text(factors),
        }
    }
}

/// Positions of the label panel and its two lines, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub panel: Rect,
    /// Top-left of the number line.
    pub number_origin: Point,
    /// Top-left of the factors line.
    pub factors_origin: Point,
}

/// Measured width of a line.
pub fn text_width(text: &str, metrics: &LabelMetrics) -> f32 {
    UnicodeWidthStr::width(text) as f32 * metrics.char_width
}

/// Lay out the label panel inside a canvas.
pub fn layout_label(
    label: &Label,
    metrics: &LabelMetrics,
    canvas: Size,
) -> FactorResult<LabelLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    // Pixel metrics are fractional; keep exact centering.
    tree.disable_rounding();

    let line = |tree: &mut TaffyTree<()>, text: &str| -> FactorResult<NodeId> {
        let style = Style {
            size: taffy::Size {
                width: Dimension::Length(text_width(text, metrics)),
                height: Dimension::Length(metrics.line_height),
            },
            ..Default::default()
        };
        tree.new_leaf(style).map_err(layout_error)
    };

    let number_line = line(&mut tree, &label.number_text)?;
    let factors_line = line(&mut tree, &label.factors_text)?;

    let panel = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                align_items: Some(AlignItems::Center),
                ..Default::default()
            },
            &[number_line, factors_line],
        )
        .map_err(layout_error)?;

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                align_items: Some(AlignItems::FlexStart),
                size: taffy::Size {
                    width: Dimension::Length(canvas.width as f32),
                    height: Dimension::Length(canvas.height as f32),
                },
                padding: taffy::Rect {
                    left: LengthPercentage::Length(metrics.margin),
                    right: LengthPercentage::Length(0.0),
                    top: LengthPercentage::Length(metrics.margin),
                    bottom: LengthPercentage::Length(0.0),
                },
                ..Default::default()
            },
            &[panel],
        )
        .map_err(layout_error)?;

    let available = taffy::Size {
        width: AvailableSpace::Definite(canvas.width as f32),
        height: AvailableSpace::Definite(canvas.height as f32),
    };
    tree.compute_layout(root, available).map_err(layout_error)?;

    let panel_layout = tree.layout(panel).map_err(layout_error)?;
    let number_layout = tree.layout(number_line).map_err(layout_error)?;
    let factors_layout = tree.layout(factors_line).map_err(layout_error)?;

    // Child locations are relative to their parent.
    let px = panel_layout.location.x as f64;
    let py = panel_layout.location.y as f64;
    let origin = |l: &taffy::Layout| Point::new(px + l.location.x as f64, py + l.location.y as f64);

    Ok(LabelLayout {
        panel: Rect::new(
            px,
            py,
            panel_layout.size.width as f64,
            panel_layout.size.height as f64,
        ),
        number_origin: origin(number_layout),
        factors_origin: origin(factors_layout),
    })
}

fn layout_error(err: taffy::TaffyError) -> FactorError {
    FactorError::Layout(err.to_string())
}

// =============================================================================
// Tests
// =============================================================================
