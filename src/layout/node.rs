//! Circle tree - one node per factor level.
//!
//! A factor list `[n1, n2, ..., nk]` becomes a tree of depth `k`: the root
//! holds `n1` children, each holding `n2` children, and so on down to leaves
//! holding `nk` points. Leaves reserve a contiguous block of identifiers from
//! the [`LayoutContext`], in pre-order, left to right; the identifier picks
//! the hue of each point.

use crate::error::{ConvergenceWarning, FactorError, FactorResult};
use crate::types::{Point, DEFAULT_BASE_ANGLE};

// =============================================================================
// Layout Context
// =============================================================================

/// State threaded through tree construction and placement.
///
/// Owns the identifier counter and collects convergence warnings, so
/// independent layouts never share anything.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    next_id: usize,
    pub(crate) tolerance: f64,
    pub(crate) max_iterations: usize,
    warnings: Vec<ConvergenceWarning>,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new(1e-3, 10_000)
    }
}

impl LayoutContext {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            next_id: 0,
            tolerance,
            max_iterations,
            warnings: Vec::new(),
        }
    }

    /// Reserve `n` identifiers, returning the first.
    pub fn reserve_ids(&mut self, n: usize) -> usize {
        let id = self.next_id;
        self.next_id += n;
        id
    }

    /// Identifiers handed out so far. After construction this is the number
    /// of points in the tree.
    pub fn total_ids(&self) -> usize {
        self.next_id
    }

    pub fn warnings(&self) -> &[ConvergenceWarning] {
        &self.warnings
    }

    pub(crate) fn warn(&mut self, warning: ConvergenceWarning) {
        self.warnings.push(warning);
    }

    pub fn take_warnings(&mut self) -> Vec<ConvergenceWarning> {
        std::mem::take(&mut self.warnings)
    }
}

// =============================================================================
// Circle Node
// =============================================================================

/// What a node holds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Last factor level: `points.len()` units on a ring.
    /// Points are offsets relative to the node's unit circle.
    Leaf { id: usize, points: Vec<Point> },
    /// Inner factor level.
    Composite { children: Vec<CircleNode> },
}

/// One circle of the factor tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleNode {
    /// Position among siblings.
    pub index: usize,
    pub center: Point,
    pub radius: f64,
    /// Angle of the first child/point.
    pub base_angle: f64,
    pub kind: NodeKind,
}

impl CircleNode {
    /// Build the tree for a factor list.
    pub fn build(factors: &[u64], ctx: &mut LayoutContext) -> FactorResult<Self> {
        Self::build_at(0, factors, ctx)
    }

    fn build_at(index: usize, factors: &[u64], ctx: &mut LayoutContext) -> FactorResult<Self> {
        let kind = match factors {
            [] => return Err(FactorError::assertion("empty factor list")),
            [p] => {
                let count = to_count(*p)?;
                if count == 0 {
                    return Err(FactorError::assertion("leaf with zero points"));
                }
                NodeKind::Leaf {
                    id: ctx.reserve_ids(count),
                    points: vec![Point::ORIGIN; count],
                }
            }
            [n1, rest @ ..] => {
                let count = to_count(*n1)?;
                if count == 0 {
                    return Err(FactorError::assertion("composite with zero children"));
                }
                let children = (0..count)
                    .map(|i| Self::build_at(i, rest, ctx))
                    .collect::<FactorResult<Vec<_>>>()?;
                NodeKind::Composite { children }
            }
        };

        Ok(Self {
            index,
            center: Point::UNIT_CENTER,
            radius: 0.5,
            base_angle: DEFAULT_BASE_ANGLE,
            kind,
        })
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// `max(child count, point count)`.
    pub fn size(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { points, .. } => points.len(),
            NodeKind::Composite { children } => children.len(),
        }
    }

    pub fn children(&self) -> &[CircleNode] {
        match &self.kind {
            NodeKind::Composite { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// Relative point offsets (empty for composites).
    pub fn points(&self) -> &[Point] {
        match &self.kind {
            NodeKind::Leaf { points, .. } => points,
            NodeKind::Composite { .. } => &[],
        }
    }

    /// Base identifier of a leaf.
    pub fn id(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Leaf { id, .. } => Some(id),
            NodeKind::Composite { .. } => None,
        }
    }

    /// Absolute position of this leaf's `i`-th point.
    pub fn point(&self, i: usize) -> Option<Point> {
        self.points()
            .get(i)
            .map(|&p| self.center.offset(p, self.radius))
    }

    /// Absolute positions of every point below this node, in pre-order.
    pub fn absolute_points(&self) -> Vec<Point> {
        let mut out = Vec::new();
        self.collect_points(&mut out);
        out
    }

    pub(crate) fn collect_points(&self, out: &mut Vec<Point>) {
        match &self.kind {
            NodeKind::Leaf { points, .. } => {
                out.extend(points.iter().map(|&p| self.center.offset(p, self.radius)));
            }
            NodeKind::Composite { children } => {
                for child in children {
                    child.collect_points(out);
                }
            }
        }
    }

    /// Number of points below this node.
    pub fn point_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { points, .. } => points.len(),
            NodeKind::Composite { children } => children.iter().map(|c| c.point_count()).sum(),
        }
    }

    /// Number of leaves below this node.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Composite { children } => children.iter().map(|c| c.leaf_count()).sum(),
        }
    }

    /// Rigidly move the subtree so this node's center lands on `target`.
    pub fn move_to(&mut self, target: Point) {
        let dx = target.x - self.center.x;
        let dy = target.y - self.center.y;
        self.move_by(dx, dy);
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.center.x += dx;
        self.center.y += dy;

        if let NodeKind::Composite { children } = &mut self.kind {
            for child in children {
                child.move_by(dx, dy);
            }
        }
    }
}

fn to_count(factor: u64) -> FactorResult<usize> {
    usize::try_from(factor)
        .map_err(|_| FactorError::assertion(format!("factor {} does not fit in usize", factor)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_factor_is_leaf() {
        let mut ctx = LayoutContext::default();
        let root = CircleNode::build(&[5], &mut ctx).unwrap();

        assert!(root.is_leaf());
        assert_eq!(root.size(), 5);
        assert_eq!(root.id(), Some(0));
        assert_eq!(ctx.total_ids(), 5);
    }

    #[test]
    fn test_composite_shape() {
        let mut ctx = LayoutContext::default();
        let root = CircleNode::build(&[3, 2, 2], &mut ctx).unwrap();

        assert!(!root.is_leaf());
        assert_eq!(root.size(), 3);
        assert_eq!(root.children()[0].size(), 2);
        assert!(root.children()[0].children()[0].is_leaf());
        assert_eq!(root.leaf_count(), 6);
        assert_eq!(root.point_count(), 12);
        assert_eq!(ctx.total_ids(), 12);
    }

    #[test]
    fn test_ids_are_preorder_blocks() {
        let mut ctx = LayoutContext::default();
        let root = CircleNode::build(&[2, 3], &mut ctx).unwrap();

        let ids: Vec<_> = root.children().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![Some(0), Some(3)]);
        assert_eq!(root.children()[1].index, 1);
    }

    #[test]
    fn test_empty_and_zero_factors_fail() {
        let mut ctx = LayoutContext::default();
        assert!(matches!(CircleNode::build(&[], &mut ctx), Err(FactorError::Assertion(_))));
        assert!(matches!(CircleNode::build(&[0], &mut ctx), Err(FactorError::Assertion(_))));
        assert!(CircleNode::build(&[2, 0], &mut ctx).is_err());
    }

    #[test]
    fn test_move_by_moves_subtree() {
        let mut ctx = LayoutContext::default();
        let mut root = CircleNode::build(&[2, 2], &mut ctx).unwrap();

        root.move_to(Point::new(1.5, 0.5));

        assert_eq!(root.center, Point::new(1.5, 0.5));
        for child in root.children() {
            assert_eq!(child.center, Point::new(1.5, 0.5));
        }
    }
}
