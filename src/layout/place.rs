//! Placement - recursive ring packing.
//!
//! Children are placed first, each in its own unit frame. A composite then
//! spreads its children evenly on a ring and searches for the ring radius at
//! which the closest pair of points from different children is as far apart
//! as the closest pair inside any single child.
//!
//! # Convergence
//!
//! ```text
//! rr = min(child.closest_point_distance) / 2      target half-spacing
//! r1 = closest_circle_circle_distance / 2          current half-spacing
//! radius += |r1 - rr| / 2   if r1 < rr
//! radius -= |r1 - rr| / 2   otherwise
//! ```
//!
//! The loop stops once `|r1 - rr|` drops below the context tolerance. It is
//! capped at `max_iterations`; hitting the cap keeps the last radius and
//! records a [`ConvergenceWarning`].

use std::f64::consts::FRAC_PI_2;

use tracing::warn;

use crate::error::{ConvergenceWarning, FactorError, FactorResult};
use crate::types::{angle_step, Point};

use super::node::{CircleNode, LayoutContext, NodeKind};

impl CircleNode {
    /// Place this node and everything below it.
    pub fn place(&mut self, ctx: &mut LayoutContext) -> FactorResult<()> {
        self.place_at(0, ctx)
    }

    fn place_at(&mut self, depth: usize, ctx: &mut LayoutContext) -> FactorResult<()> {
        let size = self.size();
        let base_angle = self.base_angle;

        self.center = Point::UNIT_CENTER;
        self.radius = 0.5;

        let children = match &mut self.kind {
            NodeKind::Leaf { points, .. } => {
                place_points(points, base_angle);
                return Ok(());
            }
            NodeKind::Composite { children } => children,
        };

        // Child rings start where the parent's ring starts; two binary
        // splits in a row are turned a quarter so they don't stack in a line.
        let da = angle_step(children.len());
        let mut a = base_angle;
        for child in children.iter_mut() {
            child.base_angle = if size == 2 && child.size() == 2 {
                a + FRAC_PI_2
            } else {
                a
            };
            child.place_at(depth + 1, ctx)?;
            a += da;
        }

        let mut d = f64::INFINITY;
        for child in children.iter() {
            let child_d = child.closest_point_distance().ok_or_else(|| {
                FactorError::assertion("composite child without a pair of points")
            })?;
            d = d.min(child_d);
        }
        let rr = d / 2.0;

        if children.len() < 2 {
            // Nothing to keep apart.
            self.radius = 0.0;
            self.arrange_children();
            return Ok(());
        }

        // Children only translate from here on.
        let groups: Vec<RigidGroup> = children.iter().map(RigidGroup::of).collect();

        let mut iterations = 0;
        loop {
            self.arrange_children();

            let centers: Vec<Point> = self.children().iter().map(|c| c.center).collect();
            let r1 = match closest_between_groups(&groups, &centers) {
                Some(distance) => distance / 2.0,
                None => break,
            };

            let dr = (r1 - rr).abs();
            if dr < ctx.tolerance {
                break;
            }

            iterations += 1;
            if iterations >= ctx.max_iterations || !self.radius.is_finite() {
                let warning = ConvergenceWarning {
                    depth,
                    iterations,
                    radius: self.radius,
                    discrepancy: dr,
                };
                warn!(
                    depth,
                    iterations,
                    radius = self.radius,
                    discrepancy = dr,
                    "ring placement did not converge, keeping last radius"
                );
                ctx.warn(warning);
                break;
            }

            if r1 < rr {
                self.radius += dr / 2.0;
            } else {
                self.radius -= dr / 2.0;
            }
        }

        Ok(())
    }

    /// Move each child onto this node's ring at the current radius.
    fn arrange_children(&mut self) {
        let center = self.center;
        let radius = self.radius;
        let mut a = self.base_angle;

        if let NodeKind::Composite { children } = &mut self.kind {
            let da = angle_step(children.len());
            for child in children.iter_mut() {
                child.move_to(center.offset(Point::on_unit_circle(a), radius));
                a += da;
            }
        }
    }

    /// Closest distance between two points that belong to different
    /// immediate children. `None` for leaves and single-child nodes.
    pub fn closest_circle_circle_distance(&self) -> Option<f64> {
        let children = self.children();
        let groups: Vec<RigidGroup> = children.iter().map(RigidGroup::of).collect();
        let centers: Vec<Point> = children.iter().map(|c| c.center).collect();
        closest_between_groups(&groups, &centers)
    }

    /// Closest distance between any two points below this node.
    /// `None` when there are fewer than two points.
    pub fn closest_point_distance(&self) -> Option<f64> {
        closest_distance_sq(&self.absolute_points()).map(f64::sqrt)
    }
}

/// Spread points evenly on the unit circle starting at `base_angle`.
/// A single point sits on the center.
fn place_points(points: &mut [Point], base_angle: f64) {
    if points.len() > 1 {
        let da = angle_step(points.len());
        let mut a = base_angle;
        for point in points.iter_mut() {
            *point = Point::on_unit_circle(a);
            a += da;
        }
    } else if let Some(point) = points.first_mut() {
        *point = Point::ORIGIN;
    }
}

/// Points of a child relative to its center, plus the farthest of them.
#[derive(Debug, Clone)]
struct RigidGroup {
    offsets: Vec<Point>,
    reach: f64,
}

impl RigidGroup {
    fn of(node: &CircleNode) -> Self {
        let c = node.center;
        let offsets: Vec<Point> = node
            .absolute_points()
            .into_iter()
            .map(|p| Point::new(p.x - c.x, p.y - c.y))
            .collect();
        let reach = offsets
            .iter()
            .map(|&p| p.distance(Point::ORIGIN))
            .fold(0.0, f64::max);
        Self { offsets, reach }
    }

    fn at(&self, center: Point) -> impl Iterator<Item = Point> + '_ {
        self.offsets
            .iter()
            .map(move |p| Point::new(center.x + p.x, center.y + p.y))
    }

    /// Points of the group at `center` lying within `radius` of `target`.
    fn within(&self, center: Point, target: Point, radius: f64) -> Vec<Point> {
        self.at(center)
            .filter(|p| p.distance_sq(target) <= radius * radius)
            .collect()
    }

    /// Squared closest distance between this group at `center` and `other`
    /// at `other_center`. `None` when no pair can get under `bound_sq`.
    fn closest_sq(
        &self,
        center: Point,
        other: &RigidGroup,
        other_center: Point,
        bound_sq: Option<f64>,
    ) -> Option<f64> {
        if self.offsets.is_empty() || other.offsets.is_empty() {
            return None;
        }

        let gap = center.distance(other_center) - self.reach - other.reach;
        if let Some(bound) = bound_sq {
            if gap > 0.0 && gap * gap > bound {
                return None;
            }
        }

        // Cheap upper bound: the point nearest the other center and its
        // nearest partner.
        let (_, a0) = nearest_to(self.at(center), other_center)?;
        let (seed, _) = nearest_to(other.at(other_center), a0)?;

        let mut best = bound_sq.map_or(seed, |b| b.min(seed));

        // A pair closer than `best` has each point within `reach + √best`
        // of the other group's center.
        let limit = best.sqrt() * (1.0 + 1e-9) + 1e-12;
        let mine = self.within(center, other_center, other.reach + limit);
        let theirs = other.within(other_center, center, self.reach + limit);

        for &p1 in &mine {
            for &p2 in &theirs {
                best = best.min(p1.distance_sq(p2));
            }
        }

        Some(best.min(seed))
    }
}

fn nearest_to(points: impl Iterator<Item = Point>, target: Point) -> Option<(f64, Point)> {
    points
        .map(|p| (p.distance_sq(target), p))
        .min_by(|a, b| a.0.total_cmp(&b.0))
}

/// Closest distance between points of different groups, each group placed
/// at the matching center.
fn closest_between_groups(groups: &[RigidGroup], centers: &[Point]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (i, (g1, &c1)) in groups.iter().zip(centers).enumerate() {
        for (g2, &c2) in groups.iter().zip(centers).skip(i + 1) {
            if let Some(d) = g1.closest_sq(c1, g2, c2, best) {
                best = Some(best.map_or(d, |b| b.min(d)));
            }
        }
    }
    best.map(f64::sqrt)
}

/// Smallest squared pairwise distance.
pub(crate) fn closest_distance_sq(points: &[Point]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (i, &p1) in points.iter().enumerate() {
        for &p2 in &points[i + 1..] {
            let d = p1.distance_sq(p2);
            best = Some(best.map_or(d, |b| b.min(d)));
        }
    }
    best
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(factors: &[u64]) -> (CircleNode, LayoutContext) {
        let mut ctx = LayoutContext::default();
        let mut root = CircleNode::build(factors, &mut ctx).unwrap();
        root.place(&mut ctx).unwrap();
        (root, ctx)
    }

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_single_point_sits_on_center() {
        let (root, _) = placed(&[1]);
        assert_eq!(root.points(), &[Point::ORIGIN]);
        assert_eq!(root.point(0), Some(Point::UNIT_CENTER));
    }

    #[test]
    fn test_leaf_ring_starts_at_top() {
        let (root, _) = placed(&[4]);
        let first = root.points()[0];
        assert!(approx(first.x, 0.0, 1e-12));
        assert!(approx(first.y, -1.0, 1e-12));

        let second = root.points()[1];
        assert!(approx(second.x, 1.0, 1e-12));
        assert!(approx(second.y, 0.0, 1e-12));
    }

    #[test]
    fn test_binary_of_binary_turns_children() {
        let (root, _) = placed(&[2, 2]);
        let child_angle = root.children()[0].base_angle;
        assert!(approx(child_angle, root.base_angle + FRAC_PI_2, 1e-12));
    }

    #[test]
    fn test_non_binary_children_inherit_angle() {
        let (root, _) = placed(&[3, 2]);
        let da = angle_step(3);
        for (i, child) in root.children().iter().enumerate() {
            assert!(approx(child.base_angle, root.base_angle + i as f64 * da, 1e-12));
        }
    }

    #[test]
    fn test_composite_converges_to_child_spacing() {
        let (root, ctx) = placed(&[3, 2]);
        assert!(ctx.warnings().is_empty());

        let rr = root.children()[0].closest_point_distance().unwrap() / 2.0;
        let r1 = root.closest_circle_circle_distance().unwrap() / 2.0;
        assert!(approx(r1, rr, 1e-3));
    }

    #[test]
    fn test_children_sit_on_ring() {
        let (root, _) = placed(&[3, 3]);
        for child in root.children() {
            assert!(approx(child.center.distance(root.center), root.radius.abs(), 1e-9));
        }
    }

    #[test]
    fn test_no_cross_child_overlap_after_placement() {
        let (root, _) = placed(&[2, 3, 5]);
        let spacing = root.closest_point_distance().unwrap();
        let inner = root
            .children()
            .iter()
            .filter_map(|c| c.closest_point_distance())
            .fold(f64::INFINITY, f64::min);
        // Cross-child spacing never undercuts the inner spacing by more than
        // the tolerance.
        assert!(spacing > inner - 2e-3);
    }

    #[test]
    fn test_iteration_cap_records_warning() {
        let mut ctx = LayoutContext::new(1e-12, 1);
        let mut root = CircleNode::build(&[3, 2], &mut ctx).unwrap();
        root.place(&mut ctx).unwrap();

        assert_eq!(ctx.warnings().len(), 1);
        assert_eq!(ctx.warnings()[0].depth, 0);
        assert!(root.radius.is_finite());
    }

    fn brute_force_cross_distance(node: &CircleNode) -> Option<f64> {
        let groups: Vec<Vec<Point>> = node.children().iter().map(|c| c.absolute_points()).collect();
        let mut best: Option<f64> = None;
        for (i, g1) in groups.iter().enumerate() {
            for g2 in &groups[i + 1..] {
                for &p1 in g1 {
                    for &p2 in g2 {
                        let d = p1.distance(p2);
                        best = Some(best.map_or(d, |b| b.min(d)));
                    }
                }
            }
        }
        best
    }

    #[test]
    fn test_cross_distance_matches_full_scan() {
        for factors in [&[2, 2][..], &[3, 2, 2], &[2, 3, 5], &[5, 3], &[2, 2, 2, 2, 2], &[7, 2, 3]] {
            let (root, _) = placed(factors);
            let fast = root.closest_circle_circle_distance().unwrap();
            let full = brute_force_cross_distance(&root).unwrap();
            assert!(approx(fast, full, 1e-12), "{factors:?}: {fast} vs {full}");
        }
    }

    #[test]
    fn test_cross_distance_while_groups_overlap() {
        // Squeeze the ring so the children interpenetrate.
        let (mut root, _) = placed(&[3, 4]);
        root.radius = 0.2;
        root.arrange_children();

        let fast = root.closest_circle_circle_distance().unwrap();
        let full = brute_force_cross_distance(&root).unwrap();
        assert!(approx(fast, full, 1e-12));
    }

    #[test]
    fn test_closest_distances_on_leaf() {
        let (root, _) = placed(&[2]);
        assert_eq!(root.closest_circle_circle_distance(), None);
        // Two points on a ring of radius 0.5, opposite each other
        assert!(approx(root.closest_point_distance().unwrap(), 1.0, 1e-12));
    }
}
