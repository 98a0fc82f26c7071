//! Layout integration tests: packing, fitting and flattening whole trees.
//!
//! Run with: cargo test --test layout

use factor_circles::{
    fit, CircleNode, FactorConfig, FactorLayout, LayoutContext, PrimeSet, Size,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-3;

fn placed(factors: &[u64]) -> CircleNode {
    let mut ctx = LayoutContext::default();
    let mut root = CircleNode::build(factors, &mut ctx).unwrap();
    root.place(&mut ctx).unwrap();
    assert!(ctx.warnings().is_empty(), "{:?} did not converge", factors);
    root
}

/// Closest pair inside any one child of the root.
fn closest_within_children(root: &CircleNode) -> f64 {
    root.children()
        .iter()
        .filter_map(CircleNode::closest_point_distance)
        .fold(f64::INFINITY, f64::min)
}

fn assert_rings_do_not_overlap(root: &CircleNode) {
    let within = closest_within_children(root);
    let across = root.closest_circle_circle_distance().unwrap();

    // Converged: neighbouring groups sit exactly one inner spacing apart
    assert!(
        (across - within).abs() < 2.0 * TOLERANCE,
        "across {across}, within {within}"
    );
    assert!(root.closest_point_distance().unwrap() >= within - 2.0 * TOLERANCE);
}

#[test]
fn test_twelve_packs_without_overlap() {
    assert_rings_do_not_overlap(&placed(&[2, 2, 3]));
    assert_rings_do_not_overlap(&placed(&[3, 2, 2]));
}

#[test]
fn test_thirty_packs_without_overlap() {
    assert_rings_do_not_overlap(&placed(&[2, 3, 5]));
    assert_rings_do_not_overlap(&placed(&[5, 3, 2]));
}

#[test]
fn test_deep_binary_tree_converges() {
    // 1024 units, ten levels of pairs
    let root = placed(&[2; 10]);
    assert_eq!(root.point_count(), 1024);
    assert_rings_do_not_overlap(&root);
}

#[test]
fn test_drawables_do_not_overlap() {
    let config = FactorConfig::default();
    let mut primes = PrimeSet::new();
    let layout = FactorLayout::calculate(30, &mut primes, &config).unwrap();
    let circles = layout.generate(Size::new(600.0, 400.0), false, &config).circles;

    assert_eq!(circles.len(), 30);
    for (i, a) in circles.iter().enumerate() {
        for b in &circles[i + 1..] {
            let d = a.rect.center().distance(b.rect.center());
            assert!(d >= a.rect.width - 1e-6, "overlap at distance {d}");
        }
    }
}

#[test]
fn test_single_unit_fills_canvas() {
    let config = FactorConfig::default();
    let mut primes = PrimeSet::new();
    let layout = FactorLayout::calculate(1, &mut primes, &config).unwrap();
    let circles = layout.generate(Size::new(300.0, 300.0), false, &config).circles;

    assert_eq!(circles.len(), 1);
    assert!((circles[0].rect.width - 270.0).abs() < 1e-9);
    assert_eq!(circles[0].rect.center().x, 150.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_unit_is_drawn_inside_canvas(n in 1u64..=256, w in 50.0f64..800.0, h in 50.0f64..800.0) {
        let config = FactorConfig::default();
        let mut primes = PrimeSet::new();
        let layout = FactorLayout::calculate(n, &mut primes, &config).unwrap();
        let circles = layout.generate(Size::new(w, h), false, &config).circles;

        prop_assert_eq!(circles.len() as u64, n);
        for c in &circles {
            let p = c.rect.center();
            prop_assert!(p.x >= -1e-6 && p.x <= w + 1e-6);
            prop_assert!(p.y >= -1e-6 && p.y <= h + 1e-6);
        }
    }

    #[test]
    fn fit_is_idempotent(n in 1u64..=256) {
        let config = FactorConfig::default();
        let mut primes = PrimeSet::new();
        let layout = FactorLayout::calculate(n, &mut primes, &config).unwrap();

        prop_assert_eq!(fit(&layout.root), layout.fit);
        prop_assert_eq!(fit(&layout.root), fit(&layout.root));
    }
}
