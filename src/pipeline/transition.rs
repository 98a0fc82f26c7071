//! Transition - animated morph between successive draw lists.
//!
//! Circles are paired by position: the i-th circle of the new list starts
//! from whatever the i-th circle of the old list shows on screen right now.
//! New circles grow out of the canvas center from transparent; surplus old
//! circles shrink into it and are dropped when the transition ends.
//!
//! # Step size
//!
//! Each tick moves the on-screen state a fraction `1 / (total - elapsed)` of
//! the remaining way to the target. The fraction grows every tick, the last
//! interpolating tick uses `1/1` and lands exactly on the target, and the
//! tick after that ends the transition.

use tracing::trace;

use crate::layout::DrawCircleData;
use crate::types::{Color, Point, Rect, Size};

/// Size of the dot a fading circle shrinks into.
const FADE_OUT_SIZE: f64 = 0.1;

/// One animated circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCircle {
    /// Target state.
    pub data: DrawCircleData,
    /// Current on-screen state while animating, `None` once settled.
    pub old: Option<DrawCircleData>,
    /// Left over from the previous list; removed when the transition ends.
    pub fading: bool,
}

impl DrawCircle {
    pub fn settled(data: DrawCircleData) -> Self {
        Self {
            data,
            old: None,
            fading: false,
        }
    }

    /// What a renderer should draw right now.
    #[inline]
    pub fn visual(&self) -> DrawCircleData {
        self.old.unwrap_or(self.data)
    }
}

/// Cross-frame animation state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    circles: Vec<DrawCircle>,
    iterations: u32,
    count: u32,
    active: bool,
}

impl Transition {
    /// `iterations == 0` turns every `begin` into a snap.
    pub fn new(iterations: u32) -> Self {
        Self {
            circles: Vec::new(),
            iterations,
            count: 0,
            active: false,
        }
    }

    pub fn circles(&self) -> &[DrawCircle] {
        &self.circles
    }

    /// Current on-screen state of every circle.
    pub fn visuals(&self) -> Vec<DrawCircleData> {
        self.circles.iter().map(DrawCircle::visual).collect()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active
    }

    /// Ticks elapsed in the current transition.
    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.count
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Start animating toward `targets`.
    ///
    /// Replaces any running transition; its current interpolated state
    /// becomes the starting point.
    pub fn begin(&mut self, targets: Vec<DrawCircleData>, canvas_center: Point) {
        if self.iterations == 0 {
            self.snap(targets);
            return;
        }

        let previous = self.visuals();
        let n_new = targets.len();

        let mut circles: Vec<DrawCircle> = targets
            .into_iter()
            .enumerate()
            .map(|(i, data)| {
                let old = previous.get(i).copied().unwrap_or_else(|| {
                    DrawCircleData::new(
                        Rect::centered(canvas_center, data.rect.size()),
                        Color::TRANSPARENT,
                        Color::TRANSPARENT,
                    )
                });
                DrawCircle {
                    data,
                    old: Some(old),
                    fading: false,
                }
            })
            .collect();

        let fade_target = DrawCircleData::new(
            Rect::centered(canvas_center, Size::new(FADE_OUT_SIZE, FADE_OUT_SIZE)),
            Color::TRANSPARENT,
            Color::TRANSPARENT,
        );
        circles.extend(previous.iter().skip(n_new).map(|&old| DrawCircle {
            data: fade_target,
            old: Some(old),
            fading: true,
        }));

        trace!(
            circles = n_new,
            fading = circles.len() - n_new,
            "transition started"
        );

        self.circles = circles;
        self.count = 0;
        self.active = !self.circles.is_empty();
    }

    /// Show `targets` immediately.
    pub fn snap(&mut self, targets: Vec<DrawCircleData>) {
        self.circles = targets.into_iter().map(DrawCircle::settled).collect();
        self.count = 0;
        self.active = false;
    }

    /// Advance one frame. Returns true while still animating.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.count += 1;

        match step_fraction(self.iterations, self.count) {
            Some(f) => {
                for circle in &mut self.circles {
                    if let Some(old) = circle.old {
                        circle.old = Some(DrawCircleData::lerp(&old, &circle.data, f));
                    }
                }
                trace!(tick = self.count, f, "transition step");
                true
            }
            None => {
                self.circles.retain(|c| !c.fading);
                for circle in &mut self.circles {
                    circle.old = None;
                }
                self.active = false;
                trace!(circles = self.circles.len(), "transition finished");
                false
            }
        }
    }
}

/// Interpolation fraction for tick `count` of `iterations`, `None` once the
/// transition is over.
pub fn step_fraction(iterations: u32, count: u32) -> Option<f64> {
    if count < iterations {
        Some(1.0 / f64::from(iterations - count))
    } else {
        None
    }
}

// =============================================================================
// Tests
// =============================================================================
