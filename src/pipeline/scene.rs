//! Factor Scene - the layout driver.
//!
//! Owns everything that survives between frames: the prime cache, the
//! current layout, the canvas size, the debug flag and the animated draw
//! list. Hosts feed it input and ticks and read drawables back.
//!
//! ```text
//! set_target_number ─► FactorLayout::calculate ─► generate ─► Transition::begin
//! set_canvas_size   ─► generate ─► Transition::snap
//! set_debug_mode    ─► generate (debug list only)
//! tick              ─► Transition::tick
//! ```
//!
//! Number, factors and debug flag are published as signals so a label or a
//! status line can be derived reactively (see
//! [`create_label_derived`](super::create_label_derived)).

use spark_signals::{signal, Signal};
use tracing::{debug, trace, warn};

use crate::config::FactorConfig;
use crate::error::{ConvergenceWarning, FactorError, FactorResult};
use crate::layout::{layout_label, DrawCircleData, FactorLayout, Generated, Label, LabelLayout};
use crate::prime::PrimeSet;
use crate::types::Size;

use super::transition::{DrawCircle, Transition};

/// Interactive factorization scene.
pub struct FactorScene {
    config: FactorConfig,
    primes: PrimeSet,
    layout: Option<FactorLayout>,
    canvas: Size,
    transition: Transition,
    debug_circles: Vec<DrawCircleData>,

    number: Signal<u64>,
    factors: Signal<Vec<u64>>,
    debug: Signal<bool>,
}

impl FactorScene {
    /// Create an empty scene. Nothing is drawn until a number is set.
    pub fn new(config: FactorConfig, canvas: Size) -> FactorResult<Self> {
        config.validate()?;

        Ok(Self {
            transition: Transition::new(config.anim_iterations),
            config,
            primes: PrimeSet::new(),
            layout: None,
            canvas,
            debug_circles: Vec::new(),
            number: signal(0),
            factors: signal(Vec::new()),
            debug: signal(false),
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Switch to a new number and start animating toward it.
    ///
    /// Returns `Ok(false)` when `n` is already shown. On error the scene is
    /// left exactly as it was.
    pub fn set_target_number(&mut self, n: i64) -> FactorResult<bool> {
        let number = match u64::try_from(n) {
            Ok(number) if number > 0 => number,
            _ => {
                warn!(n, "rejected non-positive number");
                return Err(FactorError::invalid_input(format!(
                    "{n} is not a positive integer"
                )));
            }
        };

        if number > self.config.max_units {
            warn!(number, max = self.config.max_units, "rejected number above limit");
            return Err(FactorError::invalid_input(format!(
                "{number} exceeds the limit of {}",
                self.config.max_units
            )));
        }

        if self.number() == Some(number) {
            return Ok(false);
        }

        let layout = FactorLayout::calculate(number, &mut self.primes, &self.config)?;

        let generated = self.generate(&layout);
        self.transition.begin(generated.circles, self.canvas.center());
        self.debug_circles = generated.debug;

        self.number.set(number);
        self.factors.set(layout.factors.clone());
        self.layout = Some(layout);

        debug!(number, "target number set");
        Ok(true)
    }

    /// Parse and apply a typed number.
    pub fn set_target_text(&mut self, text: &str) -> FactorResult<bool> {
        let text = text.trim();
        let n: i64 = text.parse().map_err(|_| {
            warn!(text, "rejected unparsable input");
            FactorError::invalid_input(format!("{text:?} is not an integer"))
        })?;
        self.set_target_number(n)
    }

    /// Toggle the debug overlay. Does not restart a running transition.
    pub fn set_debug_mode(&mut self, debug: bool) {
        if self.debug.get() == debug {
            return;
        }
        self.debug.set(debug);

        if let Some(layout) = &self.layout {
            self.debug_circles = self.generate(layout).debug;
        }
    }

    /// Resize the canvas. The picture jumps to the new size without animating.
    pub fn set_canvas_size(&mut self, canvas: Size) {
        if self.canvas == canvas {
            return;
        }
        self.canvas = canvas;

        if let Some(layout) = &self.layout {
            let generated = self.generate(layout);
            self.transition.snap(generated.circles);
            self.debug_circles = generated.debug;
        }
        trace!(width = canvas.width, height = canvas.height, "canvas resized");
    }

    /// Advance the animation by one frame. Returns true while animating.
    pub fn tick(&mut self) -> bool {
        self.transition.tick()
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Current on-screen state of every circle, in draw order.
    pub fn drawables(&self) -> Vec<DrawCircleData> {
        self.transition.visuals()
    }

    /// Circles with their animation state.
    pub fn draw_circles(&self) -> &[DrawCircle] {
        self.transition.circles()
    }

    /// Debug overlay, drawn on top of the circles. Empty unless debug is on.
    pub fn debug_drawables(&self) -> &[DrawCircleData] {
        &self.debug_circles
    }

    pub fn label(&self) -> Label {
        self.layout
            .as_ref()
            .map(FactorLayout::label)
            .unwrap_or_default()
    }

    /// Panel position of the label on the current canvas.
    pub fn label_layout(&self) -> FactorResult<LabelLayout> {
        layout_label(&self.label(), &self.config.label, self.canvas)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Number currently shown (or being animated toward).
    pub fn number(&self) -> Option<u64> {
        self.layout.as_ref().map(|l| l.number)
    }

    pub fn layout(&self) -> Option<&FactorLayout> {
        self.layout.as_ref()
    }

    pub fn warnings(&self) -> &[ConvergenceWarning] {
        self.layout
            .as_ref()
            .map(|l| l.warnings.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_debug(&self) -> bool {
        self.debug.get()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_animating()
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    pub fn config(&self) -> &FactorConfig {
        &self.config
    }

    pub fn primes(&self) -> &PrimeSet {
        &self.primes
    }

    /// Number signal for reactive tracking (0 until a number is set).
    pub fn number_signal(&self) -> Signal<u64> {
        self.number.clone()
    }

    /// Factor list signal for reactive tracking.
    pub fn factors_signal(&self) -> Signal<Vec<u64>> {
        self.factors.clone()
    }

    /// Debug flag signal for reactive tracking.
    pub fn debug_signal(&self) -> Signal<bool> {
        self.debug.clone()
    }

    fn generate(&self, layout: &FactorLayout) -> Generated {
        layout.generate(self.canvas, self.debug.get(), &self.config)
    }
}

// =============================================================================
// Tests
// =============================================================================
