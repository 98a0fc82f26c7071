//! Factor layout - one complete calculation.
//!
//! ```text
//! number → factorize → build → place → fit → FactorLayout
//! ```
//!
//! Everything is computed into a fresh value; a failed step leaves nothing
//! half-written behind.

use tracing::debug;

use crate::config::FactorConfig;
use crate::error::{ConvergenceWarning, FactorError, FactorResult};
use crate::prime::PrimeSet;
use crate::types::{DebugLayers, Size};

use super::fit::{fit, FitParams};
use super::generate::{generate, GenerateOptions, Generated};
use super::label::Label;
use super::node::{CircleNode, LayoutContext};

/// A placed and fitted factor tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorLayout {
    pub number: u64,
    pub factors: Vec<u64>,
    pub root: CircleNode,
    pub fit: FitParams,
    /// Identifiers reserved during construction (= number of points).
    pub total_ids: usize,
    pub warnings: Vec<ConvergenceWarning>,
}

impl FactorLayout {
    /// Factorize `number` and lay it out.
    pub fn calculate(
        number: u64,
        primes: &mut PrimeSet,
        config: &FactorConfig,
    ) -> FactorResult<Self> {
        if number == 0 {
            return Err(FactorError::invalid_input("number must be positive"));
        }

        let factors = primes.factorize(number)?;
        Self::from_factors(number, factors, config)
    }

    /// Lay out an explicit factor list.
    pub fn from_factors(
        number: u64,
        factors: Vec<u64>,
        config: &FactorConfig,
    ) -> FactorResult<Self> {
        let mut ctx = LayoutContext::new(config.convergence_tolerance, config.max_place_iterations);

        let mut root = CircleNode::build(&factors, &mut ctx)?;
        root.place(&mut ctx)?;
        let fit = fit(&root);

        debug!(
            number,
            factors = ?factors,
            units = ctx.total_ids(),
            s = fit.s,
            max_span = fit.max_span,
            "factor layout calculated"
        );

        Ok(Self {
            number,
            factors,
            total_ids: ctx.total_ids(),
            warnings: ctx.take_warnings(),
            root,
            fit,
        })
    }

    /// Flatten into drawables for a canvas.
    pub fn generate(&self, canvas: Size, debug: bool, config: &FactorConfig) -> Generated {
        let options = GenerateOptions {
            canvas,
            point_scale: config.point_scale,
            hsv_saturation: config.hsv_saturation,
            hsv_value: config.hsv_value,
            debug_layers: if debug {
                config.debug_layers
            } else {
                DebugLayers::empty()
            },
            marker_size: config.debug_marker_size,
        };
        generate(&self.root, &self.fit, self.total_ids, &options)
    }

    pub fn label(&self) -> Label {
        Label::new(self.number, &self.factors)
    }
}
