//! Scene configuration.
//!
//! All tunables live in one plain struct. Defaults: 100 animation steps,
//! HSV saturation/value of 0.6 and point circles at 90% of the closest
//! point spacing.

use crate::error::{FactorError, FactorResult};
use crate::types::DebugLayers;

/// Font metrics for the label panel, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    /// Width of one terminal column (one unit of `unicode-width`).
    pub char_width: f32,
    /// Height of one text line.
    pub line_height: f32,
    /// Offset of the panel from the top-left corner.
    pub margin: f32,
}

impl Default for LabelMetrics {
    /// Terminal cells: one column per char, one row per line.
    fn default() -> Self {
        Self {
            char_width: 1.0,
            line_height: 1.0,
            margin: 2.0,
        }
    }
}

/// Configuration for a [`FactorScene`](crate::pipeline::FactorScene).
#[derive(Debug, Clone, PartialEq)]
pub struct FactorConfig {
    /// Ticks per transition. `0` disables animation.
    pub anim_iterations: u32,
    pub hsv_saturation: f64,
    pub hsv_value: f64,
    /// Point circle diameter as a fraction of the closest point spacing.
    pub point_scale: f64,
    /// Size of debug center/point markers in canvas units.
    pub debug_marker_size: f64,
    /// Placement stops once |r1 - rr| drops below this.
    pub convergence_tolerance: f64,
    /// Hard cap on placement iterations per composite node.
    pub max_place_iterations: usize,
    /// Largest accepted target number (one point is drawn per unit).
    pub max_units: u64,
    /// Overlays emitted when debug mode is on.
    pub debug_layers: DebugLayers,
    pub label: LabelMetrics,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            anim_iterations: 100,
            hsv_saturation: 0.6,
            hsv_value: 0.6,
            point_scale: 0.9,
            debug_marker_size: 8.0,
            convergence_tolerance: 1e-3,
            max_place_iterations: 10_000,
            max_units: 4096,
            debug_layers: DebugLayers::DEFAULT,
            label: LabelMetrics::default(),
        }
    }
}

impl FactorConfig {
    pub fn with_anim_iterations(mut self, iterations: u32) -> Self {
        self.anim_iterations = iterations;
        self
    }

    pub fn with_hsv(mut self, saturation: f64, value: f64) -> Self {
        self.hsv_saturation = saturation;
        self.hsv_value = value;
        self
    }

    pub fn with_debug_marker_size(mut self, size: f64) -> Self {
        self.debug_marker_size = size;
        self
    }

    pub fn with_max_place_iterations(mut self, iterations: usize) -> Self {
        self.max_place_iterations = iterations;
        self
    }

    pub fn with_max_units(mut self, max_units: u64) -> Self {
        self.max_units = max_units;
        self
    }

    pub fn with_debug_layers(mut self, layers: DebugLayers) -> Self {
        self.debug_layers = layers;
        self
    }

    pub fn with_label_metrics(mut self, label: LabelMetrics) -> Self {
        self.label = label;
        self
    }

    /// Check ranges. Called by the scene constructor.
    pub fn validate(&self) -> FactorResult<()> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.hsv_saturation) || !unit.contains(&self.hsv_value) {
            return Err(FactorError::InvalidConfig(format!(
                "hsv saturation/value must be in [0, 1], got {}/{}",
                self.hsv_saturation, self.hsv_value
            )));
        }
        if !(self.point_scale > 0.0 && self.point_scale <= 1.0) {
            return Err(FactorError::InvalidConfig(format!(
                "point_scale must be in (0, 1], got {}",
                self.point_scale
            )));
        }
        if !(self.convergence_tolerance > 0.0) {
            return Err(FactorError::InvalidConfig(
                "convergence_tolerance must be positive".to_string(),
            ));
        }
        if self.max_place_iterations == 0 {
            return Err(FactorError::InvalidConfig(
                "max_place_iterations must be at least 1".to_string(),
            ));
        }
        if self.max_units == 0 {
            return Err(FactorError::InvalidConfig(
                "max_units must be at least 1".to_string(),
            ));
        }
        if self.label.char_width <= 0.0 || self.label.line_height <= 0.0 {
            return Err(FactorError::InvalidConfig(
                "label metrics must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FactorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.anim_iterations, 100);
        assert_eq!(config.hsv_saturation, 0.6);
    }

    #[test]
    fn test_builder() {
        let config = FactorConfig::default()
            .with_anim_iterations(0)
            .with_max_units(64)
            .with_debug_layers(DebugLayers::all());

        assert_eq!(config.anim_iterations, 0);
        assert_eq!(config.max_units, 64);
        assert!(config.debug_layers.contains(DebugLayers::LEAF_BOUNDS));
    }

    #[test]
    fn test_rejects_bad_hsv() {
        let config = FactorConfig::default().with_hsv(1.5, 0.6);
        assert!(matches!(config.validate(), Err(FactorError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_iterations_cap() {
        let config = FactorConfig::default().with_max_place_iterations(0);
        assert!(config.validate().is_err());
    }
}
