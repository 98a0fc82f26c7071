//! # factor-circles
//!
//! Prime factorization drawn as nested circles.
//!
//! A number `n` becomes `n` small dots. Its prime factors, largest first,
//! decide the grouping: 12 = 3x2x2 is three groups of two groups of two
//! dots, each group packed into a ring that is itself one dot of the ring
//! above.
//!
//! ## Architecture
//!
//! ```text
//! n → PrimeSet::factorize → CircleNode tree → place → fit → generate → Transition → renderer
//! ```
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive label state and [Taffy](https://github.com/DioxusLabs/taffy) for
//! the label panel.
//!
//! ## Modules
//!
//! - [`types`] - Geometry and color primitives (Point, Rect, Color, DebugLayers)
//! - [`prime`] - Growing prime cache and factorization
//! - [`layout`] - Circle tree, placement, fit, flattening to drawables
//! - [`pipeline`] - Scene driver, animated transitions, reactive label
//! - [`renderer`] - Half-block terminal renderer (diff rendering)
//! - [`config`] / [`error`] - Tunables and error types

pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod prime;
pub mod renderer;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{FactorConfig, LabelMetrics};

pub use error::{ConvergenceWarning, FactorError, FactorResult};

pub use prime::{factors_text, PrimeSet};

pub use layout::{
    fit, generate, layout_label, text_width, CircleNode, DrawCircleData, FactorLayout, FitParams,
    GenerateOptions, Generated, Label, LabelLayout, LayoutContext, NodeKind,
};

pub use pipeline::{create_label_derived, DrawCircle, FactorScene, Transition};

pub use renderer::{paint_scene, pixel_size, DiffRenderer, FrameBuffer};
