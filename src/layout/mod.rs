//! Layout Module - recursive circle packing.
//!
//! # Architecture
//!
//! ```text
//! factors → CircleNode::build → place → fit → generate → Vec<DrawCircleData>
//! ```
//!
//! 1. **node** - the factor tree and the [`LayoutContext`] that hands out
//!    point identifiers
//! 2. **place** - post-order ring packing in each node's unit frame
//! 3. **fit** - closest spacing and bounding box of the whole tree
//! 4. **generate** - one drawable per point, plus debug overlays
//! 5. **label** - number/factor text and its Taffy-laid-out panel
//!
//! [`FactorLayout`] runs steps 1-3 for a number and keeps the result.
//!
//! # Example
//!
//! ```
//! use factor_circles::{FactorConfig, FactorLayout, PrimeSet, Size};
//!
//! let config = FactorConfig::default();
//! let mut primes = PrimeSet::new();
//! let layout = FactorLayout::calculate(12, &mut primes, &config).unwrap();
//!
//! let out = layout.generate(Size::new(800.0, 800.0), false, &config);
//! assert_eq!(out.circles.len(), 12);
//! ```

mod factor_layout;
mod fit;
mod generate;
mod label;
mod node;
mod place;

pub use factor_layout::FactorLayout;
pub use fit::{fit, FitParams};
pub use generate::{generate, DrawCircleData, GenerateOptions, Generated};
pub use label::{layout_label, text_width, Label, LabelLayout};
pub use node::{CircleNode, LayoutContext, NodeKind};
