//! Scene Pipeline
//!
//! Connects input (numbers, canvas size, debug flag) to animated drawables.
//!
//! # Pipeline Architecture
//!
//! ```text
//! input → FactorScene → FactorLayout → Transition → drawables → renderer
//!                └─ number/factors signals → labelDerived
//! ```
//!
//! ## Data Flow
//!
//! 1. **FactorScene** - validates input, computes a fresh layout, flattens it
//! 2. **Transition** - morphs the previous on-screen list into the new one
//! 3. **labelDerived** - reads the number/factor signals, returns the label
//!
//! A host calls [`FactorScene::tick`] at a fixed rate (about 100 Hz) and
//! redraws while it returns true.

pub mod label_derived;
pub mod scene;
pub mod transition;

// Re-exports
pub use label_derived::create_label_derived;
pub use scene::FactorScene;
pub use transition::{step_fraction, DrawCircle, Transition};
