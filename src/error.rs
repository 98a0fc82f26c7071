//! Error types for factor-circles.

/// Result type for layout and scene operations.
pub type FactorResult<T> = Result<T, FactorError>;

/// Errors that abort a calculation.
///
/// A failed calculation never touches the state of a scene; the previous
/// layout stays on screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Label layout failed: {0}")]
    Layout(String),
}

impl FactorError {
    pub(crate) fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Placement stopped at the iteration cap before reaching the tolerance.
///
/// Non-fatal: the node keeps the last computed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceWarning {
    /// Depth of the composite node in the tree (root = 0).
    pub depth: usize,
    /// Iterations run before giving up.
    pub iterations: usize,
    /// Radius kept for the node.
    pub radius: f64,
    /// Remaining |r1 - rr| discrepancy.
    pub discrepancy: f64,
}
