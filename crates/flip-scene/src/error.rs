//! Error types for the flip engine.

use thiserror::Error;

/// Result type for flip operations.
pub type Result<T> = std::result::Result<T, FlipError>;

/// Errors raised while building configuration or parsing host values.
///
/// None of these occur on the per-frame path: animation frames degrade
/// silently instead of failing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlipError {
    /// Easing name does not resolve to a known curve.
    #[error("unknown easing function: {0:?}")]
    UnknownEasing(String),

    /// Duration is negative, NaN or infinite.
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    /// CSS transform value could not be parsed into a matrix.
    #[error("invalid transform {value:?}: {reason}")]
    InvalidTransform { value: String, reason: String },

    /// Transform origin value could not be parsed.
    #[error("invalid transform origin: {0:?}")]
    InvalidTransformOrigin(String),
}
