//! Interpolation between flip values.
//!
//! A flip animation interpolates the transform matrix and the opacity in
//! parallel over the same timeline. [`FlipValues`] bundles the two so a single
//! tween drives both.

use serde::{Deserialize, Serialize};

use super::matrix::TransformMatrix;

/// Trait for types that can be interpolated between two values.
pub trait Interpolate: Sized {
    /// Interpolate between self and another value.
    ///
    /// When t = 0.0, returns self. When t = 1.0, returns to. Eased progress
    /// may leave [0, 1] and extrapolates.
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

/// Linear interpolation helper for f64 values.
#[inline]
pub(crate) fn lerp_f64(from: f64, to: f64, t: f32) -> f64 {
    from + (to - from) * t as f64
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f64(*self, *to, t)
    }
}

impl<T: Interpolate + Clone> Interpolate for Option<T> {
    /// Interpolate when both ends are present; otherwise there is nothing to
    /// animate and the value stays absent.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        match (self, to) {
            (Some(from), Some(to)) => Some(from.interpolate(to, t)),
            _ => None,
        }
    }
}

/// The pair of values a flip animation drives: transform and opacity.
///
/// `opacity` is `None` when the element does not animate opacity, in which
/// case the host's opacity is never written.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlipValues {
    pub matrix: TransformMatrix,
    pub opacity: Option<f64>,
}

impl FlipValues {
    pub fn new(matrix: TransformMatrix, opacity: Option<f64>) -> Self {
        Self { matrix, opacity }
    }
}

impl Interpolate for FlipValues {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Self {
            matrix: self.matrix.interpolate(&to.matrix, t),
            opacity: self.opacity.interpolate(&to.opacity, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64() {
        assert_eq!(0.0f64.interpolate(&100.0, 0.25), 25.0);
        // Overshooting easings extrapolate
        assert_eq!(0.0f64.interpolate(&100.0, 1.5), 150.0);
    }

    #[test]
    fn test_option_requires_both_ends() {
        assert_eq!(Some(0.0).interpolate(&Some(1.0), 0.5), Some(0.5));
        assert_eq!(Some(0.0).interpolate(&None, 0.5), None);
        assert_eq!(None::<f64>.interpolate(&Some(1.0), 0.5), None);
    }

    #[test]
    fn test_flip_values_in_parallel() {
        let from = FlipValues::new(TransformMatrix::translate_y(-80.0), Some(0.0));
        let to = FlipValues::new(TransformMatrix::identity(), Some(1.0));

        let mid = from.interpolate(&to, 0.5);
        assert_eq!(mid.matrix.translate_y_component(), -40.0);
        assert_eq!(mid.opacity, Some(0.5));
    }
}
