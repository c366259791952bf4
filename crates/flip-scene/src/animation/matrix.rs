//! 4x4 transform matrices in CSS `matrix3d` order.
//!
//! The flip engine only synthesizes 2D translate/scale, but computed
//! transforms arrive as full 4x4 matrices and every entry the engine does not
//! touch has to pass through unchanged. Entries are stored column-major:
//!
//! ```text
//! | m0  m4  m8   m12 |
//! | m1  m5  m9   m13 |
//! | m2  m6  m10  m14 |
//! | m3  m7  m11  m15 |
//! ```
//!
//! so `m0`/`m5` are the x/y scale and `m12`/`m13` the x/y translation.
//!
//! # Usage
//!
//! ```
//! use flip_scene::animation::matrix::TransformMatrix;
//!
//! let current: TransformMatrix = "matrix(1, 0, 0, 1, 10, 0)".parse().unwrap();
//! let from = current
//!     .multiply(&TransformMatrix::translate_x(-40.0))
//!     .multiply(&TransformMatrix::scale_x(2.0));
//! assert_eq!(from.translate_x_component(), -30.0);
//! assert_eq!(from.to_css(), "matrix(2, 0, 0, 1, -30, 0)");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::interpolate::{Interpolate, lerp_f64};
use crate::error::{FlipError, Result};

/// Flattened 4x4 matrix, column-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformMatrix(pub [f64; 16]);

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformMatrix {
    pub const IDENTITY: [f64; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ];

    /// Identity transform (no change).
    pub fn identity() -> Self {
        Self(Self::IDENTITY)
    }

    /// Horizontal translation in pixels.
    pub fn translate_x(distance: f64) -> Self {
        let mut m = Self::IDENTITY;
        m[12] = distance;
        Self(m)
    }

    /// Vertical translation in pixels.
    pub fn translate_y(distance: f64) -> Self {
        let mut m = Self::IDENTITY;
        m[13] = distance;
        Self(m)
    }

    /// Horizontal scale.
    pub fn scale_x(factor: f64) -> Self {
        let mut m = Self::IDENTITY;
        m[0] = factor;
        Self(m)
    }

    /// Vertical scale.
    pub fn scale_y(factor: f64) -> Self {
        let mut m = Self::IDENTITY;
        m[5] = factor;
        Self(m)
    }

    /// Build from the six values of a CSS `matrix(a, b, c, d, e, f)`.
    pub fn from_2d(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        let mut m = Self::IDENTITY;
        m[0] = a;
        m[1] = b;
        m[4] = c;
        m[5] = d;
        m[12] = e;
        m[13] = f;
        Self(m)
    }

    /// Matrix product `self · other`.
    ///
    /// The result applies `other` first, then `self`. Not commutative: a
    /// translate followed by a scale differs from the reverse order.
    pub fn multiply(&self, other: &Self) -> Self {
        let (m, x) = (&self.0, &other.0);
        let mut product = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let k = col * 4;
                product[row + k] = m[row] * x[k]
                    + m[row + 4] * x[k + 1]
                    + m[row + 8] * x[k + 2]
                    + m[row + 12] * x[k + 3];
            }
        }
        Self(product)
    }

    /// Parse a computed CSS transform (`none`, `matrix(...)`, `matrix3d(...)`).
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "none" {
            return Ok(Self::identity());
        }

        let invalid = |reason: &str| FlipError::InvalidTransform {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let open = trimmed.find('(').ok_or_else(|| invalid("missing '('"))?;
        let body = trimmed[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| invalid("missing ')'"))?;
        let numbers = body
            .split(',')
            .map(|n| n.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid("non-numeric component"))?;

        match (&trimmed[..open], numbers.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Ok(Self::from_2d(a, b, c, d, e, f)),
            ("matrix3d", values) if values.len() == 16 => {
                let mut m = [0.0; 16];
                m.copy_from_slice(values);
                Ok(Self(m))
            }
            ("matrix", _) => Err(invalid("matrix() takes 6 values")),
            ("matrix3d", _) => Err(invalid("matrix3d() takes 16 values")),
            _ => Err(invalid("unsupported transform function")),
        }
    }

    /// Render as a 2D CSS `matrix(...)`.
    ///
    /// Only the 2D entries are emitted; `matrix3d` interferes with opacity
    /// animation in some engines.
    pub fn to_css(&self) -> String {
        let m = &self.0;
        format!(
            "matrix({}, {}, {}, {}, {}, {})",
            css_number(m[0]),
            css_number(m[1]),
            css_number(m[4]),
            css_number(m[5]),
            css_number(m[12]),
            css_number(m[13])
        )
    }

    pub fn scale_x_component(&self) -> f64 {
        self.0[0]
    }

    pub fn scale_y_component(&self) -> f64 {
        self.0[5]
    }

    pub fn translate_x_component(&self) -> f64 {
        self.0[12]
    }

    pub fn translate_y_component(&self) -> f64 {
        self.0[13]
    }

    /// Apply this transform to a 2D point (z = 0).
    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.0;
        (m[0] * x + m[4] * y + m[12], m[1] * x + m[5] * y + m[13])
    }

    /// Check if this is approximately an identity transform.
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.0
            .iter()
            .zip(Self::IDENTITY.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl FromStr for TransformMatrix {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TransformMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Interpolate for TransformMatrix {
    /// Entry-wise linear interpolation.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        let mut out = [0.0; 16];
        for (i, value) in out.iter_mut().enumerate() {
            *value = lerp_f64(self.0[i], to.0[i], t);
        }
        Self(out)
    }
}

/// Format a number for inline CSS, folding `-0` into `0`.
pub(crate) fn css_number(value: f64) -> String {
    format!("{}", value + 0.0)
}
