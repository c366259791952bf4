//! Element geometry as reported by the host.

use serde::{Deserialize, Serialize};

/// Bounding rectangle in viewport coordinates (CSS pixels).
///
/// Mirrors the shape of a client bounding rect: all six edges are stored so
/// hosts can report exactly what they measured.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    /// Build a rect from its origin and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
            bottom: top + height,
            right: left + width,
        }
    }

    /// Same size, moved to a new origin.
    pub fn moved_to(&self, left: f64, top: f64) -> Self {
        Self::new(left, top, self.width, self.height)
    }

    /// True when any part of the rect overlaps the viewport.
    pub fn in_viewport(&self, viewport: &Viewport) -> bool {
        self.bottom > 0.0
            && self.top < viewport.height
            && self.right > 0.0
            && self.left < viewport.width
    }

    /// True when position and size match exactly.
    pub fn same_geometry(&self, other: &Rect) -> bool {
        self.left == other.left
            && self.top == other.top
            && self.width == other.width
            && self.height == other.height
    }
}

/// Visible area of the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<&flip_config::ViewportConfig> for Viewport {
    fn from(config: &flip_config::ViewportConfig) -> Self {
        Self::new(config.width, config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right, 40.0);
        assert_eq!(rect.bottom, 60.0);
    }

    #[test]
    fn test_in_viewport() {
        let viewport = Viewport::new(800.0, 600.0);
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).in_viewport(&viewport));
        assert!(Rect::new(-5.0, -5.0, 10.0, 10.0).in_viewport(&viewport));

        // Touching an edge is not overlapping it
        assert!(!Rect::new(-10.0, 0.0, 10.0, 10.0).in_viewport(&viewport));
        assert!(!Rect::new(800.0, 0.0, 10.0, 10.0).in_viewport(&viewport));
        assert!(!Rect::new(0.0, 600.0, 10.0, 10.0).in_viewport(&viewport));
        assert!(!Rect::new(0.0, -2000.0, 10.0, 10.0).in_viewport(&viewport));
    }

    #[test]
    fn test_same_geometry_ignores_derived_edges() {
        let a = Rect::new(1.0, 2.0, 3.0, 4.0);
        let mut b = a;
        b.right = 99.0;
        assert!(a.same_geometry(&b));
        assert!(!a.same_geometry(&a.moved_to(1.5, 2.0)));
    }
}
