//! The document seam.
//!
//! The flip engine never talks to a concrete DOM. Everything it reads
//! (identities, geometry, computed styles, per-element config) and everything
//! it writes (inline transform, opacity and transform origin) goes through a
//! [`FlipHost`]. A browser binding, a retained-mode UI tree and the in-memory
//! [`MemoryDocument`](crate::memory::MemoryDocument) are all hosts.

use std::fmt::Debug;

use crate::config::ElementConfig;
use crate::geometry::{Rect, Viewport};

/// Read/write access to the elements being flipped.
pub trait FlipHost {
    /// Handle to one element. Handles are cheap to clone and compare.
    type Element: Clone + PartialEq + Debug;

    /// Every element carrying a flip identity below `container`, in document
    /// order. Nested containers are included; `container` itself is not.
    fn tracked_elements(&self, container: &Self::Element) -> Vec<Self::Element>;

    /// Stable identity used to match an element across snapshots.
    fn flip_id(&self, element: &Self::Element) -> Option<String>;

    /// Identity of the component group the element belongs to.
    fn group_id(&self, element: &Self::Element) -> Option<String>;

    /// Layout rectangle in viewport coordinates.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Raw computed opacity. Malformed values are tolerated by callers.
    fn computed_opacity(&self, element: &Self::Element) -> Option<String>;

    /// Raw computed transform (`none`, `matrix(...)` or `matrix3d(...)`).
    fn computed_transform(&self, element: &Self::Element) -> Option<String>;

    /// First tracked element below `container` with the given identity.
    fn find_tracked(&self, container: &Self::Element, flip_id: &str) -> Option<Self::Element>;

    /// Descendants of `element` marked for inverse compensation of `flip_id`.
    fn inverse_children(&self, element: &Self::Element, flip_id: &str) -> Vec<Self::Element>;

    /// Per-element flip configuration.
    fn element_config(&self, element: &Self::Element) -> ElementConfig;

    /// False once the element has been removed from the document.
    fn is_attached(&self, element: &Self::Element) -> bool;

    fn viewport(&self) -> Viewport;

    fn set_transform(&mut self, element: &Self::Element, transform: &str);

    fn clear_transform(&mut self, element: &Self::Element);

    fn set_opacity(&mut self, element: &Self::Element, opacity: f64);

    fn set_transform_origin(&mut self, element: &Self::Element, origin: &str);
}
