//! Inverse transforms for children of an animating element.
//!
//! Scaling a card also scales its text. Children marked as inverse of the
//! card get the opposite transform each frame so they keep their size and
//! position while the card grows or shrinks around them.

use tracing::trace;

use crate::animation::matrix::{TransformMatrix, css_number};
use crate::config::AnimationOptIns;
use crate::host::FlipHost;
use crate::synthesis::passes_filter;

/// Counter transform for one child, in CSS pixels and unit scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for InverseTransform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl InverseTransform {
    /// Invert the parent's translate and scale on the child's opted-in axes.
    ///
    /// Axes the child did not opt into stay neutral. A zero parent scale is
    /// passed through and yields non-finite values.
    pub fn for_parent(parent: &TransformMatrix, opt_ins: &AnimationOptIns) -> Self {
        let sx = parent.scale_x_component();
        let sy = parent.scale_y_component();
        let tx = parent.translate_x_component();
        let ty = parent.translate_y_component();

        let mut inverse = Self::default();
        if opt_ins.translate_x {
            inverse.translate_x = -tx / sx;
        }
        if opt_ins.translate_y {
            inverse.translate_y = -ty / sy;
        }
        if opt_ins.scale_x {
            inverse.scale_x = 1.0 / sx;
        }
        if opt_ins.scale_y {
            inverse.scale_y = 1.0 / sy;
        }
        inverse
    }

    /// `translate(Xpx, Ypx) scale(X, Y)`
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}, {})",
            css_number(self.translate_x),
            css_number(self.translate_y),
            css_number(self.scale_x),
            css_number(self.scale_y)
        )
    }
}

/// Write the inverse of `parent_matrix` to every child whose own filter
/// accepts the parent's transition.
pub fn compensate_children<H: FlipHost>(
    host: &mut H,
    children: &[H::Element],
    parent_matrix: &TransformMatrix,
    start_group: Option<&str>,
    end_group: Option<&str>,
) {
    for child in children {
        let config = host.element_config(child);
        if !passes_filter(config.component_filter.as_ref(), start_group, end_group) {
            continue;
        }
        let inverse = InverseTransform::for_parent(parent_matrix, &config.opt_ins);
        trace!(?child, transform = %inverse.to_css(), "compensating child");
        host.set_transform(child, &inverse.to_css());
    }
}

/// Apply each child's declared transform origin.
pub fn apply_child_origins<H: FlipHost>(host: &mut H, children: &[H::Element]) {
    for child in children {
        if let Some(origin) = host.element_config(child).transform_origin {
            host.set_transform_origin(child, &origin.to_css());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComponentFilter, ElementConfig};
    use crate::geometry::Viewport;
    use crate::memory::{MemoryDocument, NodeSpec};

    fn parent() -> TransformMatrix {
        TransformMatrix::from_2d(2.0, 0.0, 0.0, 1.0, 50.0, 0.0)
    }

    #[test]
    fn test_inverse_of_scaled_translated_parent() {
        let opt_ins = AnimationOptIns {
            translate_x: true,
            scale_x: true,
            ..AnimationOptIns::default()
        };
        let inverse = InverseTransform::for_parent(&parent(), &opt_ins);
        assert_eq!(inverse.to_css(), "translate(-25px, 0px) scale(0.5, 1)");
    }

    #[test]
    fn test_no_opt_ins_is_neutral() {
        let inverse = InverseTransform::for_parent(&parent(), &AnimationOptIns::none());
        assert_eq!(inverse, InverseTransform::default());
        assert_eq!(inverse.to_css(), "translate(0px, 0px) scale(1, 1)");
    }

    #[test]
    fn test_zero_scale_is_not_finite() {
        let collapsed = TransformMatrix::from_2d(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let inverse = InverseTransform::for_parent(&collapsed, &AnimationOptIns::size());
        assert!(!inverse.scale_x.is_finite());
        assert_eq!(inverse.scale_y, 1.0);
    }

    #[test]
    fn test_compensate_children_respects_child_filter() {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let card = doc.append(root, NodeSpec::tracked("card"));
        let open = doc.append(
            card,
            NodeSpec::inverse_of("card").config(
                ElementConfig::new().with_opt_ins(AnimationOptIns::all()),
            ),
        );
        let filtered = doc.append(
            card,
            NodeSpec::inverse_of("card").config(
                ElementConfig::new()
                    .with_opt_ins(AnimationOptIns::all())
                    .with_component_filter(ComponentFilter::new(["detail"])),
            ),
        );

        let children = doc.inverse_children(&card, "card");
        compensate_children(&mut doc, &children, &parent(), Some("list"), Some("grid"));

        assert_eq!(
            doc.inline_transform(open),
            Some("translate(-25px, 0px) scale(0.5, 1)")
        );
        assert_eq!(doc.inline_transform(filtered), None);

        compensate_children(&mut doc, &children, &parent(), Some("list"), Some("detail"));
        assert!(doc.inline_transform(filtered).is_some());
    }
}
