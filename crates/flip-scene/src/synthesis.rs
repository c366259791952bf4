//! Change detection and "from"/"to" synthesis.
//!
//! Given the previous and current snapshot of one identity, decide whether it
//! moved at all and, if so, build the inverted starting values that make the
//! element appear where it was before the layout change:
//!
//! ```text
//! from = current · translateX(dx) · translateY(dy) · scaleX(sx) · scaleY(sy)
//! to   = current
//! ```
//!
//! Each corrective factor is only multiplied in when the element opted into
//! that axis.

use tracing::warn;

use crate::animation::interpolate::FlipValues;
use crate::animation::matrix::TransformMatrix;
use crate::config::{AnimationOptIns, ComponentFilter};
use crate::geometry::Viewport;
use crate::host::FlipHost;
use crate::snapshot::ElementSnapshot;

/// Floor applied to the current width/height before dividing.
pub const MIN_DIMENSION: f64 = 1e-4;

/// Why an identity produced no animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not present in the cached snapshot.
    NotInPrevious,
    /// Not present in the fresh snapshot.
    NotInCurrent,
    /// Both rects lie entirely outside the viewport.
    OutsideViewport,
    /// Geometry and opacity are unchanged.
    Unchanged,
}

/// Decide whether a change between two snapshots should be skipped.
pub fn skip_reason(
    previous: Option<&ElementSnapshot>,
    current: Option<&ElementSnapshot>,
    viewport: &Viewport,
) -> Option<SkipReason> {
    let Some(previous) = previous else {
        return Some(SkipReason::NotInPrevious);
    };
    let Some(current) = current else {
        return Some(SkipReason::NotInCurrent);
    };
    if !previous.rect.in_viewport(viewport) && !current.rect.in_viewport(viewport) {
        return Some(SkipReason::OutsideViewport);
    }
    if previous.same_state(current) {
        return Some(SkipReason::Unchanged);
    }
    None
}

/// True when no filter is set, or either endpoint group passes it.
pub fn passes_filter(
    filter: Option<&ComponentFilter>,
    start_group: Option<&str>,
    end_group: Option<&str>,
) -> bool {
    match filter {
        None => true,
        Some(filter) => filter.allows(start_group) || filter.allows(end_group),
    }
}

/// Start and end values of one flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipPlan {
    pub from: FlipValues,
    pub to: FlipValues,
}

/// Build the inverted "from" and the resting "to" values.
pub fn synthesize(
    previous: &ElementSnapshot,
    current: &ElementSnapshot,
    current_transform: &TransformMatrix,
    opt_ins: &AnimationOptIns,
) -> FlipPlan {
    let (prev, cur) = (&previous.rect, &current.rect);
    let mut from = *current_transform;

    if opt_ins.translate_x {
        from = from.multiply(&TransformMatrix::translate_x(prev.left - cur.left));
    }
    if opt_ins.translate_y {
        from = from.multiply(&TransformMatrix::translate_y(prev.top - cur.top));
    }
    if opt_ins.scale_x {
        from = from.multiply(&TransformMatrix::scale_x(
            prev.width / cur.width.max(MIN_DIMENSION),
        ));
    }
    if opt_ins.scale_y {
        from = from.multiply(&TransformMatrix::scale_y(
            prev.height / cur.height.max(MIN_DIMENSION),
        ));
    }

    let (from_opacity, to_opacity) = if opt_ins.opacity {
        (previous.opacity, current.opacity)
    } else {
        (None, None)
    };

    FlipPlan {
        from: FlipValues::new(from, from_opacity),
        to: FlipValues::new(*current_transform, to_opacity),
    }
}

/// The element's computed transform, or identity when it cannot be parsed.
pub fn resolve_computed_transform<H: FlipHost>(host: &H, element: &H::Element) -> TransformMatrix {
    let Some(raw) = host.computed_transform(element) else {
        return TransformMatrix::identity();
    };
    match TransformMatrix::parse(&raw) {
        Ok(matrix) => matrix,
        Err(err) => {
            warn!(?element, %err, "unparseable computed transform, using identity");
            TransformMatrix::identity()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn snap(rect: Rect, opacity: Option<f64>) -> ElementSnapshot {
        ElementSnapshot {
            id: "card".to_string(),
            rect,
            opacity,
            group_id: None,
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_skip_when_unchanged() {
        let a = snap(Rect::new(0.0, 0.0, 100.0, 100.0), Some(1.0));
        assert_eq!(
            skip_reason(Some(&a), Some(&a.clone()), &viewport()),
            Some(SkipReason::Unchanged)
        );
    }

    #[test]
    fn test_skip_when_missing() {
        let a = snap(Rect::new(0.0, 0.0, 100.0, 100.0), Some(1.0));
        assert_eq!(
            skip_reason(None, Some(&a), &viewport()),
            Some(SkipReason::NotInPrevious)
        );
        assert_eq!(
            skip_reason(Some(&a), None, &viewport()),
            Some(SkipReason::NotInCurrent)
        );
    }

    #[test]
    fn test_skip_when_both_offscreen() {
        let a = snap(Rect::new(0.0, -500.0, 100.0, 100.0), Some(1.0));
        let b = snap(Rect::new(0.0, 900.0, 100.0, 100.0), Some(1.0));
        assert_eq!(
            skip_reason(Some(&a), Some(&b), &viewport()),
            Some(SkipReason::OutsideViewport)
        );

        // Entering the viewport animates
        let c = snap(Rect::new(0.0, 100.0, 100.0, 100.0), Some(1.0));
        assert_eq!(skip_reason(Some(&a), Some(&c), &viewport()), None);
    }

    #[test]
    fn test_opacity_change_alone_is_a_change() {
        let a = snap(Rect::new(0.0, 0.0, 100.0, 100.0), Some(1.0));
        let b = snap(Rect::new(0.0, 0.0, 100.0, 100.0), Some(0.0));
        assert_eq!(skip_reason(Some(&a), Some(&b), &viewport()), None);
    }

    #[test]
    fn test_filter() {
        let filter = ComponentFilter::parse("a,b");
        assert!(passes_filter(None, None, None));
        assert!(passes_filter(filter.as_ref(), Some("a"), Some("z")));
        assert!(passes_filter(filter.as_ref(), None, Some("b")));
        assert!(!passes_filter(filter.as_ref(), Some("x"), Some("y")));
        assert!(!passes_filter(filter.as_ref(), None, None));
    }

    #[test]
    fn test_synthesize_translate() {
        let prev = snap(Rect::new(100.0, 40.0, 50.0, 50.0), Some(1.0));
        let cur = snap(Rect::new(0.0, 0.0, 50.0, 50.0), Some(1.0));
        let plan = synthesize(
            &prev,
            &cur,
            &TransformMatrix::identity(),
            &AnimationOptIns::position(),
        );

        assert_eq!(plan.from.matrix.translate_x_component(), 100.0);
        assert_eq!(plan.from.matrix.translate_y_component(), 40.0);
        assert_eq!(plan.to.matrix, TransformMatrix::identity());
        assert_eq!(plan.from.opacity, None);
        assert_eq!(plan.to.opacity, None);
    }

    #[test]
    fn test_synthesize_scale_x_only_touches_index_zero() {
        let prev = snap(Rect::new(30.0, 30.0, 200.0, 80.0), Some(1.0));
        let cur = snap(Rect::new(0.0, 0.0, 100.0, 40.0), Some(1.0));
        let opt_ins = AnimationOptIns {
            scale_x: true,
            ..AnimationOptIns::default()
        };
        let plan = synthesize(&prev, &cur, &TransformMatrix::identity(), &opt_ins);

        for i in 0..16 {
            if i == 0 {
                assert_eq!(plan.from.matrix.0[i], 2.0);
            } else {
                assert_eq!(plan.from.matrix.0[i], plan.to.matrix.0[i], "index {i}");
            }
        }
    }

    #[test]
    fn test_synthesize_composes_with_current_transform() {
        let prev = snap(Rect::new(50.0, 0.0, 100.0, 100.0), Some(1.0));
        let cur = snap(Rect::new(0.0, 0.0, 50.0, 100.0), Some(1.0));
        let current = TransformMatrix::from_2d(1.0, 0.0, 0.0, 1.0, 10.0, 0.0);
        let opt_ins = AnimationOptIns {
            translate_x: true,
            scale_x: true,
            ..AnimationOptIns::default()
        };
        let plan = synthesize(&prev, &cur, &current, &opt_ins);

        assert_eq!(plan.from.matrix.translate_x_component(), 60.0);
        assert_eq!(plan.from.matrix.scale_x_component(), 2.0);
        assert_eq!(plan.to.matrix, current);
    }

    #[test]
    fn test_synthesize_floors_zero_size() {
        let prev = snap(Rect::new(0.0, 0.0, 10.0, 10.0), Some(1.0));
        let cur = snap(Rect::new(0.0, 0.0, 0.0, 10.0), Some(1.0));
        let plan = synthesize(
            &prev,
            &cur,
            &TransformMatrix::identity(),
            &AnimationOptIns::size(),
        );
        assert_eq!(plan.from.matrix.scale_x_component(), 10.0 / MIN_DIMENSION);
        assert!(plan.from.matrix.scale_x_component().is_finite());
    }

    #[test]
    fn test_synthesize_opacity_opt_in() {
        let prev = snap(Rect::new(0.0, 0.0, 10.0, 10.0), Some(0.0));
        let cur = snap(Rect::new(5.0, 0.0, 10.0, 10.0), Some(1.0));
        let opt_ins = AnimationOptIns {
            opacity: true,
            ..AnimationOptIns::default()
        };
        let plan = synthesize(&prev, &cur, &TransformMatrix::identity(), &opt_ins);

        assert_eq!(plan.from.opacity, Some(0.0));
        assert_eq!(plan.to.opacity, Some(1.0));
        assert_eq!(plan.from.matrix, plan.to.matrix);
    }
}
