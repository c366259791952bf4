//! The flip animation driver.
//!
//! [`animate_move`] diffs a cached snapshot against the live document and
//! starts one animation per changed identity. [`tick`] advances every
//! in-flight animation by one frame. Both mutate host styles and report
//! lifecycle events through a [`FlipEventHandler`].
//!
//! Each identity moves through:
//!
//! ```text
//! Idle ──change──▶ Starting ──▶ Running ──end──▶ Completing ──▶ Idle
//!                    │             │
//!                    │             └─detached──▶ Idle (no Completed)
//!                    └─ supersedes any Running entry (Completed fires)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let first = capture_snapshot(&doc, &container);
//! // ... layout changes ...
//! let next = animate_move(&mut doc, &mut registry, &mut events, AnimateMove {
//!     container: &container,
//!     cached: &first,
//!     defaults: AnimationDefaults::default(),
//! });
//! while registry.has_pending_work() {
//!     tick(&mut doc, &mut registry, &mut events, 16.0);
//! }
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::animation::events::{FlipEventHandler, FlipTransition};
use crate::animation::interpolate::FlipValues;
use crate::animation::tween::{Tween, TweenState};
use crate::compensation::{apply_child_origins, compensate_children};
use crate::config::AnimationDefaults;
use crate::host::FlipHost;
use crate::snapshot::{SnapshotMap, capture_snapshot};
use crate::synthesis::{passes_filter, resolve_computed_transform, skip_reason, synthesize};

/// One animation in progress.
#[derive(Debug, Clone)]
pub struct InFlightAnimation<E> {
    pub id: String,
    pub element: E,
    pub start_group: Option<String>,
    pub end_group: Option<String>,
    pub tween: Tween,
}

impl<E: Clone> InFlightAnimation<E> {
    /// Halt interpolation. The entry stays where it is until removed.
    pub fn stop(&mut self) {
        self.tween.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.tween.state == TweenState::Stopped
    }

    pub fn transition(&self) -> FlipTransition<E> {
        FlipTransition {
            flip_id: self.id.clone(),
            element: self.element.clone(),
            start_group: self.start_group.clone(),
            end_group: self.end_group.clone(),
        }
    }
}

/// In-flight animations keyed by flip id, plus transforms waiting to be
/// cleared on the next frame.
///
/// At most one animation exists per identity. Entries are removed on
/// completion, supersession and detachment.
#[derive(Debug)]
pub struct FlipRegistry<E> {
    animations: HashMap<String, InFlightAnimation<E>>,
    pending_clears: Vec<E>,
}

impl<E> Default for FlipRegistry<E> {
    fn default() -> Self {
        Self {
            animations: HashMap::new(),
            pending_clears: Vec::new(),
        }
    }
}

impl<E> FlipRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self, flip_id: &str) -> bool {
        self.animations.contains_key(flip_id)
    }

    pub fn get(&self, flip_id: &str) -> Option<&InFlightAnimation<E>> {
        self.animations.get(flip_id)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// True while animations are running or a transform clear is scheduled.
    pub fn has_pending_work(&self) -> bool {
        !self.animations.is_empty() || !self.pending_clears.is_empty()
    }

    /// Animating identities, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.animations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Inputs of one animate pass.
#[derive(Debug, Clone, Copy)]
pub struct AnimateMove<'a, E> {
    /// Element whose tracked descendants are diffed.
    pub container: &'a E,
    /// Snapshot taken before the layout change.
    pub cached: &'a SnapshotMap,
    /// Duration and easing for elements without overrides.
    pub defaults: AnimationDefaults,
}

/// Diff the cached snapshot against the live document and start animations.
///
/// Returns the fresh snapshot, which the caller caches for the next pass.
pub fn animate_move<H, F>(
    host: &mut H,
    registry: &mut FlipRegistry<H::Element>,
    handler: &mut F,
    pass: AnimateMove<'_, H::Element>,
) -> SnapshotMap
where
    H: FlipHost,
    F: FlipEventHandler<H::Element> + ?Sized,
{
    let current = capture_snapshot(host, pass.container);
    let viewport = host.viewport();

    for (id, now) in &current {
        let before = pass.cached.get(id);
        if let Some(reason) = skip_reason(before, Some(now), &viewport) {
            trace!(flip_id = %id, ?reason, "skipping");
            continue;
        }
        let Some(before) = before else {
            continue;
        };
        let Some(element) = host.find_tracked(pass.container, id) else {
            continue;
        };

        let config = host.element_config(&element);
        let start_group = before.group_id.clone();
        let end_group = now.group_id.clone();
        if !passes_filter(
            config.component_filter.as_ref(),
            start_group.as_deref(),
            end_group.as_deref(),
        ) {
            debug!(flip_id = %id, ?start_group, ?end_group, "suppressed by component filter");
            continue;
        }

        let children = host.inverse_children(&element, id);
        if let Some(origin) = &config.transform_origin {
            host.set_transform_origin(&element, &origin.to_css());
        }
        apply_child_origins(host, &children);

        if let Some(mut superseded) = registry.animations.remove(id) {
            debug!(flip_id = %id, "superseding in-flight animation");
            superseded.stop();
            handler.on_complete(&superseded.transition());
        }

        let plan = synthesize(
            before,
            now,
            &resolve_computed_transform(host, &element),
            &config.opt_ins,
        );
        apply_values(host, &element, &plan.from);
        compensate_children(
            host,
            &children,
            &plan.from.matrix,
            start_group.as_deref(),
            end_group.as_deref(),
        );

        let animation = InFlightAnimation {
            id: id.clone(),
            element,
            start_group,
            end_group,
            tween: Tween::new(plan.from, plan.to, pass.defaults.resolve(&config)),
        };
        debug!(
            flip_id = %id,
            duration_ms = animation.tween.settings.duration_ms,
            "flip started"
        );
        handler.on_start(&animation.transition());
        registry.animations.insert(id.clone(), animation);
    }

    current
}

/// Advance every in-flight animation by `delta_ms`.
///
/// Transforms scheduled for clearing by the previous frame are cleared
/// first. Animations whose element has left the document are dropped without
/// a completion event.
pub fn tick<H, F>(
    host: &mut H,
    registry: &mut FlipRegistry<H::Element>,
    handler: &mut F,
    delta_ms: f32,
) where
    H: FlipHost,
    F: FlipEventHandler<H::Element> + ?Sized,
{
    for element in std::mem::take(&mut registry.pending_clears) {
        host.clear_transform(&element);
    }

    let mut ids: Vec<String> = registry.animations.keys().cloned().collect();
    ids.sort_unstable();

    for id in ids {
        let Some(animation) = registry.animations.get_mut(&id) else {
            continue;
        };

        if !host.is_attached(&animation.element) {
            animation.stop();
            registry.animations.remove(&id);
            debug!(flip_id = %id, "element detached, dropping animation");
            continue;
        }

        let values = animation.tween.advance(delta_ms);
        apply_values(host, &animation.element, &values);
        let children = host.inverse_children(&animation.element, &id);
        compensate_children(
            host,
            &children,
            &values.matrix,
            animation.start_group.as_deref(),
            animation.end_group.as_deref(),
        );
        trace!(flip_id = %id, progress = animation.tween.progress(), "frame");

        if !animation.tween.is_finished() {
            continue;
        }
        if let Some(done) = registry.animations.remove(&id) {
            debug!(flip_id = %id, "flip completed");
            registry.pending_clears.push(done.element.clone());
            handler.on_complete(&done.transition());
        }
    }
}

fn apply_values<H: FlipHost>(host: &mut H, element: &H::Element, values: &FlipValues) {
    host.set_transform(element, &values.matrix.to_css());
    if let Some(opacity) = values.opacity {
        host.set_opacity(element, opacity);
    }
}

static_assertions::assert_impl_all!(FlipRegistry<crate::memory::NodeId>: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::events::{EventQueue, FlipEvent};
    use crate::animation::easing::EasingFunction;
    use crate::config::{AnimationOptIns, ElementConfig};
    use crate::geometry::{Rect, Viewport};
    use crate::memory::{MemoryDocument, NodeId, NodeSpec, StyleWrite};

    fn setup() -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
        let root = doc.root();
        let card = doc.append(
            root,
            NodeSpec::tracked("card")
                .rect(Rect::new(0.0, 0.0, 100.0, 100.0))
                .config(ElementConfig::new().with_opt_ins(AnimationOptIns::position())),
        );
        (doc, card)
    }

    fn defaults() -> AnimationDefaults {
        AnimationDefaults::new(100.0, EasingFunction::Linear).unwrap()
    }

    fn run_pass(
        doc: &mut MemoryDocument,
        registry: &mut FlipRegistry<NodeId>,
        events: &mut EventQueue<NodeId>,
        cached: &SnapshotMap,
    ) -> SnapshotMap {
        let root = doc.root();
        animate_move(
            doc,
            registry,
            events,
            AnimateMove {
                container: &root,
                cached,
                defaults: defaults(),
            },
        )
    }

    #[test]
    fn test_start_applies_from_synchronously() {
        let (mut doc, card) = setup();
        let mut registry = FlipRegistry::new();
        let mut events = EventQueue::new();
        let first = capture_snapshot(&doc, &doc.root());

        doc.set_rect(card, Rect::new(200.0, 0.0, 100.0, 100.0));
        run_pass(&mut doc, &mut registry, &mut events, &first);

        assert_eq!(doc.inline_transform(card), Some("matrix(1, 0, 0, 1, -200, 0)"));
        assert!(registry.is_animating("card"));
        assert_eq!(events.len(), 1);
        assert!(events.pop().unwrap().is_started());
    }

    #[test]
    fn test_tick_interpolates_and_completes() {
        let (mut doc, card) = setup();
        let mut registry = FlipRegistry::new();
        let mut events = EventQueue::new();
        let first = capture_snapshot(&doc, &doc.root());

        doc.set_rect(card, Rect::new(200.0, 0.0, 100.0, 100.0));
        run_pass(&mut doc, &mut registry, &mut events, &first);
        events.clear();

        tick(&mut doc, &mut registry, &mut events, 50.0);
        assert_eq!(doc.inline_transform(card), Some("matrix(1, 0, 0, 1, -100, 0)"));
        assert!(events.is_empty());

        tick(&mut doc, &mut registry, &mut events, 50.0);
        assert_eq!(doc.inline_transform(card), Some("matrix(1, 0, 0, 1, 0, 0)"));
        assert!(!registry.is_animating("card"));
        assert!(registry.has_pending_work());
        assert!(events.pop().unwrap().is_completed());

        tick(&mut doc, &mut registry, &mut events, 16.0);
        assert_eq!(doc.inline_transform(card), None);
        assert!(!registry.has_pending_work());
    }

    #[test]
    fn test_supersede_completes_previous_once() {
        let (mut doc, card) = setup();
        let mut registry = FlipRegistry::new();
        let mut events = EventQueue::new();
        let first = capture_snapshot(&doc, &doc.root());

        doc.set_rect(card, Rect::new(200.0, 0.0, 100.0, 100.0));
        let second = run_pass(&mut doc, &mut registry, &mut events, &first);
        tick(&mut doc, &mut registry, &mut events, 30.0);

        doc.set_rect(card, Rect::new(400.0, 0.0, 100.0, 100.0));
        run_pass(&mut doc, &mut registry, &mut events, &second);

        assert_eq!(registry.len(), 1);
        let kinds: Vec<bool> = events.drain().map(|e| e.is_started()).collect();
        assert_eq!(kinds, vec![true, false, true]);
    }

    #[test]
    fn test_detached_element_dropped_silently() {
        let (mut doc, card) = setup();
        let mut registry = FlipRegistry::new();
        let mut events = EventQueue::new();
        let first = capture_snapshot(&doc, &doc.root());

        doc.set_rect(card, Rect::new(200.0, 0.0, 100.0, 100.0));
        run_pass(&mut doc, &mut registry, &mut events, &first);
        events.clear();
        doc.detach(card);
        doc.clear_writes();

        tick(&mut doc, &mut registry, &mut events, 16.0);
        assert!(registry.is_empty());
        assert!(!registry.has_pending_work());
        assert!(events.is_empty());
        assert!(doc.writes().is_empty());
    }

    #[test]
    fn test_unchanged_layout_writes_nothing() {
        let (mut doc, _card) = setup();
        let mut registry = FlipRegistry::new();
        let mut events = EventQueue::new();
        let first = capture_snapshot(&doc, &doc.root());

        run_pass(&mut doc, &mut registry, &mut events, &first);
        assert!(registry.is_empty());
        assert!(events.is_empty());
        assert!(doc.writes().is_empty());
    }

    #[test]
    fn test_transform_origin_applied_at_start() {
        let (mut doc, card) = setup();
        doc.set_config(
            card,
            ElementConfig::new()
                .with_opt_ins(AnimationOptIns::all())
                .with_transform_origin("top left".parse().unwrap()),
        );
        let mut registry = FlipRegistry::new();
        let first = capture_snapshot(&doc, &doc.root());

        doc.set_rect(card, Rect::new(0.0, 0.0, 50.0, 100.0));
        let root = doc.root();
        animate_move(
            &mut doc,
            &mut registry,
            &mut (),
            AnimateMove {
                container: &root,
                cached: &first,
                defaults: defaults(),
            },
        );

        assert_eq!(doc.inline_transform_origin(card), Some("left top"));
        assert!(matches!(
            doc.writes()[0],
            StyleWrite::TransformOrigin { node, .. } if node == card
        ));
    }

    #[test]
    fn test_completed_event_carries_groups() {
        let (mut doc, card) = setup();
        doc.set_group(card, Some("list"));
        let mut registry = FlipRegistry::new();
        let mut events = EventQueue::new();
        let first = capture_snapshot(&doc, &doc.root());

        doc.set_group(card, Some("detail"));
        doc.set_rect(card, Rect::new(0.0, 300.0, 100.0, 100.0));
        run_pass(&mut doc, &mut registry, &mut events, &first);
        tick(&mut doc, &mut registry, &mut events, 1000.0);

        let FlipEvent::Completed(transition) = events.drain().last().unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(transition.element, card);
        assert_eq!(transition.start_group.as_deref(), Some("list"));
        assert_eq!(transition.end_group.as_deref(), Some("detail"));
    }
}
