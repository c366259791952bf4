//! Lifecycle events for flip animations.
//!
//! Every animation produces exactly one `Started` event and at most one
//! `Completed` event. It completes when it reaches its end values, or at the
//! moment a newer animation for the same flip id supersedes it. Animations
//! whose element leaves the document are dropped without a `Completed` event.
//!
//! Events reach the caller through a [`FlipEventHandler`]. Three handlers ship
//! with the crate:
//! - `()` ignores everything
//! - [`EventQueue`] records events for polling after a pass or tick
//! - [`FlipCallbacks`] dispatches to per-flip-id closures
//!
//! # Usage
//!
//! ```ignore
//! let mut events = EventQueue::new();
//! flipper.tick(&mut document, &mut events, 16.0);
//! for event in events.drain() {
//!     if let FlipEvent::Completed(t) = event {
//!         println!("{} settled", t.flip_id);
//!     }
//! }
//! ```

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

/// The element and endpoints of one flip transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipTransition<E> {
    /// Stable identity of the flipped element.
    pub flip_id: String,
    /// Host handle of the live element.
    pub element: E,
    /// Group identity from the previous snapshot.
    pub start_group: Option<String>,
    /// Group identity from the current snapshot.
    pub end_group: Option<String>,
}

/// Event emitted when a flip animation changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "transition", rename_all = "snake_case")]
pub enum FlipEvent<E> {
    /// "From" styles were applied and interpolation is about to run.
    Started(FlipTransition<E>),
    /// Interpolation finished, or was superseded by a newer animation.
    Completed(FlipTransition<E>),
}

impl<E> FlipEvent<E> {
    pub fn transition(&self) -> &FlipTransition<E> {
        match self {
            Self::Started(t) | Self::Completed(t) => t,
        }
    }

    pub fn flip_id(&self) -> &str {
        &self.transition().flip_id
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Receives flip lifecycle notifications. Both hooks default to no-ops.
pub trait FlipEventHandler<E> {
    fn on_start(&mut self, transition: &FlipTransition<E>) {
        let _ = transition;
    }

    fn on_complete(&mut self, transition: &FlipTransition<E>) {
        let _ = transition;
    }
}

impl<E> FlipEventHandler<E> for () {}

/// Queue for collecting flip events during passes and ticks.
#[derive(Debug)]
pub struct EventQueue<E> {
    events: VecDeque<FlipEvent<E>>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FlipEvent<E>) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<FlipEvent<E>> {
        self.events.pop_front()
    }

    /// Drain all events in the order they were emitted.
    pub fn drain(&mut self) -> impl Iterator<Item = FlipEvent<E>> + '_ {
        self.events.drain(..)
    }

    pub fn peek(&self) -> Option<&FlipEvent<E>> {
        self.events.front()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Pending events for one flip id.
    pub fn events_for(&self, flip_id: &str) -> Vec<&FlipEvent<E>> {
        self.events.iter().filter(|e| e.flip_id() == flip_id).collect()
    }
}

impl<E: Clone> FlipEventHandler<E> for EventQueue<E> {
    fn on_start(&mut self, transition: &FlipTransition<E>) {
        self.push(FlipEvent::Started(transition.clone()));
    }

    fn on_complete(&mut self, transition: &FlipTransition<E>) {
        self.push(FlipEvent::Completed(transition.clone()));
    }
}

/// Per-element callback: `(element, previous group id)`.
pub type FlipCallback<E> = Box<dyn FnMut(&E, Option<&str>)>;

struct CallbackPair<E> {
    on_start: Option<FlipCallback<E>>,
    on_complete: Option<FlipCallback<E>>,
}

/// Start/complete callbacks registered per flip id.
pub struct FlipCallbacks<E> {
    callbacks: HashMap<String, CallbackPair<E>>,
}

impl<E> Default for FlipCallbacks<E> {
    fn default() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }
}

impl<E> FlipCallbacks<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback run when `flip_id` starts animating.
    pub fn with_on_start(
        mut self,
        flip_id: impl Into<String>,
        callback: impl FnMut(&E, Option<&str>) + 'static,
    ) -> Self {
        self.entry(flip_id).on_start = Some(Box::new(callback));
        self
    }

    /// Register the callback run when `flip_id` finishes or is superseded.
    pub fn with_on_complete(
        mut self,
        flip_id: impl Into<String>,
        callback: impl FnMut(&E, Option<&str>) + 'static,
    ) -> Self {
        self.entry(flip_id).on_complete = Some(Box::new(callback));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    fn entry(&mut self, flip_id: impl Into<String>) -> &mut CallbackPair<E> {
        self.callbacks
            .entry(flip_id.into())
            .or_insert_with(|| CallbackPair {
                on_start: None,
                on_complete: None,
            })
    }
}

impl<E> FlipEventHandler<E> for FlipCallbacks<E> {
    fn on_start(&mut self, transition: &FlipTransition<E>) {
        if let Some(callback) = self
            .callbacks
            .get_mut(&transition.flip_id)
            .and_then(|pair| pair.on_start.as_mut())
        {
            callback(&transition.element, transition.start_group.as_deref());
        }
    }

    fn on_complete(&mut self, transition: &FlipTransition<E>) {
        if let Some(callback) = self
            .callbacks
            .get_mut(&transition.flip_id)
            .and_then(|pair| pair.on_complete.as_mut())
        {
            callback(&transition.element, transition.start_group.as_deref());
        }
    }
}
