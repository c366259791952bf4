//! FLIP layout transitions.
//!
//! Record where tracked elements are ("First"), let the layout change
//! ("Last"), apply the transform that puts each element back where it was
//! ("Invert"), then interpolate that transform away frame by frame ("Play").
//!
//! The engine is host-agnostic: all reads and writes go through
//! [`FlipHost`]. [`MemoryDocument`] is an in-memory host for tests and demos.
//!
//! ```
//! use flip_scene::{
//!     AnimationDefaults, AnimationOptIns, ElementConfig, EventQueue, Flipper, MemoryDocument,
//!     NodeSpec, Rect, Viewport,
//! };
//!
//! let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
//! let root = doc.root();
//! let card = doc.append(
//!     root,
//!     NodeSpec::tracked("card")
//!         .rect(Rect::new(0.0, 0.0, 100.0, 100.0))
//!         .config(ElementConfig::new().with_opt_ins(AnimationOptIns::position())),
//! );
//!
//! let mut flipper = Flipper::new(root, AnimationDefaults::default());
//! let mut events = EventQueue::new();
//! flipper.record(&doc);
//! doc.set_rect(card, Rect::new(300.0, 0.0, 100.0, 100.0));
//! flipper.animate(&mut doc, &mut events);
//! assert_eq!(doc.inline_transform(card), Some("matrix(1, 0, 0, 1, -300, 0)"));
//!
//! while flipper.has_pending_work() {
//!     flipper.tick(&mut doc, &mut events, 16.0);
//! }
//! assert_eq!(doc.inline_transform(card), None);
//! ```

pub mod animation;
pub mod compensation;
pub mod config;
pub mod driver;
pub mod error;
pub mod flipper;
pub mod geometry;
pub mod host;
pub mod memory;
pub mod snapshot;
pub mod synthesis;

pub use animation::{
    EasingFunction, EventQueue, FlipCallbacks, FlipEvent, FlipEventHandler, FlipTransition,
    FlipValues, TransformMatrix, TransformOrigin,
};
pub use compensation::InverseTransform;
pub use config::{AnimationDefaults, AnimationOptIns, ComponentFilter, ElementConfig};
pub use driver::{AnimateMove, FlipRegistry, InFlightAnimation, animate_move, tick};
pub use error::{FlipError, Result};
pub use flipper::Flipper;
pub use geometry::{Rect, Viewport};
pub use host::FlipHost;
pub use memory::{MemoryDocument, NodeId, NodeSpec, StyleWrite};
pub use snapshot::{ElementSnapshot, SnapshotMap, capture_snapshot};
pub use synthesis::{FlipPlan, SkipReason};
