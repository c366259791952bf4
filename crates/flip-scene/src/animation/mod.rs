//! Animation primitives for the flip driver.
//!
//! This module provides:
//! - **Matrices**: 4x4 transforms in CSS `matrix3d` order, parsing and rendering
//! - **Easing Functions**: CSS timing functions and the named tween curves
//! - **Tweens**: Frame-advanced interpolation of transform + opacity
//! - **Events**: Started/Completed lifecycle notifications and handlers
//!
//! # Architecture
//!
//! ```text
//! FlipRegistry (driver)
//!   └── InFlightAnimation per flip id
//!         └── Tween (FlipValues from → to, EasingFunction)
//!
//! FlipEventHandler
//!   └── receives Started / Completed for each animation
//! ```

pub mod easing;
pub mod events;
pub mod interpolate;
pub mod matrix;
pub mod transform_origin;
pub mod tween;

pub use easing::{EasingFunction, StepPosition};
pub use events::{EventQueue, FlipCallback, FlipCallbacks, FlipEvent, FlipEventHandler, FlipTransition};
pub use interpolate::{FlipValues, Interpolate};
pub use matrix::TransformMatrix;
pub use transform_origin::{NamedOrigin, TransformOrigin};
pub use tween::{Tween, TweenSettings, TweenState};
