//! Easing curves for flip transitions.
//!
//! Two families are supported:
//! - CSS timing functions (`linear`, `ease`, `ease-in`, `ease-out`,
//!   `ease-in-out`, custom cubic bezier, steps)
//! - The named tween curves elements refer to by name (`easeIn`, `easeOut`,
//!   `easeInOut`, `circIn`, `circOut`, `circInOut`, `backIn`, `backOut`,
//!   `backInOut`, `anticipate`)
//!
//! # Usage
//!
//! ```
//! use flip_scene::animation::easing::EasingFunction;
//!
//! let ease: EasingFunction = "backOut".parse().unwrap();
//! let progress = ease.evaluate(0.5);
//! assert!(progress > 0.5);
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlipError;

/// Overshoot used by the back and anticipate curves.
const BACK_POWER: f32 = 1.525;

/// Position for stepped animations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end`).
    #[default]
    End,
}

/// Easing function for animation timing.
///
/// Maps linear progress in `[0, 1]` to eased progress. Back and anticipate
/// curves overshoot outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Custom cubic bezier curve. x values must be in [0, 1].
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Stepped animation with discrete jumps.
    Steps { count: u32, position: StepPosition },
    /// Quadratic ease in, `p²` (named `easeIn`).
    QuadIn,
    /// Reversed quadratic (named `easeOut`).
    #[default]
    QuadOut,
    /// Mirrored quadratic (named `easeInOut`).
    QuadInOut,
    /// Circular ease in, `1 - sin(acos(p))`.
    CircIn,
    CircOut,
    CircInOut,
    /// Back ease in: pulls back before moving forward.
    BackIn,
    BackOut,
    BackInOut,
    /// Back-in for the first half, exponential settle for the second.
    Anticipate,
}

impl EasingFunction {
    /// Evaluate the easing function at the given progress (clamped to [0, 1]).
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
            Self::Steps { count, position } => stepped(*count, *position, t),
            Self::QuadIn => quad_in(t),
            Self::QuadOut => reversed(quad_in, t),
            Self::QuadInOut => mirrored(quad_in, t),
            Self::CircIn => circ_in(t),
            Self::CircOut => reversed(circ_in, t),
            Self::CircInOut => mirrored(circ_in, t),
            Self::BackIn => back_in(t),
            Self::BackOut => reversed(back_in, t),
            Self::BackInOut => mirrored(back_in, t),
            Self::Anticipate => anticipate(t),
        }
    }

    /// Resolve an easing curve by name.
    ///
    /// Accepts the camelCase tween names (`easeOut`, `circInOut`, ...) and the
    /// CSS keywords (`ease`, `ease-in-out`, ...). Returns `None` for anything
    /// else.
    pub fn from_name(name: &str) -> Option<Self> {
        let easing = match name {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            "easeIn" => Self::QuadIn,
            "easeOut" => Self::QuadOut,
            "easeInOut" => Self::QuadInOut,
            "circIn" => Self::CircIn,
            "circOut" => Self::CircOut,
            "circInOut" => Self::CircInOut,
            "backIn" => Self::BackIn,
            "backOut" => Self::BackOut,
            "backInOut" => Self::BackInOut,
            "anticipate" => Self::Anticipate,
            _ => return None,
        };
        Some(easing)
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Create a stepped easing function.
    ///
    /// # Panics
    /// Panics if steps is 0.
    pub fn steps(steps: u32, position: StepPosition) -> Self {
        assert!(steps >= 1, "Steps must be at least 1");
        Self::Steps {
            count: steps,
            position,
        }
    }
}

impl FromStr for EasingFunction {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| FlipError::UnknownEasing(s.to_string()))
    }
}

#[inline]
fn quad_in(p: f32) -> f32 {
    p * p
}

#[inline]
fn circ_in(p: f32) -> f32 {
    1.0 - p.acos().sin()
}

#[inline]
fn back_in(p: f32) -> f32 {
    p * p * ((BACK_POWER + 1.0) * p - BACK_POWER)
}

fn anticipate(p: f32) -> f32 {
    let p = p * 2.0;
    if p < 1.0 {
        0.5 * back_in(p)
    } else {
        0.5 * (2.0 - 2f32.powf(-10.0 * (p - 1.0)))
    }
}

/// Turn an ease-in curve into its ease-out counterpart.
#[inline]
fn reversed(curve: fn(f32) -> f32, p: f32) -> f32 {
    1.0 - curve(1.0 - p)
}

/// Ease in over the first half, ease out over the second.
#[inline]
fn mirrored(curve: fn(f32) -> f32, p: f32) -> f32 {
    if p <= 0.5 {
        curve(2.0 * p) / 2.0
    } else {
        (2.0 - curve(2.0 * (1.0 - p))) / 2.0
    }
}

/// Evaluate a cubic bezier curve at time t.
///
/// Newton-Raphson finds the curve parameter for the input progress on the x
/// axis, then the y coordinate is evaluated at that parameter.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let mut t = progress;
    for _ in 0..8 {
        let x = bezier_axis(x1, x2, t) - progress;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_axis_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t = (t - x / dx).clamp(0.0, 1.0);
    }

    bezier_axis(y1, y2, t)
}

/// One coordinate of the bezier curve: 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_axis(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_axis_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

fn stepped(steps: u32, position: StepPosition, t: f32) -> f32 {
    if steps == 0 {
        return t;
    }

    let steps_f = steps as f32;
    match position {
        StepPosition::Start => (t * steps_f).ceil() / steps_f,
        StepPosition::End => (t * steps_f).floor() / steps_f,
    }
}
