//! Time-based interpolation of flip values.
//!
//! A [`Tween`] owns the "from" and "to" values of one flip animation and is
//! advanced by the driver once per frame. Matrix and opacity share the same
//! timeline and easing.

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::interpolate::{FlipValues, Interpolate};

/// Current state of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenState {
    /// Tween is advancing.
    #[default]
    Running,
    /// Tween reached its end value.
    Finished,
    /// Tween was halted before reaching its end value.
    Stopped,
}

/// Duration and easing for one tween.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenSettings {
    pub duration_ms: f32,
    pub easing: EasingFunction,
}

impl TweenSettings {
    pub fn new(duration_ms: f32, easing: EasingFunction) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

/// Runtime state of one in-progress interpolation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: FlipValues,
    pub to: FlipValues,
    pub settings: TweenSettings,
    pub elapsed_ms: f32,
    pub state: TweenState,
}

impl Tween {
    pub fn new(from: FlipValues, to: FlipValues, settings: TweenSettings) -> Self {
        Self {
            from,
            to,
            settings,
            elapsed_ms: 0.0,
            state: TweenState::Running,
        }
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.settings.duration_ms > 0.0 {
            (self.elapsed_ms / self.settings.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Values at the current point of the timeline.
    pub fn current_values(&self) -> FlipValues {
        match self.state {
            TweenState::Finished => self.to,
            TweenState::Running | TweenState::Stopped => {
                let eased = self.settings.easing.evaluate(self.progress());
                self.from.interpolate(&self.to, eased)
            }
        }
    }

    /// Advance by `delta_ms` and return the values for this frame.
    ///
    /// Once the duration is reached the tween finishes and yields exactly the
    /// "to" values. A stopped tween does not move.
    pub fn advance(&mut self, delta_ms: f32) -> FlipValues {
        if self.state == TweenState::Running {
            self.elapsed_ms += delta_ms.max(0.0);
            if self.elapsed_ms >= self.settings.duration_ms {
                self.elapsed_ms = self.settings.duration_ms.max(0.0);
                self.state = TweenState::Finished;
            }
        }
        self.current_values()
    }

    /// Halt the tween where it is.
    pub fn stop(&mut self) {
        if self.state == TweenState::Running {
            self.state = TweenState::Stopped;
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Finished
    }
}
