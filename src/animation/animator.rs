use serde::{Deserialize, Serialize};

use super::interpolate::{Interpolate, ease_out_quad};

/// Default slot duration in seconds.
pub const DEFAULT_ANIMATION_DURATION: f64 = 0.5;

/// Duration of Y-interval slots in seconds.
pub const INTERVAL_ANIMATION_DURATION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Finished,
    InProgress,
}

/// One animatable quantity interpolated on clock ticks.
///
/// The animator does not own the value it drives: `animate` and `update`
/// return the value to apply and the owner writes it wherever it belongs.
/// Starting a new animation overrides the one in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator<T: Interpolate> {
    duration: f64,
    from: Option<T>,
    to: Option<T>,
    elapsed: f64,
    previous_timestamp: Option<f64>,
    state: AnimationState,
}

impl<T: Interpolate> Animator<T> {
    /// Creates a finished slot. Non-positive or non-finite durations fall
    /// back to [`DEFAULT_ANIMATION_DURATION`].
    #[must_use]
    pub fn new(duration: f64) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            DEFAULT_ANIMATION_DURATION
        };
        Self {
            duration,
            from: None,
            to: None,
            elapsed: 0.0,
            previous_timestamp: None,
            state: AnimationState::Finished,
        }
    }

    /// Starts animating from `from` to `to`.
    ///
    /// Equal endpoints skip the animation: `Some(to)` is returned right away
    /// and the slot stays finished. Otherwise `None` is returned and values
    /// are delivered by [`Animator::update`].
    pub fn animate(&mut self, from: T, to: T) -> Option<T> {
        self.reset();
        self.from = Some(from);
        self.to = Some(to);

        if from == to {
            return Some(to);
        }
        self.state = AnimationState::InProgress;
        None
    }

    /// Advances the slot to the clock `timestamp` (seconds).
    ///
    /// Returns the interpolated value on every in-progress tick; the tick
    /// that completes the animation returns exactly the target value.
    pub fn update(&mut self, timestamp: f64) -> Option<T> {
        let delta = self
            .previous_timestamp
            .map_or(0.0, |previous| (timestamp - previous).max(0.0));
        self.previous_timestamp = Some(timestamp);

        if self.state != AnimationState::InProgress {
            return None;
        }
        let (Some(from), Some(to)) = (self.from, self.to) else {
            self.state = AnimationState::Finished;
            return None;
        };

        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = AnimationState::Finished;
            return Some(to);
        }
        Some(from.lerp(to, self.eased_progress()))
    }

    /// Stops the slot without delivering a value.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.state = AnimationState::Finished;
    }

    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.state == AnimationState::InProgress
    }

    /// Linear progress in `[0, 1]`; 1 once finished.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match self.state {
            AnimationState::Finished => 1.0,
            AnimationState::InProgress => (self.elapsed / self.duration).clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn eased_progress(&self) -> f64 {
        ease_out_quad(self.progress())
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn from_value(&self) -> Option<T> {
        self.from
    }

    #[must_use]
    pub fn to_value(&self) -> Option<T> {
        self.to
    }
}

impl<T: Interpolate> Default for Animator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_DURATION)
    }
}
