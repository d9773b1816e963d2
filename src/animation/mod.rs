//! Frame-synchronized value interpolation.

mod animator;
mod frame_clock;
mod interpolate;

pub use animator::{
    AnimationState, Animator, DEFAULT_ANIMATION_DURATION, INTERVAL_ANIMATION_DURATION,
};
pub use frame_clock::{ClockRegistration, FrameClock, FrameListener};
pub use interpolate::{Interpolate, ease_out_quad};
