//! Interruptible value animation driven by the host frame clock.
//!
//! Every animated quantity in the chart (value range, series opacity, label
//! and ruler alpha) is a [`Transition`] parametrized by `(from, to, duration,
//! easing)`. Nothing here runs on its own: owners call `advance` once per
//! frame from the UI thread.

mod animated_value;
mod easing;
mod range_animator;
mod transition;

pub use animated_value::AnimatedValue;
pub use easing::Easing;
pub use range_animator::{RangeAnimator, RangeRetarget};
pub use transition::{OnUpdate, Transition, TransitionHooks, TransitionPhase};
