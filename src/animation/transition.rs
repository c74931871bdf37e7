use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Easing;

/// Lifecycle of one [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionPhase {
    Pending,
    Running,
    Finished,
    Canceled,
}

/// Extension points invoked while a transition is driven by the frame clock.
///
/// Each animated quantity supplies its own `on_update`; start and finish
/// hooks are optional.
pub trait TransitionHooks {
    fn on_start(&mut self) {}

    /// Called once per frame with the interpolated value and eased progress.
    fn on_update(&mut self, value: f64, progress: f64);

    fn on_finished(&mut self, _canceled: bool) {}
}

/// Adapts a value closure into [`TransitionHooks`].
pub struct OnUpdate<F>(pub F);

impl<F: FnMut(f64)> TransitionHooks for OnUpdate<F> {
    fn on_update(&mut self, value: f64, _progress: f64) {
        (self.0)(value);
    }
}

/// Interruptible scalar animation from `from` to `to`.
///
/// The transition owns no callbacks: hooks are passed to every driving call,
/// so the owner of the animated quantity stays the only writer of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    phase: TransitionPhase,
    progress: f64,
    nominal_duration: Duration,
    reference_span: f64,
}

impl Transition {
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
            phase: TransitionPhase::Pending,
            progress: 0.0,
            nominal_duration: duration,
            reference_span: (to - from).abs(),
        }
    }

    #[must_use]
    pub fn from_value(&self) -> f64 {
        self.from
    }

    #[must_use]
    pub fn to_value(&self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Eased progress in `[0, 1]`; frozen once canceled.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == TransitionPhase::Running
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.phase == TransitionPhase::Finished {
            return self.to;
        }
        self.from + (self.to - self.from) * self.progress
    }

    pub fn start<H: TransitionHooks + ?Sized>(&mut self, hooks: &mut H) {
        if self.phase != TransitionPhase::Pending {
            return;
        }

        self.phase = TransitionPhase::Running;
        hooks.on_start();
        if self.duration.is_zero() {
            self.complete(hooks);
            return;
        }
        hooks.on_update(self.from, 0.0);
    }

    /// Advances by one frame. Returns whether the transition is still running.
    pub fn advance<H: TransitionHooks + ?Sized>(&mut self, delta: Duration, hooks: &mut H) -> bool {
        if self.phase != TransitionPhase::Running {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.duration {
            self.complete(hooks);
            return false;
        }

        let linear = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.easing.apply(linear);
        // Monotonic even if an easing curve overshoots backwards.
        self.progress = eased.max(self.progress);
        trace!(
            from = self.from,
            to = self.to,
            progress = self.progress,
            "transition frame"
        );
        hooks.on_update(self.value(), self.progress);
        true
    }

    /// Stops a running transition, freezing its progress.
    pub fn cancel<H: TransitionHooks + ?Sized>(&mut self, hooks: &mut H) {
        if self.phase != TransitionPhase::Running {
            return;
        }
        self.phase = TransitionPhase::Canceled;
        hooks.on_finished(true);
    }

    /// Jumps straight to the final value, starting first when still pending.
    pub fn end<H: TransitionHooks + ?Sized>(&mut self, hooks: &mut H) {
        match self.phase {
            TransitionPhase::Pending => {
                self.phase = TransitionPhase::Running;
                hooks.on_start();
                self.complete(hooks);
            }
            TransitionPhase::Running => self.complete(hooks),
            TransitionPhase::Finished | TransitionPhase::Canceled => {}
        }
    }

    /// Cancels this transition and returns a pending successor that continues
    /// from the current interpolated value towards `target`.
    ///
    /// The successor duration is the nominal duration scaled by the remaining
    /// distance relative to the first transition of the chain, so the speed
    /// stays constant however often the target moves.
    pub fn successor<H: TransitionHooks + ?Sized>(&mut self, target: f64, hooks: &mut H) -> Self {
        let current = self.value();
        self.cancel(hooks);

        let distance = (target - current).abs();
        let (fraction, reference_span) = if self.reference_span > 0.0 {
            ((distance / self.reference_span).min(1.0), self.reference_span)
        } else {
            (1.0, distance)
        };

        Self {
            from: current,
            to: target,
            duration: self.nominal_duration.mul_f64(fraction),
            elapsed: Duration::ZERO,
            easing: self.easing,
            phase: TransitionPhase::Pending,
            progress: 0.0,
            nominal_duration: self.nominal_duration,
            reference_span,
        }
    }

    fn complete<H: TransitionHooks + ?Sized>(&mut self, hooks: &mut H) {
        self.elapsed = self.duration;
        self.progress = 1.0;
        self.phase = TransitionPhase::Finished;
        hooks.on_update(self.to, 1.0);
        hooks.on_finished(false);
    }
}
