use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AnimatedValue, Easing};
use crate::core::ValueRange;

/// Outcome of [`RangeAnimator::retarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeRetarget {
    /// Target equals the range already displayed or being animated to.
    Unchanged,
    /// Applied instantly because either end of the move is the zero sentinel.
    Jumped,
    Animating,
}

/// Animates the displayed value range towards the aggregated target.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAnimator {
    min: AnimatedValue,
    max: AnimatedValue,
}

impl RangeAnimator {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            min: AnimatedValue::new(0.0, duration, Easing::Linear),
            max: AnimatedValue::new(0.0, duration, Easing::Linear),
        }
    }

    /// Range consumed by renderers this frame.
    #[must_use]
    pub fn displayed(&self) -> ValueRange {
        ValueRange::new(self.min.value(), self.max.value())
    }

    #[must_use]
    pub fn target(&self) -> ValueRange {
        ValueRange::new(self.min.target(), self.max.target())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.min.is_active() || self.max.is_active()
    }

    pub fn retarget(&mut self, target: ValueRange) -> RangeRetarget {
        if self.target() == target {
            return RangeRetarget::Unchanged;
        }

        let current = self.displayed();
        if target.is_zero() || current.is_zero() {
            debug!(
                from_max = current.max,
                to_max = target.max,
                "value range applied without animation"
            );
            self.min.set_immediate(target.min);
            self.max.set_immediate(target.max);
            return RangeRetarget::Jumped;
        }

        debug!(
            from_max = current.max,
            to_max = target.max,
            chained = self.is_active(),
            "value range animation"
        );
        self.min.animate_to(target.min);
        self.max.animate_to(target.max);
        RangeRetarget::Animating
    }

    /// Drops any animation and shows `range` immediately.
    pub fn reset(&mut self, range: ValueRange) {
        self.min.set_immediate(range.min);
        self.max.set_immediate(range.max);
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        let min_running = self.min.advance(delta);
        let max_running = self.max.advance(delta);
        min_running || max_running
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;

    use super::{RangeAnimator, RangeRetarget};
    use crate::core::ValueRange;

    const DURATION: Duration = Duration::from_millis(250);

    #[test]
    fn first_range_jumps_from_zero_sentinel() {
        let mut animator = RangeAnimator::new(DURATION);
        let outcome = animator.retarget(ValueRange::new(0.0, 10.0));
        assert_eq!(outcome, RangeRetarget::Jumped);
        assert_eq!(animator.displayed(), ValueRange::new(0.0, 10.0));
        assert!(!animator.is_active());
    }

    #[test]
    fn collapse_to_zero_is_instant() {
        let mut animator = RangeAnimator::new(DURATION);
        animator.retarget(ValueRange::new(0.0, 10.0));
        animator.retarget(ValueRange::new(0.0, 20.0));
        assert_eq!(animator.retarget(ValueRange::ZERO), RangeRetarget::Jumped);
        assert_eq!(animator.displayed(), ValueRange::ZERO);
        assert!(!animator.is_active());
    }

    #[test]
    fn non_zero_change_animates_and_chains() {
        let mut animator = RangeAnimator::new(DURATION);
        animator.retarget(ValueRange::new(0.0, 100.0));
        assert_eq!(
            animator.retarget(ValueRange::new(0.0, 200.0)),
            RangeRetarget::Animating
        );
        animator.advance(Duration::from_millis(125));
        assert_abs_diff_eq!(animator.displayed().max, 150.0, epsilon = 1e-6);

        assert_eq!(
            animator.retarget(ValueRange::new(0.0, 50.0)),
            RangeRetarget::Animating
        );
        assert_abs_diff_eq!(animator.displayed().max, 150.0, epsilon = 1e-6);
        assert_eq!(animator.target(), ValueRange::new(0.0, 50.0));

        while animator.advance(Duration::from_millis(16)) {}
        assert_eq!(animator.displayed(), ValueRange::new(0.0, 50.0));
    }

    #[test]
    fn repeated_target_is_unchanged() {
        let mut animator = RangeAnimator::new(DURATION);
        animator.retarget(ValueRange::new(0.0, 100.0));
        animator.retarget(ValueRange::new(0.0, 120.0));
        assert_eq!(
            animator.retarget(ValueRange::new(0.0, 120.0)),
            RangeRetarget::Unchanged
        );
    }
}
