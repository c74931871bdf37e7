use std::time::Duration;

use super::{Easing, Transition, TransitionHooks};

/// Writes transition output into the owning quantity.
struct ValueSink<'a> {
    value: &'a mut f64,
}

impl TransitionHooks for ValueSink<'_> {
    fn on_update(&mut self, value: f64, _progress: f64) {
        *self.value = value;
    }
}

/// Scalar quantity with at most one live transition.
///
/// Retargeting while a transition runs grafts a successor onto the current
/// interpolated value instead of restarting from the old origin.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    value: f64,
    transition: Option<Transition>,
    duration: Duration,
    easing: Easing,
}

impl AnimatedValue {
    #[must_use]
    pub fn new(value: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            value,
            transition: None,
            duration,
            easing,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value the quantity is heading to.
    #[must_use]
    pub fn target(&self) -> f64 {
        match &self.transition {
            Some(transition) if transition.is_active() => transition.to_value(),
            _ => self.value,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.transition.as_ref().is_some_and(Transition::is_active)
    }

    #[must_use]
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Starts animating towards `target`. A no-op when already there or
    /// already heading there.
    pub fn animate_to(&mut self, target: f64) {
        if self.target() == target {
            return;
        }

        let mut sink = ValueSink {
            value: &mut self.value,
        };
        let mut next = match &mut self.transition {
            Some(active) if active.is_active() => active.successor(target, &mut sink),
            _ => Transition::new(*sink.value, target, self.duration, self.easing),
        };
        next.start(&mut sink);
        self.transition = Some(next);
    }

    /// Cancels any live transition and applies `value` instantly.
    pub fn set_immediate(&mut self, value: f64) {
        if let Some(active) = &mut self.transition {
            active.cancel(&mut ValueSink {
                value: &mut self.value,
            });
        }
        self.transition = None;
        self.value = value;
    }

    /// Advances one frame. Returns whether the transition is still running.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(active) = &mut self.transition else {
            return false;
        };
        let running = active.advance(
            delta,
            &mut ValueSink {
                value: &mut self.value,
            },
        );
        if !running {
            self.transition = None;
        }
        running
    }

    /// Finishes any live transition at its target.
    pub fn end(&mut self) {
        if let Some(active) = &mut self.transition {
            active.end(&mut ValueSink {
                value: &mut self.value,
            });
        }
        self.transition = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;

    use super::AnimatedValue;
    use crate::animation::Easing;

    #[test]
    fn retarget_mid_flight_keeps_current_value() {
        let mut alpha = AnimatedValue::new(1.0, Duration::from_millis(200), Easing::Linear);
        alpha.animate_to(0.0);
        alpha.advance(Duration::from_millis(50));
        assert_abs_diff_eq!(alpha.value(), 0.75, epsilon = 1e-9);

        alpha.animate_to(1.0);
        assert_abs_diff_eq!(alpha.value(), 0.75, epsilon = 1e-9);
        assert_eq!(alpha.target(), 1.0);
        let successor = alpha.transition().expect("successor");
        assert_abs_diff_eq!(successor.from_value(), 0.75, epsilon = 1e-9);
        assert_abs_diff_eq!(successor.duration().as_secs_f64(), 0.050, epsilon = 1e-6);
    }

    #[test]
    fn same_target_is_not_restarted() {
        let mut alpha = AnimatedValue::new(0.0, Duration::from_millis(200), Easing::Linear);
        alpha.animate_to(1.0);
        alpha.advance(Duration::from_millis(100));
        alpha.animate_to(1.0);
        assert_abs_diff_eq!(
            alpha.transition().expect("running").elapsed().as_secs_f64(),
            0.1,
            epsilon = 1e-9
        );
    }

    #[test]
    fn completes_and_drops_transition() {
        let mut value = AnimatedValue::new(0.0, Duration::from_millis(100), Easing::Accelerate);
        value.animate_to(8.0);
        assert!(value.advance(Duration::from_millis(40)));
        assert!(!value.advance(Duration::from_millis(60)));
        assert_eq!(value.value(), 8.0);
        assert!(value.transition().is_none());
    }

    #[test]
    fn set_immediate_cancels_live_transition() {
        let mut value = AnimatedValue::new(0.0, Duration::from_millis(100), Easing::Linear);
        value.animate_to(8.0);
        value.set_immediate(3.0);
        assert!(!value.is_active());
        assert_eq!(value.value(), 3.0);
    }
}
