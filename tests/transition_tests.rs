use std::time::Duration;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use tchart::animation::{
    AnimatedValue, Easing, OnUpdate, RangeAnimator, RangeRetarget, Transition, TransitionPhase,
};
use tchart::core::ValueRange;

const DURATION: Duration = Duration::from_millis(250);

fn easing_strategy() -> impl Strategy<Value = Easing> {
    prop_oneof![
        Just(Easing::Linear),
        Just(Easing::Accelerate),
        Just(Easing::Decelerate),
        Just(Easing::AccelerateDecelerate),
    ]
}

#[test]
fn easing_curves_pin_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::Accelerate,
        Easing::Decelerate,
        Easing::AccelerateDecelerate,
    ] {
        assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn on_update_closure_receives_interpolated_values() {
    let mut seen = Vec::new();
    let mut transition = Transition::new(0.0, 8.0, Duration::from_millis(100), Easing::Linear);
    {
        let mut hooks = OnUpdate(|value: f64| seen.push(value));
        transition.start(&mut hooks);
        transition.advance(Duration::from_millis(50), &mut hooks);
        transition.advance(Duration::from_millis(50), &mut hooks);
    }
    assert_eq!(transition.phase(), TransitionPhase::Finished);
    assert_eq!(seen.first().copied(), Some(0.0));
    assert_abs_diff_eq!(seen[1], 4.0, epsilon = 1e-9);
    assert_eq!(seen.last().copied(), Some(8.0));
}

#[test]
fn animated_value_chains_without_jumping() {
    let mut value = AnimatedValue::new(0.0, DURATION, Easing::Linear);
    value.animate_to(100.0);
    value.advance(Duration::from_millis(100));
    let before = value.value();
    assert_abs_diff_eq!(before, 40.0, epsilon = 1e-6);

    value.animate_to(0.0);
    assert_abs_diff_eq!(value.value(), before, epsilon = 1e-9);
    let successor = value.transition().expect("successor running");
    assert_abs_diff_eq!(successor.from_value(), before, epsilon = 1e-9);
    assert_abs_diff_eq!(successor.duration().as_secs_f64(), 0.1, epsilon = 1e-6);

    while value.advance(Duration::from_millis(16)) {}
    assert_eq!(value.value(), 0.0);
    assert!(!value.is_active());
}

#[test]
fn range_animator_reports_outcomes() {
    let mut range = RangeAnimator::new(DURATION);
    assert_eq!(range.retarget(ValueRange::new(0.0, 10.0)), RangeRetarget::Jumped);
    assert_eq!(range.retarget(ValueRange::new(0.0, 10.0)), RangeRetarget::Unchanged);
    assert_eq!(
        range.retarget(ValueRange::new(0.0, 30.0)),
        RangeRetarget::Animating
    );
    assert!(range.is_active());
    range.reset(ValueRange::new(0.0, 5.0));
    assert!(!range.is_active());
    assert_eq!(range.displayed(), ValueRange::new(0.0, 5.0));
}

proptest! {
    #[test]
    fn successor_starts_at_interpolated_value(
        from in -1_000.0f64..1_000.0,
        to in -1_000.0f64..1_000.0,
        next in -1_000.0f64..1_000.0,
        elapsed_ms in 1u64..249,
        easing in easing_strategy()
    ) {
        let mut transition = Transition::new(from, to, DURATION, easing);
        let mut hooks = OnUpdate(|_: f64| {});
        transition.start(&mut hooks);
        transition.advance(Duration::from_millis(elapsed_ms), &mut hooks);

        let progress = elapsed_ms as f64 / DURATION.as_millis() as f64;
        let expected = from + (to - from) * easing.apply(progress);
        let successor = transition.successor(next, &mut hooks);

        prop_assert!((successor.from_value() - expected).abs() <= 1e-6);
        prop_assert_eq!(successor.to_value(), next);
        prop_assert_eq!(transition.phase(), TransitionPhase::Canceled);
        prop_assert!(successor.duration() <= DURATION);
    }
}
