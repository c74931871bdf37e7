use std::collections::BTreeMap;
use std::time::Duration;

use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use super::crossfade::{Crossfade, FadingSet, RetireFrom};
use crate::core::ValueRange;

/// Number of gridlines in every ruler set, including the zero baseline.
pub const RULER_COUNT: usize = 6;

const STEP_CHANGE_THRESHOLD: f64 = 0.05;

/// Horizontal gridlines for one value step: value mapped to pixel y.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerSet {
    step: f64,
    lines: BTreeMap<OrderedFloat<f64>, f64>,
}

impl RulerSet {
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.lines.keys().map(|value| value.into_inner())
    }

    /// `(value, y)` pairs, lowest value first.
    pub fn lines(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lines.iter().map(|(value, y)| (value.into_inner(), *y))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Chooses gridline values from the value range and maps them to pixels.
#[derive(Debug, Clone)]
pub struct RulerPlanner {
    step: f64,
    sets: Crossfade<RulerSet>,
}

impl RulerPlanner {
    #[must_use]
    pub fn new(fade_duration: Duration) -> Self {
        Self {
            step: 0.0,
            sets: Crossfade::new(fade_duration, RetireFrom::CurrentAlpha),
        }
    }

    /// Step of the current ruler set, zero before the first plan.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn current(&self) -> Option<&RulerSet> {
        self.sets.current().map(|set| &set.items)
    }

    #[must_use]
    pub fn retired_len(&self) -> usize {
        self.sets.retired_len()
    }

    /// Plans rulers for `range`. Returns `true` when a new set replaced the
    /// current one; small relative step changes are ignored.
    pub fn plan(&mut self, range: ValueRange) -> bool {
        let Some(step) = ruler_step(range) else {
            return false;
        };
        if self.step > 0.0 && (self.step / step - 1.0).abs() <= STEP_CHANGE_THRESHOLD {
            return false;
        }

        let lines = (0..RULER_COUNT)
            .map(|k| (OrderedFloat(range.min + step * k as f64), 0.0))
            .collect();
        debug!(step, previous_step = self.step, "ruler set replaced");
        self.step = step;
        self.sets.replace(RulerSet { step, lines });
        true
    }

    /// Recomputes pixel y of every ruler (retired ones included) for the
    /// range displayed this frame. `plot_bottom` is where `range.min` lands.
    pub fn layout(&mut self, displayed: ValueRange, plot_top: f64, plot_bottom: f64) -> bool {
        let Some(y_scale) = displayed.y_scale(plot_bottom - plot_top) else {
            trace!("rulers skipped for degenerate range");
            return false;
        };
        for set in self.sets.iter_mut() {
            for (value, y) in &mut set.items.lines {
                *y = plot_bottom - (value.into_inner() - displayed.min) * y_scale;
            }
        }
        true
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        self.sets.advance(delta)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sets.is_active()
    }

    pub fn visible_sets(&self) -> impl Iterator<Item = &FadingSet<RulerSet>> + '_ {
        self.sets.iter_visible()
    }
}

/// `ceil(span * 0.8 / 5)`, `None` when nothing is drawable.
#[must_use]
pub fn ruler_step(range: ValueRange) -> Option<f64> {
    let span = range.span();
    if !span.is_finite() || span <= 0.0 {
        return None;
    }
    let step = (span * 0.8 / (RULER_COUNT - 1) as f64).ceil();
    (step > 0.0).then_some(step)
}
