use std::time::Duration;

use crate::animation::{AnimatedValue, Easing};
use crate::core::VisibilitySet;

/// Per-series line opacity faded on visibility toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOpacity {
    alphas: Vec<AnimatedValue>,
}

impl SeriesOpacity {
    #[must_use]
    pub fn new(visibility: &VisibilitySet, duration: Duration) -> Self {
        let alphas = visibility
            .as_slice()
            .iter()
            .map(|visible| {
                let alpha = if *visible { 1.0 } else { 0.0 };
                AnimatedValue::new(alpha, duration, Easing::AccelerateDecelerate)
            })
            .collect();
        Self { alphas }
    }

    /// Alpha of series `index` this frame, zero for unknown indices.
    #[must_use]
    pub fn alpha(&self, index: usize) -> f64 {
        self.alphas.get(index).map_or(0.0, AnimatedValue::value)
    }

    /// Starts fading `index` towards its new visibility.
    pub fn fade_to(&mut self, index: usize, visible: bool) {
        if let Some(alpha) = self.alphas.get_mut(index) {
            alpha.animate_to(if visible { 1.0 } else { 0.0 });
        }
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        self.alphas
            .iter_mut()
            .fold(false, |running, alpha| alpha.advance(delta) || running)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.alphas.iter().any(AnimatedValue::is_active)
    }
}
