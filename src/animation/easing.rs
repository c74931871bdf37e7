use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curves mapping linear time progress to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start (`t²`).
    Accelerate,
    /// Slow end (`1 - (1 - t)²`).
    Decelerate,
    /// Slow start and end, cosine shaped.
    AccelerateDecelerate,
}

impl Easing {
    /// Applies the curve to `t`, clamped into `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::Accelerate => t * t,
            Self::Decelerate => {
                let inverse = 1.0 - t;
                1.0 - inverse * inverse
            }
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}
