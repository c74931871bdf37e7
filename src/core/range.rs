use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{ChartDataset, VisibilitySet};

/// Value range displayed on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Sentinel meaning "flat line, nothing to scale".
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    /// Pixel scale for a surface of `height_px`, `None` for an empty span.
    #[must_use]
    pub fn y_scale(self, height_px: f64) -> Option<f64> {
        let span = self.span();
        if span == 0.0 || !span.is_finite() || height_px <= 0.0 {
            return None;
        }
        Some(height_px / span)
    }
}

/// Computes the displayed value range over an index window and the visible
/// series subset.
///
/// The minimum is pinned to zero so the chart always shows a zero baseline.
#[derive(Debug, Clone)]
pub struct RangeAggregator {
    dataset: Arc<ChartDataset>,
}

impl RangeAggregator {
    #[must_use]
    pub fn new(dataset: Arc<ChartDataset>) -> Self {
        Self { dataset }
    }

    /// Range over `first..=last` for visible series. Returns
    /// [`ValueRange::ZERO`] when no series is visible or the window is empty.
    #[must_use]
    pub fn compute_range(&self, first: usize, last: usize, visibility: &VisibilitySet) -> ValueRange {
        let axis_len = self.dataset.axis_len();
        if first > last || first >= axis_len {
            return ValueRange::ZERO;
        }
        let last = last.min(axis_len - 1);

        match self.visible_max(first, last, visibility) {
            Some(max) => ValueRange::new(0.0, max as f64),
            None => ValueRange::ZERO,
        }
    }

    /// Range over the whole axis.
    #[must_use]
    pub fn compute_full_range(&self, visibility: &VisibilitySet) -> ValueRange {
        self.compute_range(0, self.dataset.axis_len() - 1, visibility)
    }

    #[cfg(not(feature = "parallel-aggregation"))]
    fn visible_max(&self, first: usize, last: usize, visibility: &VisibilitySet) -> Option<i64> {
        visibility
            .visible_indices()
            .filter_map(|index| self.dataset.series().get(index))
            .filter_map(|series| series.values[first..=last].iter().copied().max())
            .max()
    }

    #[cfg(feature = "parallel-aggregation")]
    fn visible_max(&self, first: usize, last: usize, visibility: &VisibilitySet) -> Option<i64> {
        use rayon::prelude::*;

        let series = self.dataset.series();
        let visible: Vec<usize> = visibility.visible_indices().collect();
        visible
            .par_iter()
            .filter_map(|index| series.get(*index))
            .filter_map(|series| series.values[first..=last].iter().copied().max())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{RangeAggregator, ValueRange};
    use crate::core::{ChartDataset, Series, SeriesColor, VisibilitySet};

    fn dataset() -> Arc<ChartDataset> {
        let color = SeriesColor::rgb(0, 0, 0);
        Arc::new(
            ChartDataset::new(
                vec![0, 1, 2, 3, 4],
                vec![
                    Series::new("a", color, vec![0, 10, 5, 8, 2]),
                    Series::new("b", color, vec![3, 4, 12, 1, 1]),
                ],
            )
            .expect("valid dataset"),
        )
    }

    #[test]
    fn max_spans_visible_series_and_window_only() {
        let aggregator = RangeAggregator::new(dataset());
        let visibility = VisibilitySet::all_visible(2);
        assert_eq!(
            aggregator.compute_range(0, 4, &visibility),
            ValueRange::new(0.0, 12.0)
        );
        assert_eq!(
            aggregator.compute_range(3, 4, &visibility),
            ValueRange::new(0.0, 8.0)
        );

        let mut only_a = visibility.clone();
        only_a.set_visible(1, false).expect("index in range");
        assert_eq!(
            aggregator.compute_range(0, 4, &only_a),
            ValueRange::new(0.0, 10.0)
        );
    }

    #[test]
    fn hidden_series_collapse_to_zero_sentinel() {
        let aggregator = RangeAggregator::new(dataset());
        let mut hidden = VisibilitySet::all_visible(2);
        hidden.set_visible(0, false).expect("index in range");
        hidden.set_visible(1, false).expect("index in range");
        assert_eq!(aggregator.compute_full_range(&hidden), ValueRange::ZERO);
    }

    #[test]
    fn inverted_window_yields_zero_sentinel() {
        let aggregator = RangeAggregator::new(dataset());
        let visibility = VisibilitySet::all_visible(2);
        assert_eq!(aggregator.compute_range(3, 1, &visibility), ValueRange::ZERO);
    }

    #[test]
    fn y_scale_requires_non_empty_span() {
        assert_eq!(ValueRange::ZERO.y_scale(100.0), None);
        assert_eq!(ValueRange::new(0.0, 50.0).y_scale(100.0), Some(2.0));
    }
}
