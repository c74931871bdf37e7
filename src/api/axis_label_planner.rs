use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::crossfade::{Crossfade, FadingSet, RetireFrom};
use super::label_format::DateLabelFormat;
use crate::core::{ChartDataset, ViewportWindow};

/// Decimated axis labels for one zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSet {
    step: usize,
    first_labeled: usize,
    last_labeled: usize,
    labels: BTreeMap<usize, String>,
}

impl LabelSet {
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn first_labeled(&self) -> usize {
        self.first_labeled
    }

    #[must_use]
    pub fn last_labeled(&self) -> usize {
        self.last_labeled
    }

    #[must_use]
    pub fn labels(&self) -> &BTreeMap<usize, String> {
        &self.labels
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.labels.contains_key(&index)
    }

    /// Labels within the visible window widened by one label step.
    pub fn in_window(&self, window: ViewportWindow) -> impl Iterator<Item = (usize, &str)> + '_ {
        let lower = window.first_visible_index.saturating_sub(self.step);
        let upper = window.last_visible_index.saturating_add(self.step);
        self.labels
            .range(lower..=upper)
            .map(|(index, text)| (*index, text.as_str()))
    }
}

/// Chooses which axis indices carry a date label at the current zoom level.
#[derive(Debug, Clone)]
pub struct AxisLabelPlanner {
    dataset: Arc<ChartDataset>,
    format: DateLabelFormat,
    label_width_px: f64,
    first_labeled: usize,
    label_step: usize,
    sets: Crossfade<LabelSet>,
}

impl AxisLabelPlanner {
    #[must_use]
    pub fn new(
        dataset: Arc<ChartDataset>,
        format: DateLabelFormat,
        label_width_px: f64,
        fade_duration: Duration,
    ) -> Self {
        Self {
            dataset,
            format,
            label_width_px,
            first_labeled: 0,
            label_step: 0,
            sets: Crossfade::new(fade_duration, RetireFrom::FullAlpha),
        }
    }

    #[must_use]
    pub fn label_step(&self) -> usize {
        self.label_step
    }

    #[must_use]
    pub fn current(&self) -> Option<&LabelSet> {
        self.sets.current().map(|set| &set.items)
    }

    #[must_use]
    pub fn retired_len(&self) -> usize {
        self.sets.retired_len()
    }

    /// Recomputes the label set for `pixel_per_index`.
    ///
    /// Returns `true` when a new set replaced the current one. Nothing changes
    /// unless the first labeled index or the label step moved.
    pub fn plan(&mut self, pixel_per_index: f64) -> bool {
        if !pixel_per_index.is_finite() || pixel_per_index <= 0.0 || self.label_width_px <= 0.0 {
            return false;
        }

        let first_labeled = (self.label_width_px / pixel_per_index / 2.0).ceil() as usize;
        let label_step = (self.label_width_px * 1.5 / pixel_per_index).ceil() as usize;
        if label_step == 0 {
            return false;
        }
        if self.sets.current().is_some()
            && first_labeled == self.first_labeled
            && label_step == self.label_step
        {
            return false;
        }

        self.first_labeled = first_labeled;
        self.label_step = label_step;
        let set = self.build_set(first_labeled, label_step);
        debug!(
            first_labeled = set.first_labeled,
            last_labeled = set.last_labeled,
            label_step,
            labels = set.labels.len(),
            "axis label set replaced"
        );
        self.sets.replace(set);
        true
    }

    fn build_set(&self, first_labeled: usize, step: usize) -> LabelSet {
        let last_index = self.dataset.axis_len().saturating_sub(1);
        // Keep both edge labels inside the axis when labels are wider than it.
        let first = first_labeled.min(last_index / 2);
        let last = last_index - first;
        let columns = last - first;
        let labels_count = columns / step;

        let mut indices = vec![first];
        if labels_count > 0 {
            let columns_per_label = columns as f64 / labels_count as f64;
            indices.extend(
                (1..labels_count)
                    .map(|k| ((first as f64 + columns_per_label * k as f64).round() as usize).min(last)),
            );
        }
        indices.push(last);

        let axis = self.dataset.axis();
        let labels = indices
            .into_iter()
            .filter_map(|index| {
                axis.get(index)
                    .map(|timestamp| (index, self.format.format_axis(*timestamp)))
            })
            .collect();

        LabelSet {
            step,
            first_labeled: first,
            last_labeled: last,
            labels,
        }
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        self.sets.advance(delta)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sets.is_active()
    }

    /// Sets to draw this frame with their alpha, oldest first.
    pub fn visible_sets(&self) -> impl Iterator<Item = &FadingSet<LabelSet>> + '_ {
        self.sets.iter_visible()
    }
}
