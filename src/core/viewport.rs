use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::SelectionWindow;

/// Index window and scale derived from one selection/width pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportWindow {
    pub first_visible_index: usize,
    pub last_visible_index: usize,
    /// Fractional number of axis indices covered by the surface width.
    pub visible_index_count: f64,
    pub pixel_per_index: f64,
    /// Horizontal translation from full-range positions to surface pixels.
    pub offset_x: f64,
}

impl ViewportWindow {
    /// Converts a full-range position into a surface x coordinate.
    #[must_use]
    pub fn to_surface_x(self, position: f64) -> f64 {
        position - self.offset_x
    }

    /// Converts a surface x coordinate into a full-range position.
    #[must_use]
    pub fn to_content_x(self, surface_x: f64) -> f64 {
        surface_x + self.offset_x
    }
}

/// Maps a normalized selection window onto surface pixels.
///
/// Positions are stored for the full axis (`i * pixel_per_index`) in a buffer
/// owned by the mapper. A pure translation of the selection only changes
/// `offset_x`; the table is rewritten only when the scale changes.
#[derive(Debug, Clone)]
pub struct ViewportMapper {
    index_count: usize,
    positions: Vec<f64>,
    window: Option<ViewportWindow>,
}

impl ViewportMapper {
    #[must_use]
    pub fn new(index_count: usize) -> Self {
        Self {
            index_count,
            positions: Vec::with_capacity(index_count),
            window: None,
        }
    }

    #[must_use]
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// Recomputes the mapping. Returns `None` when nothing is drawable:
    /// fewer than two indices, a non-positive surface width, or an empty window.
    pub fn update(
        &mut self,
        selection: SelectionWindow,
        surface_width_px: f64,
    ) -> Option<ViewportWindow> {
        self.window = self.compute(selection, surface_width_px);
        if let Some(window) = self.window {
            self.recompute_positions(window.pixel_per_index);
        } else {
            self.positions.clear();
        }
        self.window
    }

    fn compute(&self, selection: SelectionWindow, surface_width_px: f64) -> Option<ViewportWindow> {
        if self.index_count < 2 || !surface_width_px.is_finite() || surface_width_px <= 0.0 {
            return None;
        }

        let count = self.index_count as f64;
        let visible_index_count = count * selection.length();
        if !visible_index_count.is_finite() || visible_index_count <= 0.0 {
            return None;
        }

        let pixel_per_index = surface_width_px / visible_index_count;
        let last_index = self.index_count - 1;
        let first_visible_index = ((count * selection.start()).ceil() as usize).min(last_index);
        let last_visible_index =
            ((first_visible_index as f64 + visible_index_count).ceil() as usize).min(last_index);

        Some(ViewportWindow {
            first_visible_index,
            last_visible_index,
            visible_index_count,
            pixel_per_index,
            offset_x: pixel_per_index * count * selection.start(),
        })
    }

    fn recompute_positions(&mut self, pixel_per_index: f64) {
        let unchanged = self.positions.len() == self.index_count
            && self
                .positions
                .get(1)
                .is_some_and(|second| *second == pixel_per_index);
        if unchanged {
            return;
        }

        trace!(
            index_count = self.index_count,
            pixel_per_index, "recompute index positions"
        );
        self.positions.clear();
        self.positions
            .extend((0..self.index_count).map(|index| index as f64 * pixel_per_index));
    }

    #[must_use]
    pub fn window(&self) -> Option<ViewportWindow> {
        self.window
    }

    /// Full-range pixel position of every axis index; empty without a mapping.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    /// Nearest index to a full-range x coordinate, `None` outside the axis.
    #[must_use]
    pub fn nearest_index(&self, content_x: f64) -> Option<usize> {
        let positions = &self.positions;
        if positions.len() < 2 || !content_x.is_finite() {
            return None;
        }
        let first = positions[0];
        let last = positions[positions.len() - 1];
        if content_x < first || content_x > last {
            return None;
        }

        let upper = positions.partition_point(|position| *position < content_x);
        if upper == 0 {
            return Some(0);
        }
        let lower = upper - 1;
        if upper >= positions.len() {
            return Some(lower);
        }
        if (content_x - positions[lower]).abs() <= (positions[upper] - content_x).abs() {
            Some(lower)
        } else {
            Some(upper)
        }
    }
}
