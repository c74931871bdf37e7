use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use super::engine_config::ChartEngineConfig;
use super::series_opacity::SeriesOpacity;
use crate::animation::RangeAnimator;
use crate::core::{
    ChartDataset, RangeAggregator, SelectionWindow, ValueRange, Viewport, ViewportMapper,
    VisibilitySet,
};
use crate::interaction::{HandleRects, SelectionGestureController};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame};

/// Builds the overview strip: every series over the whole axis plus the
/// selection frame drawn from the gesture controller geometry.
#[derive(Debug, Clone)]
pub struct OverviewChartRenderer {
    dataset: Arc<ChartDataset>,
    config: ChartEngineConfig,
    viewport: Viewport,
    mapper: ViewportMapper,
    aggregator: RangeAggregator,
    range: RangeAnimator,
    opacity: SeriesOpacity,
    geometry: Vec<Vec<(f64, f64)>>,
}

impl OverviewChartRenderer {
    #[must_use]
    pub fn new(
        dataset: Arc<ChartDataset>,
        visibility: &VisibilitySet,
        config: &ChartEngineConfig,
    ) -> Self {
        let duration = config.animation_duration();
        let mut renderer = Self {
            mapper: ViewportMapper::new(dataset.axis_len()),
            aggregator: RangeAggregator::new(Arc::clone(&dataset)),
            range: RangeAnimator::new(duration),
            opacity: SeriesOpacity::new(visibility, duration),
            geometry: vec![Vec::with_capacity(dataset.axis_len()); dataset.series_count()],
            viewport: config.overview_viewport,
            config: config.clone(),
            dataset,
        };
        renderer.set_viewport(config.overview_viewport, visibility);
        renderer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn displayed_range(&self) -> ValueRange {
        self.range.displayed()
    }

    #[must_use]
    pub fn target_range(&self) -> ValueRange {
        self.range.target()
    }

    #[must_use]
    pub fn series_alpha(&self, index: usize) -> f64 {
        self.opacity.alpha(index)
    }

    pub fn set_viewport(&mut self, viewport: Viewport, visibility: &VisibilitySet) {
        self.viewport = viewport;
        self.mapper.update(SelectionWindow::FULL, f64::from(viewport.width));
        self.range.retarget(self.aggregator.compute_full_range(visibility));
    }

    pub fn set_series_visible(&mut self, index: usize, visible: bool, visibility: &VisibilitySet) {
        self.opacity.fade_to(index, visible);
        self.range.retarget(self.aggregator.compute_full_range(visibility));
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        let range = self.range.advance(delta);
        let opacity = self.opacity.advance(delta);
        range || opacity
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.range.is_active() || self.opacity.is_active()
    }

    fn plot_bounds(&self) -> Option<(f64, f64)> {
        let padding = self.config.overview_vertical_padding_px;
        let top = padding;
        let bottom = f64::from(self.viewport.height) - padding;
        (bottom - top > 0.0).then_some((top, bottom))
    }

    /// Rewrites the full-axis polyline buffer for the displayed range.
    pub fn recompute_geometry(&mut self) -> bool {
        for points in &mut self.geometry {
            points.clear();
        }
        let (Some(window), Some((top, bottom))) = (self.mapper.window(), self.plot_bounds())
        else {
            return false;
        };
        let displayed = self.range.displayed();
        let Some(y_scale) = displayed.y_scale(bottom - top) else {
            return false;
        };

        let positions = self.mapper.positions();
        for (index, series) in self.dataset.series().iter().enumerate() {
            if self.opacity.alpha(index) <= 0.0 {
                continue;
            }
            let Some(points) = self.geometry.get_mut(index) else {
                continue;
            };
            points.extend(positions.iter().zip(&series.values).map(|(position, value)| {
                (
                    window.to_surface_x(*position),
                    bottom - (*value as f64 - displayed.min) * y_scale,
                )
            }));
        }
        true
    }

    #[must_use]
    pub fn series_geometry(&self, index: usize) -> &[(f64, f64)] {
        self.geometry.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn build_frame(&mut self, gesture: &SelectionGestureController) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        if !self.viewport.is_valid() {
            trace!("overview frame empty for degenerate viewport");
            return frame;
        }

        if self.recompute_geometry() {
            for (index, series) in self.dataset.series().iter().enumerate() {
                let alpha = self.opacity.alpha(index);
                let points = self.series_geometry(index);
                if alpha <= 0.0 || points.len() < 2 {
                    continue;
                }
                let color = Color::from_series(series.color, alpha);
                frame.lines.extend(points.windows(2).map(|pair| {
                    LinePrimitive::new(
                        pair[0].0,
                        pair[0].1,
                        pair[1].0,
                        pair[1].1,
                        self.config.overview_line_width_px,
                        color,
                    )
                }));
            }
        }

        if let Some(rects) = gesture.handle_rects() {
            self.push_selection_frame(&mut frame, rects);
        }
        frame
    }

    fn push_selection_frame(&self, frame: &mut RenderFrame, rects: HandleRects) {
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        let palette = self.config.palette;
        let line = self.config.selection_frame_line_px.min(height);

        if rects.start_handle.left > 0.0 {
            frame.rects.push(RectPrimitive::from_edges(
                0.0,
                0.0,
                rects.start_handle.left,
                height,
                palette.unselected_overlay,
            ));
        }
        if rects.end_handle.right < width {
            frame.rects.push(RectPrimitive::from_edges(
                rects.end_handle.right,
                0.0,
                width,
                height,
                palette.unselected_overlay,
            ));
        }

        for handle in [rects.start_handle, rects.end_handle] {
            frame.rects.push(RectPrimitive::from_edges(
                handle.left,
                0.0,
                handle.right,
                height,
                palette.selection_frame,
            ));
        }

        let inner_left = rects.start_handle.right;
        let inner_right = rects.end_handle.left;
        if inner_right > inner_left {
            frame.rects.push(RectPrimitive::from_edges(
                inner_left,
                0.0,
                inner_right,
                line,
                palette.selection_frame,
            ));
            frame.rects.push(RectPrimitive::from_edges(
                inner_left,
                height - line,
                inner_right,
                height,
                palette.selection_frame,
            ));
        }
    }
}
