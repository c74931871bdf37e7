use std::sync::Arc;
use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::axis_label_planner::AxisLabelPlanner;
use super::engine_config::ChartEngineConfig;
use super::label_format::{estimate_text_width_px, format_ruler_value};
use super::ruler_planner::RulerPlanner;
use super::series_opacity::SeriesOpacity;
use crate::animation::{RangeAnimator, RangeRetarget};
use crate::core::{
    ChartDataset, RangeAggregator, SelectionWindow, ValueRange, Viewport, ViewportMapper,
    ViewportWindow, VisibilitySet,
};
use crate::interaction::DetailPointerState;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

/// Window length change below which label decimation is not replanned.
pub const MIN_SELECTION_CHANGE_STEP: f64 = 0.001;

const INFO_BOX_CORNER_RADIUS_PX: f64 = 4.0;

/// Column resolved under the detail pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerColumn {
    pub index: usize,
    pub timestamp: i64,
}

#[derive(Debug, Clone)]
struct InfoColumn {
    series: usize,
    offset_x: f64,
    value_text: String,
}

/// Builds the detail plot: series lines, rulers, date labels and the pointer
/// annotation for the current selection window.
#[derive(Debug, Clone)]
pub struct DetailChartRenderer {
    dataset: Arc<ChartDataset>,
    config: ChartEngineConfig,
    viewport: Viewport,
    selection: SelectionWindow,
    planned_length: Option<f64>,
    mapper: ViewportMapper,
    aggregator: RangeAggregator,
    range: RangeAnimator,
    opacity: SeriesOpacity,
    labels: AxisLabelPlanner,
    rulers: RulerPlanner,
    pointer: DetailPointerState,
    geometry: Vec<Vec<(f64, f64)>>,
}

impl DetailChartRenderer {
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
            labels: AxisLabelPlanner::new(
                Arc::clone(&dataset),
                config.date_format.clone(),
                config.axis_label_width_px,
                duration,
            ),
            rulers: RulerPlanner::new(duration),
            pointer: DetailPointerState::default(),
            geometry: vec![Vec::with_capacity(dataset.axis_len()); dataset.series_count()],
            viewport: config.detail_viewport,
            selection: config.initial_selection,
            planned_length: None,
            config: config.clone(),
            dataset,
        };
        renderer.set_selection(config.initial_selection, visibility);
        renderer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn selection(&self) -> SelectionWindow {
        self.selection
    }

    #[must_use]
    pub fn window(&self) -> Option<ViewportWindow> {
        self.mapper.window()
    }

    #[must_use]
    pub fn mapper(&self) -> &ViewportMapper {
        &self.mapper
    }

    /// Range drawn this frame.
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

    #[must_use]
    pub fn labels(&self) -> &AxisLabelPlanner {
        &self.labels
    }

    #[must_use]
    pub fn rulers(&self) -> &RulerPlanner {
        &self.rulers
    }

    #[must_use]
    pub fn pointer(&self) -> DetailPointerState {
        self.pointer
    }

    /// Resizes the plot. Degenerate sizes leave nothing drawable until a
    /// valid size arrives.
    pub fn set_viewport(&mut self, viewport: Viewport, visibility: &VisibilitySet) {
        self.viewport = viewport;
        self.planned_length = None;
        self.set_selection(self.selection, visibility);
    }

    /// Re-runs the viewport mapping for `selection` and retargets the value
    /// range. Any pointer annotation is cleared.
    pub fn set_selection(
        &mut self,
        selection: SelectionWindow,
        visibility: &VisibilitySet,
    ) -> Option<ViewportWindow> {
        self.selection = selection;
        self.pointer.hide();

        let Some(window) = self
            .mapper
            .update(selection, f64::from(self.viewport.width))
        else {
            debug!(
                width = self.viewport.width,
                start = selection.start(),
                end = selection.end(),
                "detail viewport has no mapping"
            );
            return None;
        };

        let length = selection.length();
        let length_changed = self
            .planned_length
            .is_none_or(|planned| (planned - length).abs() >= MIN_SELECTION_CHANGE_STEP);
        if length_changed {
            self.labels.plan(window.pixel_per_index);
            self.planned_length = Some(length);
        }

        self.retarget_range(visibility);
        Some(window)
    }

    /// Fades series `index` in or out and retargets the value range.
    pub fn set_series_visible(&mut self, index: usize, visible: bool, visibility: &VisibilitySet) {
        self.opacity.fade_to(index, visible);
        self.retarget_range(visibility);
    }

    fn retarget_range(&mut self, visibility: &VisibilitySet) {
        let Some(window) = self.mapper.window() else {
            return;
        };
        let target = self.aggregator.compute_range(
            window.first_visible_index,
            window.last_visible_index,
            visibility,
        );
        if self.range.retarget(target) != RangeRetarget::Unchanged {
            self.rulers.plan(target);
        }
    }

    /// Snaps the annotation to the column nearest to surface `x`.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<PointerColumn> {
        let window = self.mapper.window()?;
        if !x.is_finite() || x < 0.0 || x > f64::from(self.viewport.width) {
            self.pointer.hide();
            return None;
        }

        let index = self.mapper.nearest_index(window.to_content_x(x));
        self.pointer = DetailPointerState {
            visible: index.is_some(),
            x,
            y,
            column: index,
        };
        let index = index?;
        let timestamp = *self.dataset.axis().get(index)?;
        trace!(index, x, "detail pointer column");
        Some(PointerColumn { index, timestamp })
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.hide();
    }

    /// Advances every animation owned by the detail view.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let range = self.range.advance(delta);
        let opacity = self.opacity.advance(delta);
        let labels = self.labels.advance(delta);
        let rulers = self.rulers.advance(delta);
        range || opacity || labels || rulers
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.range.is_active()
            || self.opacity.is_active()
            || self.labels.is_active()
            || self.rulers.is_active()
    }

    fn plot_bounds(&self) -> Option<(f64, f64)> {
        let top = self.config.detail_top_padding_px;
        let bottom = f64::from(self.viewport.height) - self.config.axis_label_height_px;
        (bottom - top > 0.0).then_some((top, bottom))
    }

    /// Rewrites the per-series polyline buffer for the displayed range.
    ///
    /// Returns `false` when nothing is drawable: no mapping, no plot height,
    /// or a zero value range.
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

        let first = window.first_visible_index.saturating_sub(1);
        let last = window.last_visible_index;
        let positions = self.mapper.positions();
        for (index, series) in self.dataset.series().iter().enumerate() {
            if self.opacity.alpha(index) <= 0.0 {
                continue;
            }
            let Some(points) = self.geometry.get_mut(index) else {
                continue;
            };
            points.extend((first..=last).filter_map(|column| {
                let position = positions.get(column)?;
                let value = *series.values.get(column)? as f64;
                Some((
                    window.to_surface_x(*position),
                    bottom - (value - displayed.min) * y_scale,
                ))
            }));
        }
        true
    }

    /// Polyline of series `index` from the last `recompute_geometry` call.
    #[must_use]
    pub fn series_geometry(&self, index: usize) -> &[(f64, f64)] {
        self.geometry.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn build_frame(&mut self, visibility: &VisibilitySet) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        let (Some(window), Some((top, bottom))) = (self.mapper.window(), self.plot_bounds())
        else {
            trace!("detail frame empty for degenerate geometry");
            return frame;
        };

        self.push_rulers(&mut frame, top, bottom);
        if self.recompute_geometry() {
            self.push_series_lines(&mut frame);
        }
        self.push_axis_labels(&mut frame, window, bottom);
        self.push_pointer_annotation(&mut frame, window, top, bottom, visibility);
        frame
    }

    fn push_rulers(&mut self, frame: &mut RenderFrame, top: f64, bottom: f64) {
        if !self.rulers.layout(self.range.displayed(), top, bottom) {
            return;
        }
        let width = f64::from(self.viewport.width);
        let palette = self.config.palette;
        let font_size = self.config.font_size_px;
        for set in self.rulers.visible_sets() {
            let line_color = palette.ruler.faded(set.alpha());
            let text_color = palette.axis_text.faded(set.alpha());
            for (value, y) in set.items.lines() {
                if y < top - 0.5 || y > bottom + 0.5 {
                    continue;
                }
                frame.lines.push(LinePrimitive::new(
                    0.0,
                    y,
                    width,
                    y,
                    self.config.ruler_line_width_px,
                    line_color,
                ));
                frame.texts.push(TextPrimitive::new(
                    format_ruler_value(value),
                    0.0,
                    y - font_size * 0.4,
                    font_size,
                    text_color,
                    TextHAlign::Left,
                ));
            }
        }
    }

    fn push_series_lines(&self, frame: &mut RenderFrame) {
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
                    self.config.detail_line_width_px,
                    color,
                )
            }));
        }
    }

    fn push_axis_labels(&self, frame: &mut RenderFrame, window: ViewportWindow, bottom: f64) {
        let font_size = self.config.font_size_px;
        let y = bottom + self.config.axis_label_height_px * 0.5 + font_size * 0.35;
        for set in self.labels.visible_sets() {
            let color = self.config.palette.axis_text.faded(set.alpha());
            for (index, text) in set.items.in_window(window) {
                let Some(position) = self.mapper.position(index).filter(|_| !text.is_empty())
                else {
                    continue;
                };
                frame.texts.push(TextPrimitive::new(
                    text,
                    window.to_surface_x(position),
                    y,
                    font_size,
                    color,
                    TextHAlign::Center,
                ));
            }
        }
    }

    fn push_pointer_annotation(
        &self,
        frame: &mut RenderFrame,
        window: ViewportWindow,
        top: f64,
        bottom: f64,
        visibility: &VisibilitySet,
    ) {
        let Some(column) = self.pointer.column.filter(|_| self.pointer.visible) else {
            return;
        };
        let displayed = self.range.displayed();
        let (Some(y_scale), Some(position), Some(timestamp)) = (
            displayed.y_scale(bottom - top),
            self.mapper.position(column),
            self.dataset.axis().get(column).copied(),
        ) else {
            return;
        };
        let width = f64::from(self.viewport.width);
        let x = window.to_surface_x(position);
        if !(0.0..=width).contains(&x) {
            return;
        }

        let config = &self.config;
        let palette = config.palette;
        let font_size = config.font_size_px;
        let value_font = font_size * 1.2;
        let name_font = font_size * 0.9;
        let padding = font_size * 0.75;

        let mut columns: SmallVec<[InfoColumn; 8]> = SmallVec::new();
        let mut content_width = padding;
        for index in visibility.visible_indices() {
            let Some(series) = self.dataset.series().get(index) else {
                continue;
            };
            let Some(value) = series.values.get(column).copied() else {
                continue;
            };
            let value_text = value.to_string();
            let column_width = estimate_text_width_px(&value_text, value_font)
                .max(estimate_text_width_px(&series.name, name_font));
            columns.push(InfoColumn {
                series: index,
                offset_x: content_width,
                value_text,
            });
            content_width += column_width + padding;
        }

        let date_text = config.date_format.format_info(timestamp);
        let header_width = estimate_text_width_px(&date_text, font_size) + padding * 2.0;
        let box_width = header_width.max(content_width);
        let header_y = top + padding + font_size;
        let value_y = header_y + padding + value_font;
        let name_y = value_y + name_font * 1.5;
        let box_height = name_y + padding - top;

        frame.lines.push(LinePrimitive::new(
            x,
            top + box_height,
            x,
            bottom,
            config.ruler_line_width_px,
            palette.ruler,
        ));

        for info in &columns {
            let Some(series) = self.dataset.series().get(info.series) else {
                continue;
            };
            let value = series.values.get(column).copied().unwrap_or_default() as f64;
            frame.circles.push(CirclePrimitive::new(
                x,
                bottom - (value - displayed.min) * y_scale,
                config.marker_radius_px,
                config.detail_line_width_px,
                Color::from_series(series.color, 1.0),
                palette.marker_fill,
            ));
        }

        let mut left = x - padding;
        if width - left < box_width {
            left = width - box_width - 1.0;
        }
        let left = left.max(1.0);
        frame.rects.push(
            RectPrimitive::new(left, top, box_width, box_height, palette.info_box_background)
                .with_corner_radius(INFO_BOX_CORNER_RADIUS_PX)
                .with_border(palette.info_box_border),
        );
        if !date_text.is_empty() {
            frame.texts.push(TextPrimitive::new(
                date_text,
                left + padding,
                header_y,
                font_size,
                palette.info_box_header_text,
                TextHAlign::Left,
            ));
        }
        for info in columns {
            let Some(series) = self.dataset.series().get(info.series) else {
                continue;
            };
            let color = Color::from_series(series.color, 1.0);
            frame.texts.push(TextPrimitive::new(
                info.value_text,
                left + info.offset_x,
                value_y,
                value_font,
                color,
                TextHAlign::Left,
            ));
            if series.name.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                series.name.clone(),
                left + info.offset_x,
                name_y,
                name_font,
                color,
                TextHAlign::Left,
            ));
        }
    }
}
