use std::sync::Arc;

use indexmap::IndexMap;
use tracing::warn;

use crate::core::{ChartDataset, SelectionWindow, ValueRange, ViewportWindow, VisibilitySet};
use crate::error::ChartResult;
use crate::extensions::{ChartEvent, ChartPlugin};
use crate::interaction::SelectionGestureController;
use crate::render::{RenderFrame, Renderer, SurfaceKind};

use super::{ChartEngineConfig, DetailChartRenderer, OverviewChartRenderer};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the dataset, the visibility flags and the selection
/// gesture, and forwards every change to the detail and overview renderers.
/// All calls are expected on the host UI thread.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) dataset: Arc<ChartDataset>,
    pub(super) config: ChartEngineConfig,
    pub(super) visibility: VisibilitySet,
    pub(super) gesture: SelectionGestureController,
    pub(super) detail: DetailChartRenderer,
    pub(super) overview: OverviewChartRenderer,
    pub(super) plugins: IndexMap<String, Box<dyn ChartPlugin>>,
    pub(super) pointer_column: Option<usize>,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    #[must_use]
    pub fn selection(&self) -> SelectionWindow {
        self.gesture.selection()
    }

    #[must_use]
    pub fn gesture(&self) -> &SelectionGestureController {
        &self.gesture
    }

    /// Registers the selection-sync callback fired on every committed change.
    pub fn set_on_selection_changed(&mut self, callback: impl FnMut(f64, f64) + 'static) {
        self.gesture.set_on_selection_changed(callback);
    }

    pub fn clear_on_selection_changed(&mut self) {
        self.gesture.clear_on_selection_changed();
    }

    #[must_use]
    pub fn detail(&self) -> &DetailChartRenderer {
        &self.detail
    }

    #[must_use]
    pub fn overview(&self) -> &OverviewChartRenderer {
        &self.overview
    }

    /// Index window of the detail view, `None` while geometry is degenerate.
    #[must_use]
    pub fn visible_window(&self) -> Option<ViewportWindow> {
        self.detail.window()
    }

    #[must_use]
    pub fn displayed_range(&self) -> ValueRange {
        self.detail.displayed_range()
    }

    #[must_use]
    pub fn target_range(&self) -> ValueRange {
        self.detail.target_range()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Materializes both frames for the current animation state.
    pub fn build_frames(&mut self) -> (RenderFrame, RenderFrame) {
        let detail = self.detail.build_frame(&self.visibility);
        let overview = self.overview.build_frame(&self.gesture);
        (detail, overview)
    }

    /// Builds both frames and hands the drawable ones to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let (detail, overview) = self.build_frames();
        for (surface, frame) in [
            (SurfaceKind::Detail, &detail),
            (SurfaceKind::Overview, &overview),
        ] {
            if !frame.viewport.is_valid() {
                warn!(
                    ?surface,
                    width = frame.viewport.width,
                    height = frame.viewport.height,
                    "skipping render of degenerate surface"
                );
                continue;
            }
            self.renderer.render(surface, frame)?;
        }
        self.emit_plugin_event(ChartEvent::Rendered);
        Ok(())
    }
}
