use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ChartDataset, DatasetSource, VisibilitySet};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::SelectionGestureController;
use crate::render::Renderer;

use super::{ChartEngine, ChartEngineConfig, DetailChartRenderer, OverviewChartRenderer};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine over an already validated dataset.
    pub fn new(
        renderer: R,
        config: ChartEngineConfig,
        dataset: Arc<ChartDataset>,
    ) -> ChartResult<Self> {
        for viewport in [config.detail_viewport, config.overview_viewport] {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        config.validate()?;

        let visibility = VisibilitySet::all_visible(dataset.series_count());
        let mut gesture =
            SelectionGestureController::new(config.selection_gesture, config.initial_selection);
        gesture.set_surface_width(f64::from(config.overview_viewport.width));
        let detail = DetailChartRenderer::new(Arc::clone(&dataset), &visibility, &config);
        let overview = OverviewChartRenderer::new(Arc::clone(&dataset), &visibility, &config);

        debug!(
            series_count = dataset.series_count(),
            axis_len = dataset.axis_len(),
            start = config.initial_selection.start(),
            end = config.initial_selection.end(),
            "chart engine initialized"
        );

        let mut engine = Self {
            renderer,
            dataset,
            config,
            visibility,
            gesture,
            detail,
            overview,
            plugins: IndexMap::new(),
            pointer_column: None,
        };
        engine.emit_plugin_event(ChartEvent::DatasetLoaded {
            series_count: engine.dataset.series_count(),
            axis_len: engine.dataset.axis_len(),
        });
        Ok(engine)
    }

    /// Loads the dataset through the ingestion boundary, then builds the engine.
    pub fn from_source(
        renderer: R,
        config: ChartEngineConfig,
        source: &mut impl DatasetSource,
    ) -> ChartResult<Self> {
        let dataset = source.load_dataset()?;
        Self::new(renderer, config, Arc::new(dataset))
    }
}
