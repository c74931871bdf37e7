use serde::{Deserialize, Serialize};

use crate::core::{ValueRange, Viewport};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub detail_viewport: Viewport,
    pub overview_viewport: Viewport,
    pub selection: (f64, f64),
    pub visible_indices: Option<(usize, usize)>,
    pub displayed_range: ValueRange,
    pub target_range: ValueRange,
    pub series_count: usize,
    pub visible_series_count: usize,
    pub axis_len: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    DatasetLoaded { series_count: usize, axis_len: usize },
    SelectionChanged { start: f64, end: f64 },
    SeriesVisibilityChanged { index: usize, visible: bool },
    PointerColumnChanged { index: usize, timestamp: i64 },
    PointerLeft,
    StateRestored,
    Rendered,
}

/// Observer hook for host-side custom logic.
///
/// Plugins see events and a context snapshot; they cannot mutate the engine.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ChartEvent, context: PluginContext);
}
