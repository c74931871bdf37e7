mod axis_label_planner;
mod crossfade;
mod detail_chart;
mod engine;
mod engine_config;
mod engine_init;
mod interaction_controller;
mod label_format;
mod overview_chart;
mod plugin_dispatch;
mod plugin_registry;
mod ruler_planner;
mod series_opacity;
mod state;
mod state_controller;

pub use axis_label_planner::{AxisLabelPlanner, LabelSet};
pub use crossfade::{Crossfade, FadingSet, RetireFrom};
pub use detail_chart::{DetailChartRenderer, MIN_SELECTION_CHANGE_STEP, PointerColumn};
pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, ChartPalette};
pub use label_format::{DateLabelFormat, estimate_text_width_px, format_ruler_value};
pub use overview_chart::OverviewChartRenderer;
pub use ruler_planner::{RULER_COUNT, RulerPlanner, RulerSet, ruler_step};
pub use series_opacity::SeriesOpacity;
pub use state::{PERSISTED_UI_STATE_JSON_SCHEMA_V1, PersistedUiState, PersistedUiStateJsonContractV1};
