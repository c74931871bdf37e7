pub mod dataset;
pub mod range;
pub mod selection;
pub mod types;
pub mod viewport;

pub use dataset::{
    ChartDataset, DatasetSource, JsonDatasetSource, RawChartDataset, Series, StaticDatasetSource,
};
pub use range::{RangeAggregator, ValueRange};
pub use selection::{RawSelectionWindow, SelectionWindow, VisibilitySet};
pub use types::{SeriesColor, Viewport};
pub use viewport::{ViewportMapper, ViewportWindow};
