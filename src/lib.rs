//! tchart: overview/detail time-series chart engine.
//!
//! The crate owns the numeric side of the chart: viewport mapping, value
//! range aggregation, interruptible transitions, the overview selection
//! gesture and axis label/ruler planning. Drawing is delegated to a
//! [`render::Renderer`] implementation supplied by the host.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
