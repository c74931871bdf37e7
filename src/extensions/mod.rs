//! Host-facing extension points.

pub mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
