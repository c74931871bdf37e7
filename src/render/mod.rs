mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::{FrameCounts, NullRenderer};
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Which of the two chart surfaces a frame targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Detail,
    Overview,
}

/// Contract implemented by any drawing backend.
///
/// Backends receive fully materialized frames so drawing code stays isolated
/// from viewport, animation and gesture logic.
pub trait Renderer {
    fn render(&mut self, surface: SurfaceKind, frame: &RenderFrame) -> ChartResult<()>;
}
