use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, SurfaceKind};

/// Headless renderer that validates frames and remembers their sizes.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_detail: Option<FrameCounts>,
    pub last_overview: Option<FrameCounts>,
}

/// Primitive counts of the last validated frame for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCounts {
    pub lines: usize,
    pub rects: usize,
    pub circles: usize,
    pub texts: usize,
}

impl FrameCounts {
    #[must_use]
    pub fn of(frame: &RenderFrame) -> Self {
        Self {
            lines: frame.lines.len(),
            rects: frame.rects.len(),
            circles: frame.circles.len(),
            texts: frame.texts.len(),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.lines == 0 && self.rects == 0 && self.circles == 0 && self.texts == 0
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, surface: SurfaceKind, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let counts = FrameCounts::of(frame);
        match surface {
            SurfaceKind::Detail => self.last_detail = Some(counts),
            SurfaceKind::Overview => self.last_overview = Some(counts),
        }
        self.frames_rendered += 1;
        Ok(())
    }
}
