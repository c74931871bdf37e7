use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{SelectionWindow, Viewport};
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::interaction::PointerEvent;
use crate::render::Renderer;

use super::{ChartEngine, PointerColumn};

impl<R: Renderer> ChartEngine<R> {
    /// Feeds one pointer event from the overview surface.
    ///
    /// Returns the committed selection when the event moved the window.
    pub fn overview_pointer_event(&mut self, event: PointerEvent) -> Option<SelectionWindow> {
        let selection = self.gesture.on_pointer_event(event)?;
        self.apply_selection(selection);
        Some(selection)
    }

    /// Programmatic selection change, e.g. from a restored state.
    pub fn set_selection(&mut self, selection: SelectionWindow) -> bool {
        match self.gesture.set_selection(selection) {
            Some(selection) => {
                self.apply_selection(selection);
                true
            }
            None => false,
        }
    }

    fn apply_selection(&mut self, selection: SelectionWindow) {
        self.detail.set_selection(selection, &self.visibility);
        self.pointer_column = None;
        self.emit_plugin_event(ChartEvent::SelectionChanged {
            start: selection.start(),
            end: selection.end(),
        });
    }

    /// Toggles one series. Fails with `IndexOutOfRange` for unknown indices.
    pub fn set_series_visible(&mut self, index: usize, visible: bool) -> ChartResult<()> {
        if !self.visibility.set_visible(index, visible)? {
            return Ok(());
        }
        debug!(index, visible, "series visibility changed");
        self.detail
            .set_series_visible(index, visible, &self.visibility);
        self.overview
            .set_series_visible(index, visible, &self.visibility);
        self.emit_plugin_event(ChartEvent::SeriesVisibilityChanged { index, visible });
        Ok(())
    }

    /// Moves the detail annotation to the column under `x`.
    pub fn detail_pointer_move(&mut self, x: f64, y: f64) -> Option<PointerColumn> {
        let column = self.detail.pointer_move(x, y);
        let index = column.map(|column| column.index);
        if index != self.pointer_column {
            self.pointer_column = index;
            match column {
                Some(column) => self.emit_plugin_event(ChartEvent::PointerColumnChanged {
                    index: column.index,
                    timestamp: column.timestamp,
                }),
                None => self.emit_plugin_event(ChartEvent::PointerLeft),
            }
        }
        column
    }

    pub fn detail_pointer_leave(&mut self) {
        self.detail.pointer_leave();
        if self.pointer_column.take().is_some() {
            self.emit_plugin_event(ChartEvent::PointerLeft);
        }
    }

    pub fn resize_detail(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "detail resized");
        self.config.detail_viewport = viewport;
        self.detail.set_viewport(viewport, &self.visibility);
        self.pointer_column = None;
    }

    pub fn resize_overview(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "overview resized");
        self.config.overview_viewport = viewport;
        self.gesture.set_surface_width(f64::from(viewport.width));
        self.overview.set_viewport(viewport, &self.visibility);
    }

    /// Advances every live animation by one frame.
    ///
    /// Returns whether another frame should be scheduled.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let detail = self.detail.advance(delta);
        let overview = self.overview.advance(delta);
        trace!(delta_ms = delta.as_millis() as u64, detail, overview, "frame tick");
        detail || overview
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.detail.is_animating() || self.overview.is_animating()
    }
}
