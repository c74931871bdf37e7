use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{HorizontalSpan, PointerEvent};
use crate::core::SelectionWindow;
use crate::error::{ChartError, ChartResult};

/// Tuning for the overview selection gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionGestureConfig {
    /// Width of each selection handle bar.
    pub handle_width_px: f64,
    /// Extra hit-test margin around each handle.
    pub hit_slop_px: f64,
    /// Displacement a drag has to exceed before it moves the window.
    pub touch_slop_px: f64,
    /// Minimum fractional change re-emitted to subscribers.
    pub min_change_epsilon: f64,
    /// Minimum window width expressed in handle widths.
    pub min_window_handle_factor: f64,
}

impl Default for SelectionGestureConfig {
    fn default() -> Self {
        Self {
            handle_width_px: 6.0,
            hit_slop_px: 16.0,
            touch_slop_px: 20.0,
            min_change_epsilon: 0.001,
            min_window_handle_factor: 5.0,
        }
    }
}

impl SelectionGestureConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("handle_width_px", self.handle_width_px),
            ("hit_slop_px", self.hit_slop_px),
            ("touch_slop_px", self.touch_slop_px),
            ("min_change_epsilon", self.min_change_epsilon),
            ("min_window_handle_factor", self.min_window_handle_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "selection gesture `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// States of the overview drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    DraggingStartHandle,
    DraggingEndHandle,
    DraggingWindow,
}

/// Pixel geometry of the selection frame on the overview surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleRects {
    pub start_handle: HorizontalSpan,
    pub end_handle: HorizontalSpan,
    pub window: HorizontalSpan,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSnapshot {
    down_x: f64,
    start_px: f64,
    end_px: f64,
    length: f64,
    slop_offset: Option<f64>,
}

type SelectionCallback = Box<dyn FnMut(f64, f64)>;

/// Pointer-driven state machine moving the overview selection window.
pub struct SelectionGestureController {
    config: SelectionGestureConfig,
    surface_width_px: f64,
    selection: SelectionWindow,
    state: GestureState,
    drag: Option<DragSnapshot>,
    on_selection_changed: Option<SelectionCallback>,
}

impl fmt::Debug for SelectionGestureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionGestureController")
            .field("config", &self.config)
            .field("surface_width_px", &self.surface_width_px)
            .field("selection", &self.selection)
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("has_callback", &self.on_selection_changed.is_some())
            .finish()
    }
}

impl SelectionGestureController {
    #[must_use]
    pub fn new(config: SelectionGestureConfig, selection: SelectionWindow) -> Self {
        Self {
            config,
            surface_width_px: 0.0,
            selection,
            state: GestureState::Idle,
            drag: None,
            on_selection_changed: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> SelectionGestureConfig {
        self.config
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn selection(&self) -> SelectionWindow {
        self.selection
    }

    #[must_use]
    pub fn surface_width(&self) -> f64 {
        self.surface_width_px
    }

    /// Registers the selection-sync callback consumed by the detail view.
    pub fn set_on_selection_changed(&mut self, callback: impl FnMut(f64, f64) + 'static) {
        self.on_selection_changed = Some(Box::new(callback));
    }

    pub fn clear_on_selection_changed(&mut self) {
        self.on_selection_changed = None;
    }

    /// Updates the overview width. A resize ends any drag in progress.
    pub fn set_surface_width(&mut self, width_px: f64) {
        if self.surface_width_px == width_px {
            return;
        }
        self.surface_width_px = width_px;
        self.finish_drag();
    }

    /// Programmatic selection change. Notifies subscribers when it differs.
    pub fn set_selection(&mut self, selection: SelectionWindow) -> Option<SelectionWindow> {
        if selection == self.selection {
            return None;
        }
        self.finish_drag();
        self.commit(selection);
        Some(selection)
    }

    /// Handle bars and window span in overview pixels, `None` without width.
    ///
    /// Handles snap to the surface edges when the window is within 1% of them.
    #[must_use]
    pub fn handle_rects(&self) -> Option<HandleRects> {
        let width = self.surface_width_px;
        if !width.is_finite() || width <= 0.0 {
            return None;
        }

        let start_x = if self.selection.start() <= 0.01 {
            0.0
        } else {
            width * self.selection.start()
        };
        let end_x = if self.selection.end() >= 0.99 {
            width
        } else {
            width * self.selection.end()
        };
        let handle = self.config.handle_width_px;

        Some(HandleRects {
            start_handle: HorizontalSpan::new(start_x, start_x + handle),
            end_handle: HorizontalSpan::new(end_x - handle, end_x),
            window: HorizontalSpan::new(start_x, end_x),
        })
    }

    /// Feeds one pointer event. Returns the new window when the event
    /// committed a change large enough to re-emit.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> Option<SelectionWindow> {
        match event {
            PointerEvent::Down { x, .. } => {
                self.on_pointer_down(x);
                None
            }
            PointerEvent::Move { x, .. } => self.on_pointer_move(x),
            PointerEvent::Up | PointerEvent::Cancel => {
                // Cancel commits the current position just like a release.
                self.finish_drag();
                None
            }
        }
    }

    fn on_pointer_down(&mut self, x: f64) {
        self.finish_drag();
        let Some(rects) = self.handle_rects() else {
            return;
        };
        if !x.is_finite() {
            return;
        }

        let slop = self.config.hit_slop_px;
        let on_start = rects.start_handle.contains_with_slop(x, slop);
        let on_end = rects.end_handle.contains_with_slop(x, slop);

        let state = match (on_start, on_end) {
            (true, true) => {
                if rects.start_handle.distance_to_center(x) <= rects.end_handle.distance_to_center(x)
                {
                    GestureState::DraggingStartHandle
                } else {
                    GestureState::DraggingEndHandle
                }
            }
            (true, false) => GestureState::DraggingStartHandle,
            (false, true) => GestureState::DraggingEndHandle,
            (false, false) if !self.selection.is_full() && rects.window.contains(x) => {
                GestureState::DraggingWindow
            }
            (false, false) => return,
        };

        let width = self.surface_width_px;
        self.drag = Some(DragSnapshot {
            down_x: x,
            start_px: width * self.selection.start(),
            end_px: width * self.selection.end(),
            length: self.selection.length(),
            slop_offset: None,
        });
        self.state = state;
        debug!(?state, x, "selection drag started");
    }

    fn on_pointer_move(&mut self, x: f64) -> Option<SelectionWindow> {
        if !x.is_finite() {
            return None;
        }
        let state = self.state;
        let touch_slop = self.config.touch_slop_px;
        let drag = self.drag.as_mut()?;

        let total_delta = x - drag.down_x;
        let slop_offset = match drag.slop_offset {
            Some(offset) => offset,
            None => {
                if total_delta.abs() <= touch_slop {
                    return None;
                }
                let offset = touch_slop.copysign(total_delta);
                drag.slop_offset = Some(offset);
                offset
            }
        };
        let delta = total_delta - slop_offset;
        let snapshot = *drag;

        let (candidate, at_bound) = self.drag_candidate(state, snapshot, delta)?;
        trace!(?state, delta, start = candidate.start(), end = candidate.end(), "selection drag move");

        let epsilon = self.config.min_change_epsilon;
        let change = (candidate.start() - self.selection.start())
            .abs()
            .max((candidate.end() - self.selection.end()).abs());
        let reached_bound = at_bound && candidate != self.selection;
        if change < epsilon && !reached_bound {
            return None;
        }

        self.commit(candidate);
        Some(candidate)
    }

    fn drag_candidate(
        &self,
        state: GestureState,
        snapshot: DragSnapshot,
        delta: f64,
    ) -> Option<(SelectionWindow, bool)> {
        let width = self.surface_width_px;
        if !width.is_finite() || width <= 0.0 {
            return None;
        }
        let min_window = self.config.min_window_handle_factor * self.config.handle_width_px / width;
        let start = self.selection.start();
        let end = self.selection.end();

        let result = match state {
            GestureState::Idle => return None,
            GestureState::DraggingStartHandle => {
                let max_start = (end - min_window).max(0.0);
                let raw = (snapshot.start_px + delta) / width;
                let new_start = raw.clamp(0.0, max_start);
                (
                    SelectionWindow::from_clamped(new_start, end),
                    new_start != raw,
                )
            }
            GestureState::DraggingEndHandle => {
                let min_end = (start + min_window).min(1.0);
                let raw = (snapshot.end_px + delta) / width;
                let new_end = raw.clamp(min_end, 1.0);
                (SelectionWindow::from_clamped(start, new_end), new_end != raw)
            }
            GestureState::DraggingWindow => {
                let max_start = (1.0 - snapshot.length).max(0.0);
                let raw = (snapshot.start_px + delta) / width;
                let new_start = raw.clamp(0.0, max_start);
                (
                    SelectionWindow::translated(new_start, snapshot.length),
                    new_start != raw,
                )
            }
        };
        Some(result)
    }

    fn commit(&mut self, selection: SelectionWindow) {
        self.selection = selection;
        debug!(
            start = selection.start(),
            end = selection.end(),
            "selection changed"
        );
        if let Some(callback) = self.on_selection_changed.as_mut() {
            callback(selection.start(), selection.end());
        }
    }

    fn finish_drag(&mut self) {
        if self.state != GestureState::Idle {
            debug!(state = ?self.state, "selection drag finished");
        }
        self.state = GestureState::Idle;
        self.drag = None;
    }
}
