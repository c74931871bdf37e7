use serde::{Deserialize, Serialize};

mod selection_gesture;

pub use selection_gesture::{
    GestureState, HandleRects, SelectionGestureConfig, SelectionGestureController,
};

/// Platform-agnostic pointer input in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    /// Gesture aborted by the host (e.g. the parent took over scrolling).
    Cancel,
}

/// Closed horizontal pixel span `[left, right]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalSpan {
    pub left: f64,
    pub right: f64,
}

impl HorizontalSpan {
    #[must_use]
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn contains(self, x: f64) -> bool {
        x >= self.left && x <= self.right
    }

    /// Hit test with `slop` pixels of tolerance on both sides.
    #[must_use]
    pub fn contains_with_slop(self, x: f64, slop: f64) -> bool {
        x >= self.left - slop && x <= self.right + slop
    }

    #[must_use]
    pub fn distance_to_center(self, x: f64) -> f64 {
        (x - (self.left + self.right) * 0.5).abs()
    }
}

/// Pointer hover state over the detail chart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailPointerState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    /// Column the annotation snaps to, when the pointer is over the axis.
    pub column: Option<usize>,
}

impl DetailPointerState {
    pub fn hide(&mut self) {
        *self = Self::default();
    }
}
