use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Normalized `[start, end]` fraction of the time axis shown in the detail view.
///
/// The length is stored alongside the bounds so a translated window reports
/// exactly the length it was dragged with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawSelectionWindow", into = "RawSelectionWindow")]
pub struct SelectionWindow {
    start: f64,
    end: f64,
    length: f64,
}

/// Serialized form of [`SelectionWindow`], validated on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSelectionWindow {
    pub start: f64,
    pub end: f64,
}

impl TryFrom<RawSelectionWindow> for SelectionWindow {
    type Error = ChartError;

    fn try_from(raw: RawSelectionWindow) -> ChartResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl From<SelectionWindow> for RawSelectionWindow {
    fn from(selection: SelectionWindow) -> Self {
        Self {
            start: selection.start,
            end: selection.end,
        }
    }
}

impl PartialEq for SelectionWindow {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Default for SelectionWindow {
    fn default() -> Self {
        Self::FULL
    }
}

impl SelectionWindow {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
        length: 1.0,
    };

    /// Creates a window, rejecting non-finite bounds, bounds outside `[0, 1]`,
    /// and `start > end`.
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(
                "selection bounds must be finite".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) {
            return Err(ChartError::InvalidData(format!(
                "selection bounds must be in [0, 1], got [{start}, {end}]"
            )));
        }
        if start > end {
            return Err(ChartError::InvalidData(format!(
                "selection start {start} must not exceed end {end}"
            )));
        }

        Ok(Self {
            start,
            end,
            length: end - start,
        })
    }

    /// Builds a window from already-clamped gesture output.
    pub(crate) fn from_clamped(start: f64, end: f64) -> Self {
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(start, 1.0);
        Self {
            start,
            end,
            length: end - start,
        }
    }

    /// Window of `length` starting at `start`, keeping `length` verbatim.
    /// Callers clamp `start` to `[0, 1 - length]`.
    pub(crate) fn translated(start: f64, length: f64) -> Self {
        let length = length.clamp(0.0, 1.0);
        let start = start.clamp(0.0, 1.0 - length);
        Self {
            start,
            end: (start + length).min(1.0),
            length,
        }
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self.start <= 0.0 && self.end >= 1.0
    }
}

/// Per-series visibility flags, all visible by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilitySet {
    flags: Vec<bool>,
}

impl VisibilitySet {
    #[must_use]
    pub fn all_visible(series_count: usize) -> Self {
        Self {
            flags: vec![true; series_count],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Sets one flag. Returns whether the flag actually changed.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> ChartResult<bool> {
        let len = self.flags.len();
        let flag = self
            .flags
            .get_mut(index)
            .ok_or(ChartError::IndexOutOfRange { index, len })?;
        if *flag == visible {
            return Ok(false);
        }
        *flag = visible;
        Ok(true)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(index, visible)| visible.then_some(index))
    }
}
