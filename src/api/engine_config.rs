use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{SelectionWindow, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::SelectionGestureConfig;
use crate::render::Color;

use super::label_format::DateLabelFormat;

/// Non-series colors used by both chart surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPalette {
    pub ruler: Color,
    pub axis_text: Color,
    pub selection_frame: Color,
    pub unselected_overlay: Color,
    pub info_box_background: Color,
    pub info_box_border: Color,
    pub info_box_header_text: Color,
    pub marker_fill: Color,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            ruler: Color::rgba(0.9, 0.91, 0.92, 1.0),
            axis_text: Color::rgb(0.59, 0.62, 0.65),
            selection_frame: Color::rgba(0.86, 0.9, 0.94, 0.9),
            unselected_overlay: Color::rgba(0.96, 0.97, 0.98, 0.8),
            info_box_background: Color::rgb(1.0, 1.0, 1.0),
            info_box_border: Color::rgb(0.88, 0.89, 0.9),
            info_box_header_text: Color::rgb(0.13, 0.13, 0.13),
            marker_fill: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

impl ChartPalette {
    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.ruler,
            self.axis_text,
            self.selection_frame,
            self.unselected_overlay,
            self.info_box_background,
            self.info_box_border,
            self.info_box_header_text,
            self.marker_fill,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist chart setup without inventing their
/// own format. Every field except the two surfaces has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub detail_viewport: Viewport,
    pub overview_viewport: Viewport,
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
    /// Reference width of one axis date label, drives label decimation.
    #[serde(default = "default_axis_label_width_px")]
    pub axis_label_width_px: f64,
    #[serde(default = "default_axis_label_height_px")]
    pub axis_label_height_px: f64,
    #[serde(default = "default_detail_top_padding_px")]
    pub detail_top_padding_px: f64,
    #[serde(default = "default_overview_vertical_padding_px")]
    pub overview_vertical_padding_px: f64,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_detail_line_width_px")]
    pub detail_line_width_px: f64,
    #[serde(default = "default_overview_line_width_px")]
    pub overview_line_width_px: f64,
    #[serde(default = "default_ruler_line_width_px")]
    pub ruler_line_width_px: f64,
    #[serde(default = "default_marker_radius_px")]
    pub marker_radius_px: f64,
    #[serde(default = "default_selection_frame_line_px")]
    pub selection_frame_line_px: f64,
    #[serde(default)]
    pub selection_gesture: SelectionGestureConfig,
    #[serde(default)]
    pub initial_selection: SelectionWindow,
    #[serde(default)]
    pub date_format: DateLabelFormat,
    #[serde(default)]
    pub palette: ChartPalette,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(detail_viewport: Viewport, overview_viewport: Viewport) -> Self {
        Self {
            detail_viewport,
            overview_viewport,
            animation_duration_ms: default_animation_duration_ms(),
            axis_label_width_px: default_axis_label_width_px(),
            axis_label_height_px: default_axis_label_height_px(),
            detail_top_padding_px: default_detail_top_padding_px(),
            overview_vertical_padding_px: default_overview_vertical_padding_px(),
            font_size_px: default_font_size_px(),
            detail_line_width_px: default_detail_line_width_px(),
            overview_line_width_px: default_overview_line_width_px(),
            ruler_line_width_px: default_ruler_line_width_px(),
            marker_radius_px: default_marker_radius_px(),
            selection_frame_line_px: default_selection_frame_line_px(),
            selection_gesture: SelectionGestureConfig::default(),
            initial_selection: SelectionWindow::FULL,
            date_format: DateLabelFormat::default(),
            palette: ChartPalette::default(),
        }
    }

    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[must_use]
    pub fn with_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_axis_label_width_px(mut self, width_px: f64) -> Self {
        self.axis_label_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_axis_label_height_px(mut self, height_px: f64) -> Self {
        self.axis_label_height_px = height_px;
        self
    }

    #[must_use]
    pub fn with_detail_top_padding_px(mut self, padding_px: f64) -> Self {
        self.detail_top_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_selection_gesture(mut self, gesture: SelectionGestureConfig) -> Self {
        self.selection_gesture = gesture;
        self
    }

    #[must_use]
    pub fn with_initial_selection(mut self, selection: SelectionWindow) -> Self {
        self.initial_selection = selection;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: DateLabelFormat) -> Self {
        self.date_format = format;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ChartPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("axis_label_width_px", self.axis_label_width_px),
            ("axis_label_height_px", self.axis_label_height_px),
            ("detail_top_padding_px", self.detail_top_padding_px),
            ("overview_vertical_padding_px", self.overview_vertical_padding_px),
            ("selection_frame_line_px", self.selection_frame_line_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("detail_line_width_px", self.detail_line_width_px),
            ("overview_line_width_px", self.overview_line_width_px),
            ("ruler_line_width_px", self.ruler_line_width_px),
            ("marker_radius_px", self.marker_radius_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and > 0"
                )));
            }
        }
        SelectionWindow::new(self.initial_selection.start(), self.initial_selection.end())?;
        self.selection_gesture.validate()?;
        self.date_format.validate()?;
        self.palette.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_animation_duration_ms() -> u64 {
    250
}

fn default_axis_label_width_px() -> f64 {
    48.0
}

fn default_axis_label_height_px() -> f64 {
    24.0
}

fn default_detail_top_padding_px() -> f64 {
    12.0
}

fn default_overview_vertical_padding_px() -> f64 {
    4.0
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_detail_line_width_px() -> f64 {
    2.0
}

fn default_overview_line_width_px() -> f64 {
    1.0
}

fn default_ruler_line_width_px() -> f64 {
    1.0
}

fn default_marker_radius_px() -> f64 {
    4.0
}

fn default_selection_frame_line_px() -> f64 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::ChartEngineConfig;
    use crate::core::Viewport;

    #[test]
    fn minimal_json_fills_defaults() {
        let json = r#"{
            "detail_viewport": { "width": 320, "height": 240 },
            "overview_viewport": { "width": 320, "height": 48 }
        }"#;
        let config = ChartEngineConfig::from_json_str(json).expect("parse");
        assert_eq!(
            config,
            ChartEngineConfig::new(Viewport::new(320, 240), Viewport::new(320, 48))
        );
        assert_eq!(config.animation_duration_ms, 250);
        assert_eq!(config.selection_gesture.min_change_epsilon, 0.001);
    }

    #[test]
    fn rejects_negative_sizes() {
        let config = ChartEngineConfig::new(Viewport::new(1, 1), Viewport::new(1, 1))
            .with_axis_label_width_px(-1.0);
        assert!(config.validate().is_err());
    }
}
