use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Date patterns for axis labels and the pointer info box.
///
/// Timestamps are epoch milliseconds rendered in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateLabelFormat {
    #[serde(default = "default_axis_pattern")]
    pub axis_pattern: String,
    #[serde(default = "default_info_pattern")]
    pub info_pattern: String,
}

impl Default for DateLabelFormat {
    fn default() -> Self {
        Self {
            axis_pattern: default_axis_pattern(),
            info_pattern: default_info_pattern(),
        }
    }
}

impl DateLabelFormat {
    /// Axis label, e.g. `Mar 07`.
    #[must_use]
    pub fn format_axis(&self, timestamp_ms: i64) -> String {
        format_timestamp(timestamp_ms, &self.axis_pattern)
    }

    /// Info box header, e.g. `Sat, Mar 07`.
    #[must_use]
    pub fn format_info(&self, timestamp_ms: i64) -> String {
        format_timestamp(timestamp_ms, &self.info_pattern)
    }

    /// Rejects patterns containing unknown `strftime` specifiers.
    pub fn validate(&self) -> ChartResult<()> {
        for (name, pattern) in [
            ("axis_pattern", &self.axis_pattern),
            ("info_pattern", &self.info_pattern),
        ] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(ChartError::InvalidData(format!(
                    "date format `{name}` has an invalid pattern `{pattern}`"
                )));
            }
        }
        Ok(())
    }
}

fn default_axis_pattern() -> String {
    "%b %d".to_owned()
}

fn default_info_pattern() -> String {
    "%a, %b %d".to_owned()
}

fn format_timestamp(timestamp_ms: i64, pattern: &str) -> String {
    let Some(time) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
        return timestamp_ms.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", time.format(pattern)).is_err() {
        return timestamp_ms.to_string();
    }
    out
}

/// Ruler label for a gridline value.
#[must_use]
pub fn format_ruler_value(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    format!("{}", value.round() as i64)
}

/// Deterministic, backend-independent text width estimate.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}
