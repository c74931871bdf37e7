use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of one drawing surface (detail plot or overview strip).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Opaque 8-bit RGB color attached to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl SeriesColor {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `#RRGGBB` notation.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::MalformedData(format!(
                "color `{input}` must use #RRGGBB notation"
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| {
                ChartError::MalformedData(format!("color `{input}` has invalid channel: {e}"))
            })
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::SeriesColor;

    #[test]
    fn hex_color_parses_with_and_without_hash() {
        assert_eq!(
            SeriesColor::from_hex("#3DC23F").expect("valid"),
            SeriesColor::rgb(0x3d, 0xc2, 0x3f)
        );
        assert_eq!(
            SeriesColor::from_hex("f34c44").expect("valid"),
            SeriesColor::rgb(0xf3, 0x4c, 0x44)
        );
    }

    #[test]
    fn hex_color_rejects_short_or_non_hex_input() {
        assert!(SeriesColor::from_hex("#fff").is_err());
        assert!(SeriesColor::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn hex_color_formats_lowercase() {
        assert_eq!(SeriesColor::rgb(255, 0, 16).to_hex(), "#ff0010");
    }
}
