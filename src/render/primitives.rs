use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Decodes an opaque `0xRRGGBB` color.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(
            f64::from((hex >> 16) & 0xff) / 255.0,
            f64::from((hex >> 8) & 0xff) / 255.0,
            f64::from(hex & 0xff) / 255.0,
        )
    }

    /// Parses `#RRGGBB` (leading `#` optional).
    pub fn parse_hex(text: &str) -> ChartResult<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ChartError::InvalidData(format!(
                "color `{text}` must have six hex digits"
            )));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|_| ChartError::InvalidData(format!("color `{text}` is not valid hex")))?;
        Ok(Self::from_hex(hex))
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// Components as uploaded to the backend.
    #[must_use]
    pub fn components(self) -> [f32; 4] {
        [
            self.red as f32,
            self.green as f32,
            self.blue as f32,
            self.alpha as f32,
        ]
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}
