use serde::{Deserialize, Serialize};

use crate::core::ViewSize;
use crate::error::{ChartError, ChartResult};

/// Column-major 4x4 clip-space transform for one Y axis.
///
/// Only scale and translation are ever populated:
/// `[sx, 0, 0, 0, 0, sy, 0, 0, 0, 0, 1, 0, tx, ty, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformMatrix([f64; 16]);

impl TransformMatrix {
    pub const IDENTITY: Self = Self::scale_translate(1.0, 1.0, 0.0, 0.0);

    #[must_use]
    pub const fn scale_translate(
        scale_x: f64,
        scale_y: f64,
        translate_x: f64,
        translate_y: f64,
    ) -> Self {
        Self([
            scale_x,
            0.0,
            0.0,
            0.0,
            0.0,
            scale_y,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
            translate_x,
            translate_y,
            0.0,
            1.0,
        ])
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.0[5]
    }

    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.0[12]
    }

    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.0[13]
    }

    /// Applies the transform to a clip-space point.
    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.scale_x() * x + self.translate_x(),
            self.scale_y() * y + self.translate_y(),
        )
    }

    #[must_use]
    pub fn as_array(&self) -> &[f64; 16] {
        &self.0
    }

    /// Single-precision copy as uploaded to shaders.
    #[must_use]
    pub fn to_f32(&self) -> [f32; 16] {
        self.0.map(|value| value as f32)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|value| value.is_finite())
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts a view fraction (`y` from the top) to clip space (`y` up).
#[must_use]
pub fn fraction_to_clip(x: f64, y: f64) -> (f64, f64) {
    (x * 2.0 - 1.0, 1.0 - y * 2.0)
}

/// Per-frame uniforms handed to the backend: one matrix per axis and one
/// RGBA color per channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub size: ViewSize,
    pub matrices: Vec<TransformMatrix>,
    pub colors: Vec<[f32; 4]>,
}

impl ChartFrame {
    #[must_use]
    pub fn new(size: ViewSize) -> Self {
        Self {
            size,
            matrices: Vec::new(),
            colors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_matrix(mut self, matrix: TransformMatrix) -> Self {
        self.matrices.push(matrix);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.colors.push(color);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.size.validate()?;

        if let Some(axis) = self.matrices.iter().position(|matrix| !matrix.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "transform matrix of axis {axis} must be finite"
            )));
        }
        for (channel, color) in self.colors.iter().enumerate() {
            if color
                .iter()
                .any(|component| !component.is_finite() || !(0.0..=1.0).contains(component))
            {
                return Err(ChartError::InvalidData(format!(
                    "color of channel {channel} must be finite and in [0, 1]"
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty() && self.colors.is_empty()
    }
}
