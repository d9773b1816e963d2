use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Inclusive `[min, max]` range over one scalar axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Builds an interval, rejecting `min > max` and unordered values (NaN).
    pub fn new(min: T, max: T) -> ChartResult<Self> {
        if !(min <= max) {
            return Err(ChartError::InvalidData(
                "interval min must be <= max".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }
}

/// Value range of one Y axis. Interpolated by the animation engine.
pub type AxisInterval = Interval<f64>;

impl Interval<f64> {
    /// Zero-diff sentinel: "no valid range established yet".
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    /// The full normalized X range.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    #[must_use]
    pub fn diff(self) -> f64 {
        self.max - self.min
    }

    /// Zero (or non-finite) diff: consumers must not divide by it.
    #[must_use]
    pub fn is_zero_diff(self) -> bool {
        let diff = self.diff();
        diff == 0.0 || !diff.is_finite()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}
