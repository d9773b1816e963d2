use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64, unix_seconds_to_datetime};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One named, colored time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    name: String,
    color: Color,
    values: Vec<f64>,
}

impl Channel {
    pub fn new(name: impl Into<String>, color: Color, values: Vec<f64>) -> ChartResult<Self> {
        let name = name.into();
        color.validate()?;
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "channel `{name}` has a non-finite value at index {position}"
            )));
        }
        Ok(Self {
            name,
            color,
            values,
        })
    }

    /// Builds a channel from exact decimal samples.
    pub fn from_decimal_values(
        name: impl Into<String>,
        color: Color,
        values: &[Decimal],
    ) -> ChartResult<Self> {
        let values = values
            .iter()
            .map(|value| decimal_to_f64(*value, "channel value"))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(name, color, values)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Composition flags carried by a data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataSetFlags {
    pub stacked: bool,
    pub percentage: bool,
    pub y_scaled: bool,
}

/// Immutable chart input: shared timestamps plus equally long channels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    timestamps: Vec<f64>,
    channels: Vec<Channel>,
    flags: DataSetFlags,
}

impl DataSet {
    /// Validates and builds a data set.
    ///
    /// Timestamps are unix seconds and must be finite and strictly increasing;
    /// every channel must carry exactly one value per timestamp.
    pub fn new(
        timestamps: Vec<f64>,
        channels: Vec<Channel>,
        flags: DataSetFlags,
    ) -> ChartResult<Self> {
        if timestamps.is_empty() {
            return Err(ChartError::InvalidData(
                "data set needs at least one timestamp".to_owned(),
            ));
        }
        if let Some(position) = timestamps.iter().position(|time| !time.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "timestamp at index {position} must be finite"
            )));
        }
        if let Some(position) = timestamps.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ChartError::NonMonotonicTimestamps {
                index: position + 1,
            });
        }
        for channel in &channels {
            if channel.len() != timestamps.len() {
                return Err(ChartError::ChannelLengthMismatch {
                    channel: channel.name().to_owned(),
                    expected: timestamps.len(),
                    actual: channel.len(),
                });
            }
        }

        Ok(Self {
            timestamps,
            channels,
            flags,
        })
    }

    pub fn from_datetimes(
        timestamps: &[DateTime<Utc>],
        channels: Vec<Channel>,
        flags: DataSetFlags,
    ) -> ChartResult<Self> {
        let timestamps = timestamps
            .iter()
            .copied()
            .map(datetime_to_unix_seconds)
            .collect();
        Self::new(timestamps, channels, flags)
    }

    #[must_use]
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    #[must_use]
    pub fn timestamp_datetime(&self, index: usize) -> Option<DateTime<Utc>> {
        self.timestamps
            .get(index)
            .copied()
            .and_then(unix_seconds_to_datetime)
    }

    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn flags(&self) -> DataSetFlags {
        self.flags
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.flags.stacked
    }

    #[must_use]
    pub fn is_percentage(&self) -> bool {
        self.flags.percentage
    }

    #[must_use]
    pub fn is_y_scaled(&self) -> bool {
        self.flags.y_scaled
    }
}
