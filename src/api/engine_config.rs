use serde::{Deserialize, Serialize};

use crate::animation::{DEFAULT_ANIMATION_DURATION, INTERVAL_ANIMATION_DURATION};
use crate::core::{EdgeInsets, ViewSize};
use crate::error::{ChartError, ChartResult};

/// Durations (seconds) of the engine's animator slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTuning {
    /// Channel opacity and legend fades.
    #[serde(default = "default_animation_duration")]
    pub default_duration: f64,
    /// Y-interval transitions.
    #[serde(default = "default_interval_duration")]
    pub interval_duration: f64,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            default_duration: default_animation_duration(),
            interval_duration: default_interval_duration(),
        }
    }
}

/// Layout knobs of the default legends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Minimum pixel distance between two time labels.
    #[serde(default = "default_min_label_width")]
    pub min_label_width: f64,
    /// Gridline rows including the (optional) top one.
    #[serde(default = "default_value_line_count")]
    pub value_line_count: usize,
    #[serde(default)]
    pub shows_top_value: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            min_label_width: default_min_label_width(),
            value_line_count: default_value_line_count(),
            shows_top_value: false,
        }
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. A zero `size` means the chart has
/// not been laid out yet; defaults are computed on the first `set_size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default)]
    pub size: ViewSize,
    #[serde(default = "default_insets")]
    pub insets: EdgeInsets,
    #[serde(default)]
    pub animation: AnimationTuning,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default = "default_details_enabled")]
    pub details_enabled: bool,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            size: ViewSize::default(),
            insets: default_insets(),
            animation: AnimationTuning::default(),
            legend: LegendConfig::default(),
            details_enabled: default_details_enabled(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(size: ViewSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: EdgeInsets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationTuning) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    /// Enables or disables the scrubbing details readout.
    #[must_use]
    pub fn with_details_enabled(mut self, enabled: bool) -> Self {
        self.details_enabled = enabled;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.size != ViewSize::default() {
            self.size.validate()?;
        }
        self.insets.validate()?;
        for (name, duration) in [
            ("default_duration", self.animation.default_duration),
            ("interval_duration", self.animation.interval_duration),
        ] {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "animation `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.legend.min_label_width.is_finite() || self.legend.min_label_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "legend min label width must be finite and > 0".to_owned(),
            ));
        }
        if self.legend.value_line_count < 2 {
            return Err(ChartError::InvalidData(
                "legend needs at least two value lines".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_animation_duration() -> f64 {
    DEFAULT_ANIMATION_DURATION
}

fn default_interval_duration() -> f64 {
    INTERVAL_ANIMATION_DURATION
}

fn default_min_label_width() -> f64 {
    40.0
}

fn default_value_line_count() -> usize {
    7
}

fn default_insets() -> EdgeInsets {
    EdgeInsets::new(20.0, 0.0, 0.0, 0.0)
}

fn default_details_enabled() -> bool {
    true
}
