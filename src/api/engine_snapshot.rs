use serde::{Deserialize, Serialize};

use crate::core::{AxisInterval, EdgeInsets, Interval, ViewSize};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartRenderer;

use super::{ChartEngine, InvalidationTopics};

/// Channel state at one index. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    pub index: usize,
    pub name: String,
    pub enabled: bool,
    pub alpha: f64,
    pub visibility: f64,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub size: ViewSize,
    pub insets: EdgeInsets,
    pub interval_x: Interval<f64>,
    pub displayed_y_intervals: Vec<AxisInterval>,
    pub target_y_intervals: Option<Vec<AxisInterval>>,
    pub baseline_diffs: Vec<f64>,
    pub scale_x: f64,
    pub scale_ys: Vec<f64>,
    pub visible_window: (usize, usize),
    /// Channel state in data set order.
    pub channels: Vec<ChannelSnapshot>,
    pub selected_index: Option<usize>,
    pub animating: bool,
    pub pending: InvalidationTopics,
}

impl<R: ChartRenderer> ChartEngine<R> {
    /// Captures the engine state for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let channels = self
            .data
            .data_set
            .iter()
            .flat_map(|data_set| data_set.channels().iter().enumerate())
            .map(|(index, channel)| ChannelSnapshot {
                index,
                name: channel.name().to_owned(),
                enabled: !self.data.disabled.contains(&index),
                alpha: self.data.colors.get(index).map_or(1.0, |color| color.alpha),
                visibility: self.data.visibilities.get(index).copied().unwrap_or(1.0),
            })
            .collect();

        ChartSnapshot {
            size: self.viewport.size(),
            insets: self.viewport.insets(),
            interval_x: self.viewport.interval_x(),
            displayed_y_intervals: self.viewport.interval_ys().to_vec(),
            target_y_intervals: self
                .data
                .last_updated_intervals
                .as_ref()
                .map(|intervals| intervals.to_vec()),
            baseline_diffs: self.viewport.default_diff_ys().to_vec(),
            scale_x: self.viewport.scale_x(),
            scale_ys: self.viewport.scale_ys().to_vec(),
            visible_window: self.viewport.visible_index_window(),
            channels,
            selected_index: self.selection.selected_index(),
            animating: self.is_animating(),
            pending: self.pending,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
