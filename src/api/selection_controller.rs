use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Channel;
use crate::render::{ChartRenderer, Color, SelectionType};

use super::{ChartEngine, InvalidationTopic};

/// Value of one enabled channel at the selected sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelReading {
    pub channel: usize,
    pub name: String,
    pub color: Color,
    pub value: f64,
    /// Rounded share of the total, percentage charts only.
    pub percentage: Option<f64>,
    /// Pixel y of the selection point, point selection only.
    pub y: Option<f64>,
}

/// Readout of the details popover for one selected sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionDetails {
    pub index: usize,
    pub timestamp: f64,
    /// Pixel x of the selected sample.
    pub x: f64,
    pub readings: Vec<ChannelReading>,
    /// Sum of the readings on stacked (non-percentage) charts with several channels.
    pub total: Option<f64>,
    /// Pixel span left undimmed by mask selection.
    pub mask: Option<(f64, f64)>,
}

impl<R: ChartRenderer> ChartEngine<R> {
    /// Selects the sample under `normalized_x` (a fraction of the view width).
    ///
    /// Returns `None` when details are disabled, no data is loaded or the
    /// position is not finite.
    pub fn move_selection(&mut self, normalized_x: f64) -> Option<SelectionDetails> {
        if !self.config.details_enabled || !normalized_x.is_finite() {
            return None;
        }
        let details = self.selection_details_at(normalized_x)?;
        if self.selection.on_select(details.index, details.x) {
            trace!(index = details.index, "selection moved");
        }
        self.selection_details = Some(details.clone());
        self.invalidate(InvalidationTopic::Selection);
        Some(details)
    }

    /// Hides the details readout when scrubbing ends.
    pub fn end_selection(&mut self) {
        if self.selection.is_active() {
            self.selection.on_end();
            self.selection_details = None;
            self.invalidate(InvalidationTopic::Selection);
        }
    }

    /// Details of the active selection, refreshed on every rendering tick.
    #[must_use]
    pub fn selection_details(&self) -> Option<&SelectionDetails> {
        self.selection_details.as_ref()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected_index()
    }

    /// Re-anchors an active selection at its last pixel after the view moved.
    pub(super) fn refresh_selection(&mut self) {
        let width = self.viewport.size().width;
        if !(width > 0.0) {
            return;
        }
        let normalized_x = self.selection.last_x() / width;
        if let Some(details) = self.selection_details_at(normalized_x) {
            let _ = self.selection.on_select(details.index, details.x);
            self.selection_details = Some(details);
        }
    }

    fn selection_details_at(&self, normalized_x: f64) -> Option<SelectionDetails> {
        let data_set = self.data.data_set.as_ref()?;
        let index = self
            .viewport
            .closest_index(self.viewport.translate_left() - normalized_x);
        let timestamp = *data_set.timestamps().get(index)?;
        let x = self.viewport.x_position(index);

        let stacked = self.data.is_stacked();
        let percentage = self.data.is_percentage();
        let selection_type = self.renderer.selection_type();

        let enabled: Vec<(usize, &Channel)> = data_set
            .channels()
            .iter()
            .enumerate()
            .filter(|(channel, _)| !self.data.disabled.contains(channel))
            .collect();
        let total: f64 = enabled.iter().map(|(_, channel)| channel.values()[index]).sum();

        let mut stack_level = 0.0;
        let readings = enabled
            .iter()
            .map(|(channel_index, channel)| {
                let value = channel.values()[index];
                stack_level += if percentage && total != 0.0 {
                    value / total * 100.0
                } else {
                    value
                };
                let y = (selection_type == SelectionType::Point).then(|| {
                    if stacked {
                        self.viewport.y(stack_level, 0)
                    } else {
                        self.viewport.y(value, *channel_index)
                    }
                });
                ChannelReading {
                    channel: *channel_index,
                    name: channel.name().to_owned(),
                    color: channel.color(),
                    value,
                    percentage: percentage.then(|| share_percent(value, total)),
                    y,
                }
            })
            .collect::<Vec<_>>();

        let spacing = self.viewport.spacing_x();
        Some(SelectionDetails {
            index,
            timestamp,
            x,
            total: (stacked && !percentage && readings.len() > 1).then_some(total),
            readings,
            mask: (selection_type == SelectionType::Mask)
                .then(|| (x - spacing / 2.0, x + spacing / 2.0)),
        })
    }
}

fn share_percent(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        (value / total * 100.0).round()
    }
}
