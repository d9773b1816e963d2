use tracing::debug;

use crate::animation::Animator;
use crate::core::DataSet;
use crate::core::normalization::{baseline_y_values, channel_baselines, percentage_values};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartRenderer;

use super::{ChartEngine, InvalidationTopic};

impl<R: ChartRenderer> ChartEngine<R> {
    /// Loads a data set, resetting every per-channel state and zoom session.
    pub fn set_data_set(&mut self, data_set: DataSet) -> ChartResult<()> {
        let channel_count = data_set.channels().len();
        let default_duration = self.config.animation.default_duration;

        self.data.colors = data_set.channels().iter().map(|channel| channel.color()).collect();
        self.data.visibilities = vec![1.0; channel_count];
        self.data.disabled.clear();
        self.data.baseline_y_values.clear();
        self.data.last_updated_intervals = None;
        self.animation.opacity_animators = (0..channel_count)
            .map(|_| Animator::new(default_duration))
            .collect();
        for animator in &mut self.animation.interval_animators {
            animator.reset();
        }
        self.calculator.invalidate();
        self.viewport.reset_baselines();
        self.selection.on_end();
        self.selection_details = None;

        if let Some(legend) = self.legends.time.as_mut() {
            legend.set_timestamps(data_set.timestamps());
        }

        debug!(
            channels = channel_count,
            timestamps = data_set.len(),
            stacked = data_set.is_stacked(),
            percentage = data_set.is_percentage(),
            "data set loaded"
        );
        self.data.data_set = Some(data_set);

        if self.viewport.size().is_valid() {
            self.update_defaults()?;
        }
        Ok(())
    }

    /// Shows the channels at `indices`, fading them in.
    pub fn enable_channels(&mut self, indices: &[usize]) -> ChartResult<()> {
        self.set_channels_enabled(indices, &[])
    }

    /// Hides the channels at `indices`, fading them out.
    pub fn disable_channels(&mut self, indices: &[usize]) -> ChartResult<()> {
        self.set_channels_enabled(&[], indices)
    }

    /// Shows `enable` and hides `disable` in one step, animating opacities and
    /// re-running the Y calculator once.
    ///
    /// Hides are applied before shows, so an index listed in both ends up
    /// visible. Out-of-range indices are rejected before anything changes.
    pub fn set_channels_enabled(&mut self, enable: &[usize], disable: &[usize]) -> ChartResult<()> {
        let count = self.data.channel_count();
        if let Some(&index) = enable.iter().chain(disable).find(|index| **index >= count) {
            return Err(ChartError::ChannelOutOfRange { index, count });
        }

        for &index in disable {
            self.data.disabled.insert(index);
            self.animate_channel_opacity(index, 0.0);
        }
        for &index in enable {
            self.data.disabled.remove(&index);
            self.animate_channel_opacity(index, 1.0);
        }
        debug!(
            enabled = enable.len(),
            disabled = disable.len(),
            hidden = self.data.disabled.len(),
            "channel visibility changed"
        );

        self.update_interval_y()
    }

    fn animate_channel_opacity(&mut self, index: usize, target: f64) {
        let from = if self.data.is_stacked() {
            self.data.visibilities[index]
        } else {
            self.data.colors[index].alpha
        };
        if let Some(value) = self.animation.opacity_animators[index].animate(from, target) {
            self.apply_channel_opacity(index, value);
        }
    }

    /// Writes an animated opacity where the composition reads it.
    pub(super) fn apply_channel_opacity(&mut self, index: usize, value: f64) {
        if self.data.is_stacked() {
            if let Some(visibility) = self.data.visibilities.get_mut(index) {
                *visibility = value;
            }
            self.invalidate(InvalidationTopic::YValues);
        } else if let Some(color) = self.data.colors.get_mut(index) {
            *color = color.with_alpha(value.clamp(0.0, 1.0));
        }
        self.invalidate(InvalidationTopic::Transform);
    }

    /// Rebuilds the baseline-normalized Y arrays of the full data set.
    ///
    /// Percentage charts first convert values to shares of the weighted total.
    pub(super) fn recompute_baseline_y_values(&mut self) {
        let Some(data_set) = self.data.data_set.as_ref() else {
            return;
        };
        self.data.baseline_y_values = if data_set.is_percentage() {
            percentage_values(data_set.channels(), &self.data.visibilities)
                .iter()
                .enumerate()
                .map(|(index, shares)| baseline_y_values(shares, index, &self.viewport))
                .collect()
        } else {
            channel_baselines(data_set.channels(), &self.viewport)
        };
    }
}
