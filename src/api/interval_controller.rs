use tracing::{debug, trace};

use crate::core::normalization::normalized_x_values;
use crate::core::{EdgeInsets, Interval, ViewSize};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartRenderer;

use super::{ChartEngine, InvalidationTopic};

impl<R: ChartRenderer> ChartEngine<R> {
    /// Pans/zooms to `interval`, a fraction of the full index range.
    pub fn set_interval_x(&mut self, interval: Interval<f64>) -> ChartResult<()> {
        self.viewport.set_interval_x(interval)?;
        trace!(min = interval.min, max = interval.max, "x interval changed");

        self.notify_time_legend();
        self.invalidate(InvalidationTopic::Transform);
        if self.selection.is_active() {
            self.invalidate(InvalidationTopic::Selection);
        }
        self.update_interval_y()
    }

    /// Resizes the chart and recomputes every default scale.
    pub fn set_size(&mut self, size: ViewSize) -> ChartResult<()> {
        self.viewport.set_size(size)?;
        self.config.size = size;
        debug!(width = size.width, height = size.height, "chart resized");
        self.update_defaults()
    }

    /// Changes the insets; backends anchored at zero keep a zero bottom inset.
    pub fn set_insets(&mut self, insets: EdgeInsets) -> ChartResult<()> {
        let mut insets = insets;
        if self.renderer.starts_from_zero() {
            insets.bottom = 0.0;
        }
        self.viewport.set_insets(insets)?;
        self.config.insets = insets;
        if self.viewport.size().is_valid() {
            self.update_defaults()?;
        }
        Ok(())
    }

    /// Recomputes X scales, the Y interval and every vertex array.
    pub(super) fn update_defaults(&mut self) -> ChartResult<()> {
        let Some((count, channel_count)) = self
            .data
            .data_set
            .as_ref()
            .map(|data_set| (data_set.len(), data_set.channels().len()))
        else {
            return Ok(());
        };

        self.viewport.update_default_x_scales(count);
        self.update_interval_y()?;

        self.renderer
            .update_x_values(&normalized_x_values(count), channel_count)?;
        self.notify_time_legend();

        self.recompute_baseline_y_values();
        self.invalidate(InvalidationTopic::XValues);
        self.invalidate(InvalidationTopic::YValues);
        self.invalidate(InvalidationTopic::Transform);
        Ok(())
    }

    /// Re-runs the Y calculator over the visible window and starts the axis
    /// transitions it implies.
    ///
    /// Nothing happens when the result equals the previous run. Axes with a
    /// baseline animate from the displayed interval; axes without one capture
    /// the new interval as their baseline. Zero-diff targets keep the last
    /// displayed range.
    pub(super) fn update_interval_y(&mut self) -> ChartResult<()> {
        let Some(data_set) = self.data.data_set.as_ref() else {
            return Ok(());
        };
        let (left, right) = self.viewport.visible_index_window();
        let intervals = self.calculator.calculate_y_intervals(
            data_set.channels(),
            &self.data.disabled,
            left,
            right + 1,
        );

        let axis_count = self.viewport.axis_count();
        if intervals.len() != axis_count {
            return Err(ChartError::AxisCountMismatch {
                expected: axis_count,
                actual: intervals.len(),
            });
        }
        if self.data.last_updated_intervals.as_ref() == Some(&intervals) {
            return Ok(());
        }
        self.data.last_updated_intervals = Some(intervals.clone());

        let mut baseline_changed = false;
        for (axis, target) in intervals.iter().copied().enumerate() {
            if target.is_zero_diff() {
                trace!(axis, "skipping zero-diff y interval");
                continue;
            }
            if self.viewport.is_baseline_established(axis) {
                let displayed = self.viewport.interval_ys()[axis];
                if let Some(value) = self.animation.interval_animators[axis].animate(displayed, target)
                {
                    self.viewport.set_interval_y(axis, value)?;
                }
            } else {
                self.viewport.establish_baseline(axis, target)?;
                baseline_changed = true;
                debug!(axis, min = target.min, max = target.max, "y baseline established");
            }
        }

        if baseline_changed {
            self.recompute_baseline_y_values();
            self.invalidate(InvalidationTopic::YValues);
        }
        if let Some(legend) = self.legends.value.as_mut() {
            legend.chart_will_transition(&intervals, &self.viewport);
            for (axis, animator) in self.animation.interval_animators.iter().enumerate() {
                if !animator.is_in_progress() {
                    legend.set_progress(axis, 1.0);
                }
            }
            self.pending.insert(InvalidationTopic::ValueLegend);
        }
        self.invalidate(InvalidationTopic::Transform);
        Ok(())
    }

    fn notify_time_legend(&mut self) {
        let (from, to) = self.viewport.drawable_index_window();
        if let Some(legend) = self.legends.time.as_mut() {
            legend.update(from, to, &self.viewport);
            self.pending.insert(InvalidationTopic::TimeLegend);
        }
    }
}
