use tracing::trace;

use crate::animation::FrameListener;
use crate::core::normalization::stack_weighted;
use crate::error::ChartResult;
use crate::render::{ChartFrame, ChartRenderer};

use super::{ChartEngine, InvalidationTopic};

impl<R: ChartRenderer> ChartEngine<R> {
    /// Ticks every animator slot to `timestamp` and renders pending work.
    ///
    /// Slots tick in registration order: Y-interval axes, channel opacities,
    /// then legend fades.
    pub fn advance_frame(&mut self, timestamp: f64) -> ChartResult<bool> {
        self.tick_animators(timestamp)?;
        self.render_frame()
    }

    /// Pushes pending work to the renderer.
    ///
    /// Vertex Y data is recombined only when [`InvalidationTopic::YValues`] is
    /// pending; matrices and colors are uploaded on every rendering tick.
    /// Returns `false` when nothing was pending.
    pub fn render_frame(&mut self) -> ChartResult<bool> {
        if self.pending.is_none() {
            return Ok(false);
        }
        if self.data.data_set.is_none() || !self.viewport.size().is_valid() {
            return Ok(false);
        }
        let pending = self.pending.take();

        if pending.contains_topic(InvalidationTopic::YValues) {
            if self.data.is_percentage() {
                self.recompute_baseline_y_values();
            }
            let y_values = if self.data.is_stacked() {
                stack_weighted(&self.data.baseline_y_values, &self.data.visibilities)
            } else {
                self.data.baseline_y_values.clone()
            };
            self.renderer.update_y_values(&y_values)?;
            trace!(channels = y_values.len(), "y values recombined");
        }

        if self.selection.is_active() {
            self.refresh_selection();
        }

        let frame = self.build_frame();
        self.renderer.update(&frame)?;
        self.renderer.render()?;
        trace!(axes = frame.matrices.len(), "frame rendered");
        Ok(true)
    }

    /// Uniforms for the current displayed state.
    #[must_use]
    pub fn build_frame(&self) -> ChartFrame {
        let matrices = (0..self.viewport.axis_count())
            .map(|axis| self.viewport.transform_matrix(axis))
            .collect();
        let colors = self.data.colors.iter().map(|color| color.components()).collect();
        ChartFrame {
            size: self.viewport.size(),
            matrices,
            colors,
        }
    }

    fn tick_animators(&mut self, timestamp: f64) -> ChartResult<()> {
        for axis in 0..self.animation.interval_animators.len() {
            let animator = &mut self.animation.interval_animators[axis];
            let Some(interval) = animator.update(timestamp) else {
                continue;
            };
            let progress = animator.eased_progress();
            self.viewport.set_interval_y(axis, interval)?;
            if let Some(legend) = self.legends.value.as_mut() {
                legend.set_progress(axis, progress);
                self.pending.insert(InvalidationTopic::ValueLegend);
            }
            self.invalidate(InvalidationTopic::Transform);
            if self.selection.is_active() {
                self.invalidate(InvalidationTopic::Selection);
            }
        }

        for index in 0..self.animation.opacity_animators.len() {
            if let Some(value) = self.animation.opacity_animators[index].update(timestamp) {
                self.apply_channel_opacity(index, value);
            }
        }

        if let Some(legend) = self.legends.time.as_mut() {
            if legend.on_frame(timestamp) {
                self.pending.insert(InvalidationTopic::TimeLegend);
            }
        }
        Ok(())
    }
}

impl<R: ChartRenderer> FrameListener for ChartEngine<R> {
    fn on_frame(&mut self, timestamp: f64) -> ChartResult<()> {
        self.advance_frame(timestamp).map(|_| ())
    }
}
