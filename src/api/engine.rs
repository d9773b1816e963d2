use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::animation::Animator;
use crate::core::{AxisInterval, AxisIntervals, DataSet, MAX_Y_AXES, Viewport, YCalculator};
use crate::interaction::SelectionState;
use crate::legend::{TimeLegend, TimeLegendFrame, ValueLegend, ValueLegendFrame};
use crate::render::{ChartRenderer, Color};

use super::{ChartEngineConfig, InvalidationTopic, InvalidationTopics, SelectionDetails};

/// Per-channel state derived from the loaded data set.
#[derive(Debug, Default)]
pub(super) struct ChartDataState {
    pub(super) data_set: Option<DataSet>,
    pub(super) colors: Vec<Color>,
    /// Stacking weights in `[0, 1]`; only used under stacked composition.
    pub(super) visibilities: Vec<f64>,
    pub(super) disabled: BTreeSet<usize>,
    pub(super) baseline_y_values: Vec<Vec<f32>>,
    pub(super) last_updated_intervals: Option<AxisIntervals>,
}

impl ChartDataState {
    pub(super) fn is_stacked(&self) -> bool {
        self.data_set
            .as_ref()
            .is_some_and(|data_set| data_set.is_stacked() || data_set.is_percentage())
    }

    pub(super) fn is_percentage(&self) -> bool {
        self.data_set.as_ref().is_some_and(DataSet::is_percentage)
    }

    pub(super) fn channel_count(&self) -> usize {
        self.data_set
            .as_ref()
            .map_or(0, |data_set| data_set.channels().len())
    }
}

/// Animator slots, ticked in this order: axes, channel opacities.
#[derive(Debug, Default)]
pub(super) struct ChartAnimationState {
    pub(super) interval_animators: SmallVec<[Animator<AxisInterval>; MAX_Y_AXES]>,
    pub(super) opacity_animators: Vec<Animator<f64>>,
}

#[derive(Default)]
pub(super) struct ChartLegends {
    pub(super) time: Option<Box<dyn TimeLegend>>,
    pub(super) value: Option<Box<dyn ValueLegend>>,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the viewport, the Y-calculator strategy, every animator
/// slot and the optional legends, and feeds the renderer. Host code drives it
/// with interaction input (`set_interval_x`, channel toggles, selection) and
/// display refresh ticks (`on_frame`).
pub struct ChartEngine<R: ChartRenderer> {
    pub(super) renderer: R,
    pub(super) calculator: Box<dyn YCalculator>,
    pub(super) config: ChartEngineConfig,
    pub(super) viewport: Viewport,
    pub(super) data: ChartDataState,
    pub(super) animation: ChartAnimationState,
    pub(super) legends: ChartLegends,
    pub(super) selection: SelectionState,
    pub(super) selection_details: Option<SelectionDetails>,
    pub(super) pending: InvalidationTopics,
}

impl<R: ChartRenderer> ChartEngine<R> {
    /// Viewport driving the transforms.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Validated configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    /// Loaded data set, if any.
    #[must_use]
    pub fn data_set(&self) -> Option<&DataSet> {
        self.data.data_set.as_ref()
    }

    /// Injected renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the injected renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Consumes the engine, returning its renderer.
    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Indices of hidden channels.
    #[must_use]
    pub fn disabled_channels(&self) -> &BTreeSet<usize> {
        &self.data.disabled
    }

    /// Whether the channel at `index` exists and is shown.
    #[must_use]
    pub fn is_channel_enabled(&self, index: usize) -> bool {
        index < self.data.channel_count() && !self.data.disabled.contains(&index)
    }

    /// Current color of every channel; alpha animates for unstacked charts.
    #[must_use]
    pub fn channel_colors(&self) -> &[Color] {
        &self.data.colors
    }

    /// Current stacking weight of every channel.
    #[must_use]
    pub fn channel_visibilities(&self) -> &[f64] {
        &self.data.visibilities
    }

    /// Baseline-normalized Y arrays before stacking weights are applied.
    #[must_use]
    pub fn baseline_y_values(&self) -> &[Vec<f32>] {
        &self.data.baseline_y_values
    }

    /// Target intervals of the latest Y-calculator run.
    #[must_use]
    pub fn target_y_intervals(&self) -> Option<&[AxisInterval]> {
        self.data.last_updated_intervals.as_deref()
    }

    /// Intervals currently displayed (possibly mid animation).
    #[must_use]
    pub fn displayed_y_intervals(&self) -> &[AxisInterval] {
        self.viewport.interval_ys()
    }

    /// Whether any Y-interval or opacity animation is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation
            .interval_animators
            .iter()
            .any(Animator::is_in_progress)
            || self
                .animation
                .opacity_animators
                .iter()
                .any(Animator::is_in_progress)
    }

    /// Work queued for the next rendering tick.
    #[must_use]
    pub fn pending_invalidation_topics(&self) -> InvalidationTopics {
        self.pending
    }

    /// Whether `topic` is queued for the next rendering tick.
    #[must_use]
    pub fn has_pending_invalidation_topic(&self, topic: InvalidationTopic) -> bool {
        self.pending.contains_topic(topic)
    }

    /// Whether the next rendering tick has anything to do.
    #[must_use]
    pub fn has_pending_invalidation(&self) -> bool {
        !self.pending.is_none()
    }

    /// Labels of the attached time legend.
    #[must_use]
    pub fn time_legend_frame(&self) -> Option<TimeLegendFrame> {
        self.legends.time.as_ref().map(|legend| legend.frame())
    }

    /// Gridlines of the attached value legend.
    #[must_use]
    pub fn value_legend_frame(&self) -> Option<ValueLegendFrame> {
        self.legends.value.as_ref().map(|legend| legend.frame())
    }

    pub(super) fn invalidate(&mut self, topic: InvalidationTopic) {
        self.pending.insert(topic);
    }
}
