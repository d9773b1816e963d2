use smallvec::SmallVec;
use tracing::debug;

use crate::animation::Animator;
use crate::core::{DataSet, Viewport, YCalculator, YCalculatorKind};
use crate::error::ChartResult;
use crate::interaction::SelectionState;
use crate::legend::{FloatingTimeLegend, FloatingValueLegend, TimeLegend, ValueLegend};
use crate::render::ChartRenderer;

use super::engine::{ChartAnimationState, ChartDataState, ChartLegends};
use super::{ChartEngine, ChartEngineConfig, InvalidationTopics};

impl<R: ChartRenderer> ChartEngine<R> {
    /// Creates an engine around an injected renderer and Y-calculator strategy.
    pub fn new(
        renderer: R,
        calculator: Box<dyn YCalculator>,
        config: ChartEngineConfig,
    ) -> ChartResult<Self> {
        let mut config = config.validate()?;
        if renderer.starts_from_zero() {
            config.insets.bottom = 0.0;
        }

        let axis_count = calculator.axis_count();
        let mut viewport = Viewport::new(axis_count, config.insets)?;
        if config.size.is_valid() {
            viewport.set_size(config.size)?;
        }

        let interval_animators: SmallVec<_> = (0..axis_count)
            .map(|_| Animator::new(config.animation.interval_duration))
            .collect();

        debug!(
            axes = axis_count,
            width = config.size.width,
            height = config.size.height,
            "chart engine created"
        );

        Ok(Self {
            renderer,
            calculator,
            config,
            viewport,
            data: ChartDataState::default(),
            animation: ChartAnimationState {
                interval_animators,
                opacity_animators: Vec::new(),
            },
            legends: ChartLegends::default(),
            selection: SelectionState::default(),
            selection_details: None,
            pending: InvalidationTopics::none(),
        })
    }

    /// Creates an engine with the calculator matching the data set flags and
    /// loads the data set.
    pub fn with_data_set(
        renderer: R,
        data_set: DataSet,
        config: ChartEngineConfig,
    ) -> ChartResult<Self> {
        let calculator = YCalculatorKind::for_data_set(&data_set).build();
        let mut engine = Self::new(renderer, calculator, config)?;
        engine.set_data_set(data_set)?;
        Ok(engine)
    }

    /// Attaches a time legend, seeding it with the loaded timestamps.
    #[must_use]
    pub fn with_time_legend(mut self, legend: impl TimeLegend + 'static) -> Self {
        let mut legend: Box<dyn TimeLegend> = Box::new(legend);
        if let Some(data_set) = self.data.data_set.as_ref() {
            legend.set_timestamps(data_set.timestamps());
            let (from, to) = self.viewport.drawable_index_window();
            legend.update(from, to, &self.viewport);
        }
        self.legends.time = Some(legend);
        self
    }

    /// Attaches a value legend, seeding it with the current Y intervals.
    #[must_use]
    pub fn with_value_legend(mut self, legend: impl ValueLegend + 'static) -> Self {
        let mut legend: Box<dyn ValueLegend> = Box::new(legend);
        if let Some(intervals) = self.data.last_updated_intervals.as_ref() {
            legend.chart_will_transition(intervals, &self.viewport);
        }
        self.legends.value = Some(legend);
        self
    }

    /// Attaches the floating time and value legends configured in `config.legend`.
    #[must_use]
    pub fn with_default_legends(self) -> Self {
        let legend = self.config.legend;
        let fade = self.config.animation.default_duration;
        self.with_time_legend(FloatingTimeLegend::new(legend.min_label_width, fade))
            .with_value_legend(FloatingValueLegend::new(
                legend.value_line_count,
                legend.shows_top_value,
            ))
    }
}
