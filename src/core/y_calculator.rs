use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::core::viewport::{AxisIntervals, MAX_Y_AXES};
use crate::core::{AxisInterval, Channel, DataSet};

/// Strategy computing the visible value range of every Y axis.
///
/// The index window is half-open (`[left_index, right_index)`) and clamped to
/// the channel length. Axes with nothing to measure yield
/// [`AxisInterval::ZERO`].
pub trait YCalculator: fmt::Debug {
    fn axis_count(&self) -> usize;

    fn calculate_y_intervals(
        &mut self,
        channels: &[Channel],
        disabled: &BTreeSet<usize>,
        left_index: usize,
        right_index: usize,
    ) -> AxisIntervals;

    /// Drops cached derived data; called when a new data set is loaded.
    fn invalidate(&mut self) {}
}

/// Selects a calculator for a data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YCalculatorKind {
    Common,
    Separate,
    Sum,
    Percent,
}

impl YCalculatorKind {
    #[must_use]
    pub fn for_data_set(data_set: &DataSet) -> Self {
        if data_set.is_percentage() {
            Self::Percent
        } else if data_set.is_stacked() {
            Self::Sum
        } else if data_set.is_y_scaled() {
            Self::Separate
        } else {
            Self::Common
        }
    }

    #[must_use]
    pub fn build(self) -> Box<dyn YCalculator> {
        match self {
            Self::Common => Box::new(CommonYCalculator),
            Self::Separate => Box::new(SeparateYCalculator::default()),
            Self::Sum => Box::new(SumYCalculator::default()),
            Self::Percent => Box::new(PercentYCalculator),
        }
    }
}

/// One shared axis spanning every enabled channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonYCalculator;

impl YCalculator for CommonYCalculator {
    fn axis_count(&self) -> usize {
        1
    }

    fn calculate_y_intervals(
        &mut self,
        channels: &[Channel],
        disabled: &BTreeSet<usize>,
        left_index: usize,
        right_index: usize,
    ) -> AxisIntervals {
        let envelope = channels
            .iter()
            .enumerate()
            .filter(|(index, _)| !disabled.contains(index))
            .filter_map(|(_, channel)| value_envelope(channel.values(), left_index, right_index))
            .reduce(merge_envelopes);

        smallvec![envelope.map_or(AxisInterval::ZERO, into_axis_interval)]
    }
}

/// Independent axes, one per channel, bounded to two.
#[derive(Debug, Clone, Copy)]
pub struct SeparateYCalculator {
    axis_count: usize,
}

impl SeparateYCalculator {
    /// Builds a calculator with `axis_count` axes (clamped to `1..=2`).
    #[must_use]
    pub fn new(axis_count: usize) -> Self {
        Self {
            axis_count: axis_count.clamp(1, MAX_Y_AXES),
        }
    }
}

impl Default for SeparateYCalculator {
    fn default() -> Self {
        Self::new(MAX_Y_AXES)
    }
}

impl YCalculator for SeparateYCalculator {
    fn axis_count(&self) -> usize {
        self.axis_count
    }

    fn calculate_y_intervals(
        &mut self,
        channels: &[Channel],
        disabled: &BTreeSet<usize>,
        left_index: usize,
        right_index: usize,
    ) -> AxisIntervals {
        let mut envelopes: SmallVec<[Option<(f64, f64)>; MAX_Y_AXES]> =
            smallvec![None; self.axis_count];

        for (index, channel) in channels.iter().enumerate() {
            if disabled.contains(&index) {
                continue;
            }
            let axis = index.min(self.axis_count - 1);
            if let Some(envelope) = value_envelope(channel.values(), left_index, right_index) {
                envelopes[axis] = Some(match envelopes[axis] {
                    Some(current) => merge_envelopes(current, envelope),
                    None => envelope,
                });
            }
        }

        envelopes
            .into_iter()
            .map(|envelope| envelope.map_or(AxisInterval::ZERO, into_axis_interval))
            .collect()
    }
}

/// Stacked composition: `{0, max total}` over the window.
///
/// Totals come from a running-stack pass over enabled channels. The pass is
/// cached and recomputed only when the disabled set changes or after
/// [`YCalculator::invalidate`].
#[derive(Debug, Clone, Default)]
pub struct SumYCalculator {
    stack: Option<CachedStack>,
}

#[derive(Debug, Clone)]
struct CachedStack {
    disabled: BTreeSet<usize>,
    totals: Vec<f64>,
}

impl SumYCalculator {
    /// Whether the cached stack was built for exactly `disabled`.
    #[must_use]
    pub fn is_cached_for(&self, disabled: &BTreeSet<usize>) -> bool {
        self.stack
            .as_ref()
            .is_some_and(|stack| stack.disabled == *disabled)
    }

    fn totals(&mut self, channels: &[Channel], disabled: &BTreeSet<usize>) -> &[f64] {
        if !self.is_cached_for(disabled) {
            trace!(disabled = disabled.len(), "recomputing stacked totals");
            self.stack = Some(CachedStack {
                disabled: disabled.clone(),
                totals: stacked_totals(channels, disabled),
            });
        }
        self.stack.as_ref().map_or(&[][..], |stack| stack.totals.as_slice())
    }
}

impl YCalculator for SumYCalculator {
    fn axis_count(&self) -> usize {
        1
    }

    fn calculate_y_intervals(
        &mut self,
        channels: &[Channel],
        disabled: &BTreeSet<usize>,
        left_index: usize,
        right_index: usize,
    ) -> AxisIntervals {
        let enabled = (0..channels.len()).any(|index| !disabled.contains(&index));
        if !enabled {
            return smallvec![AxisInterval::ZERO];
        }

        let totals = self.totals(channels, disabled);
        let Some(window) = clamp_window(totals.len(), left_index, right_index) else {
            return smallvec![AxisInterval::ZERO];
        };
        let max = totals[window].iter().copied().fold(f64::NEG_INFINITY, f64::max);

        smallvec![into_axis_interval((0.0, max))]
    }

    fn invalidate(&mut self) {
        self.stack = None;
    }
}

/// Percent composition always spans `{0, 100}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentYCalculator;

impl YCalculator for PercentYCalculator {
    fn axis_count(&self) -> usize {
        1
    }

    fn calculate_y_intervals(
        &mut self,
        _channels: &[Channel],
        _disabled: &BTreeSet<usize>,
        _left_index: usize,
        _right_index: usize,
    ) -> AxisIntervals {
        smallvec![AxisInterval { min: 0.0, max: 100.0 }]
    }
}

/// Per-timestamp running stack over enabled channels; the last level is the total.
#[must_use]
pub fn stacked_totals(channels: &[Channel], disabled: &BTreeSet<usize>) -> Vec<f64> {
    let len = channels.first().map_or(0, Channel::len);
    let mut totals = vec![0.0; len];
    for (index, channel) in channels.iter().enumerate() {
        if disabled.contains(&index) {
            continue;
        }
        for (total, value) in totals.iter_mut().zip(channel.values()) {
            *total += value;
        }
    }
    totals
}

fn clamp_window(len: usize, left_index: usize, right_index: usize) -> Option<std::ops::Range<usize>> {
    let right = right_index.min(len);
    (left_index < right).then_some(left_index..right)
}

fn value_envelope(values: &[f64], left_index: usize, right_index: usize) -> Option<(f64, f64)> {
    let window = clamp_window(values.len(), left_index, right_index)?;
    values[window].iter().fold(None, |acc, value| {
        Some(match acc {
            Some((min, max)) => (f64::min(min, *value), f64::max(max, *value)),
            None => (*value, *value),
        })
    })
}

fn merge_envelopes(left: (f64, f64), right: (f64, f64)) -> (f64, f64) {
    (left.0.min(right.0), left.1.max(right.1))
}

fn into_axis_interval((min, max): (f64, f64)) -> AxisInterval {
    if min < max {
        AxisInterval { min, max }
    } else {
        AxisInterval::ZERO
    }
}
