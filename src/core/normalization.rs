//! Baseline-normalized vertex data.
//!
//! Values are fractions of the view (`y` measured from the top) computed once
//! against the axis baseline. Zoom only changes the transform matrix; these
//! arrays are rebuilt when the baseline or the stacking weights change.

use crate::core::{Channel, Viewport};

/// X fractions `i / (count - 1)`; a single sample sits at 0.
#[must_use]
pub fn normalized_x_values(count: usize) -> Vec<f32> {
    if count < 2 {
        return vec![0.0; count];
    }
    let last = (count - 1) as f64;
    (0..count).map(|index| (index as f64 / last) as f32).collect()
}

/// Y fractions of `values` against the baseline of `axis`.
///
/// A missing baseline (zero diff) yields a flat line on the bottom edge of the
/// drawable area.
#[must_use]
pub fn baseline_y_values(values: &[f64], axis: usize, viewport: &Viewport) -> Vec<f32> {
    let height = viewport.size().height;
    if !(height > 0.0) {
        return vec![0.0; values.len()];
    }
    let axis = axis.min(viewport.axis_count() - 1);
    let top = viewport.insets().top;
    let drawable = viewport.drawable_height();
    let default_diff = viewport.default_diff_ys()[axis];
    let default_max = viewport.default_max_ys()[axis];

    if default_diff == 0.0 {
        let bottom = ((top + drawable) / height) as f32;
        return vec![bottom; values.len()];
    }

    values
        .iter()
        .map(|value| {
            let share = (default_max - value) / default_diff;
            ((top + share * drawable) / height) as f32
        })
        .collect()
}

/// Baseline Y fractions for every channel; channel `i` uses axis `min(i, last)`.
#[must_use]
pub fn channel_baselines(channels: &[Channel], viewport: &Viewport) -> Vec<Vec<f32>> {
    channels
        .iter()
        .enumerate()
        .map(|(index, channel)| baseline_y_values(channel.values(), index, viewport))
        .collect()
}

/// Per-channel share of the weighted total at each timestamp, in percent.
///
/// Timestamps whose weighted total is zero map every channel to 0.
#[must_use]
pub fn percentage_values(channels: &[Channel], weights: &[f64]) -> Vec<Vec<f64>> {
    let len = channels.first().map_or(0, Channel::len);
    let mut sums = vec![0.0; len];
    for (channel, weight) in channels.iter().zip(weights) {
        for (sum, value) in sums.iter_mut().zip(channel.values()) {
            *sum += value * weight;
        }
    }

    channels
        .iter()
        .map(|channel| {
            channel
                .values()
                .iter()
                .zip(&sums)
                .map(|(value, sum)| if *sum == 0.0 { 0.0 } else { value / sum * 100.0 })
                .collect()
        })
        .collect()
}

/// Stacks baseline fractions with per-channel visibility weights.
///
/// The first channel is lifted from the bottom by its weighted height, every
/// following channel on top of the previous one. A weight of 0 collapses a
/// channel onto its predecessor.
#[must_use]
pub fn stack_weighted(baselines: &[Vec<f32>], weights: &[f64]) -> Vec<Vec<f32>> {
    let mut stacked: Vec<Vec<f32>> = Vec::with_capacity(baselines.len());
    for (index, values) in baselines.iter().enumerate() {
        let weight = weights.get(index).copied().unwrap_or(1.0) as f32;
        let level = match stacked.last() {
            None => values.iter().map(|value| 1.0 - (1.0 - value) * weight).collect(),
            Some(previous) => values
                .iter()
                .zip(previous)
                .map(|(value, below)| (value - 1.0) * weight + below)
                .collect(),
        };
        stacked.push(level);
    }
    stacked
}
