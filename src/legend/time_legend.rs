use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::Animator;
use crate::core::Viewport;

use super::label_cache::{LabelCache, LabelCacheStats};
use super::label_format::format_time_label;

/// Alpha under which a fading-out label is dropped.
const FADE_OUT_THRESHOLD: f64 = 0.01;

/// Indices that get a time label at the current zoom.
///
/// Index 0 and the last index are always kept. A span `[a, b]` gets its
/// midpoint when the span covers at least two label widths and both halves
/// cover at least one, then both halves are subdivided the same way. Kept
/// neighbours are therefore never closer than `min_label_width` pixels unless
/// the whole range is narrower than that.
#[must_use]
pub fn visible_label_indices(
    count: usize,
    spacing_x: f64,
    min_label_width: f64,
) -> BTreeSet<usize> {
    let mut indices = BTreeSet::new();
    if count == 0 {
        return indices;
    }
    indices.insert(0);
    indices.insert(count - 1);
    if spacing_x.is_finite() && spacing_x > 0.0 && min_label_width.is_finite() {
        subdivide(0, count - 1, spacing_x, min_label_width.max(0.0), &mut indices);
    }
    indices
}

fn subdivide(
    from: usize,
    to: usize,
    spacing_x: f64,
    min_width: f64,
    indices: &mut BTreeSet<usize>,
) {
    if to - from < 2 {
        return;
    }
    let middle = from + (to - from) / 2;
    let span = (to - from) as f64 * spacing_x;
    let left = (middle - from) as f64 * spacing_x;
    let right = (to - middle) as f64 * spacing_x;
    if span >= min_width * 2.0 && left >= min_width && right >= min_width {
        indices.insert(middle);
        subdivide(from, middle, spacing_x, min_width, indices);
        subdivide(middle, to, spacing_x, min_width, indices);
    }
}

/// One time label as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLabel {
    pub index: usize,
    /// Pixel x of the label center.
    pub x: f64,
    pub alpha: f64,
    pub text: String,
}

/// Labels to draw, ordered by data index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeLegendFrame {
    pub labels: Vec<TimeLabel>,
}

/// Collaborator drawing the time axis under the chart.
pub trait TimeLegend {
    fn set_timestamps(&mut self, timestamps: &[f64]);

    /// Called whenever the visible window changes.
    fn update(&mut self, from_index: usize, to_index: usize, viewport: &Viewport);

    /// Advances fades; returns `true` when the legend needs a redraw.
    fn on_frame(&mut self, timestamp: f64) -> bool;

    fn frame(&self) -> TimeLegendFrame;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegendPhase {
    Uninitialized,
    Ready,
}

/// Time legend cross-fading labels as the zoom level changes.
#[derive(Debug)]
pub struct FloatingTimeLegend {
    min_label_width: f64,
    timestamps: Vec<f64>,
    phase: LegendPhase,
    drawn: BTreeSet<usize>,
    fading_in: BTreeSet<usize>,
    fading_out: BTreeSet<usize>,
    fade_in: Animator<f64>,
    fade_out: Animator<f64>,
    fade_in_alpha: f64,
    fade_out_alpha: f64,
    positions: BTreeMap<usize, f64>,
    labels: LabelCache,
}

impl FloatingTimeLegend {
    #[must_use]
    pub fn new(min_label_width: f64, fade_duration: f64) -> Self {
        Self {
            min_label_width,
            timestamps: Vec::new(),
            phase: LegendPhase::Uninitialized,
            drawn: BTreeSet::new(),
            fading_in: BTreeSet::new(),
            fading_out: BTreeSet::new(),
            fade_in: Animator::new(fade_duration),
            fade_out: Animator::new(fade_duration),
            fade_in_alpha: 1.0,
            fade_out_alpha: 0.0,
            positions: BTreeMap::new(),
            labels: LabelCache::default(),
        }
    }

    #[must_use]
    pub fn drawn_indices(&self) -> &BTreeSet<usize> {
        &self.drawn
    }

    #[must_use]
    pub fn fading_in_indices(&self) -> &BTreeSet<usize> {
        &self.fading_in
    }

    #[must_use]
    pub fn fading_out_indices(&self) -> &BTreeSet<usize> {
        &self.fading_out
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.phase == LegendPhase::Ready
    }

    #[must_use]
    pub fn label_cache_stats(&self) -> LabelCacheStats {
        self.labels.stats()
    }

    fn cache_label(&mut self, index: usize) {
        let Some(&timestamp) = self.timestamps.get(index) else {
            return;
        };
        let _ = self
            .labels
            .get_or_insert_with(index, || format_time_label(timestamp));
    }
}

impl TimeLegend for FloatingTimeLegend {
    fn set_timestamps(&mut self, timestamps: &[f64]) {
        self.timestamps = timestamps.to_vec();
        self.phase = LegendPhase::Uninitialized;
        self.drawn.clear();
        self.fading_in.clear();
        self.fading_out.clear();
        self.fade_in.reset();
        self.fade_out.reset();
        self.positions.clear();
        self.labels.clear();
    }

    fn update(&mut self, from_index: usize, to_index: usize, viewport: &Viewport) {
        let count = self.timestamps.len();
        let width = viewport.size().width;
        if count == 0 || from_index > to_index || !(width > 0.0) {
            return;
        }

        let relative_width = self.min_label_width / width;
        let first = viewport.closest_index(viewport.translate_left() + relative_width);
        let last = viewport.closest_index(viewport.translate_left() - 1.0 - relative_width);
        if first > last {
            return;
        }

        let known: BTreeSet<usize> =
            visible_label_indices(count, viewport.spacing_x(), self.min_label_width)
                .range(first..=last)
                .copied()
                .collect();
        trace!(first, last, labels = known.len(), "time legend window");

        if self.phase == LegendPhase::Uninitialized {
            self.phase = LegendPhase::Ready;
            self.drawn = known.clone();
        }

        let incoming: BTreeSet<usize> = known.difference(&self.drawn).copied().collect();
        if !incoming.is_empty() {
            // Labels still fading in from the previous update snap to opaque.
            self.fading_in = incoming;
            self.fade_in_alpha = self.fade_in.animate(0.0, 1.0).unwrap_or(0.0);
        }

        let outgoing: BTreeSet<usize> = self.drawn.difference(&known).copied().collect();
        if !outgoing.is_empty() {
            self.fading_out = outgoing;
            self.fade_out_alpha = self.fade_out.animate(1.0, 0.0).unwrap_or(1.0);
        }
        self.fading_in.retain(|index| known.contains(index));
        self.fading_out.retain(|index| !known.contains(index));
        self.drawn = known;

        self.positions.clear();
        let on_screen: Vec<usize> = self.drawn.union(&self.fading_out).copied().collect();
        for index in on_screen {
            self.cache_label(index);
            self.positions.insert(index, viewport.x_position(index));
        }
    }

    fn on_frame(&mut self, timestamp: f64) -> bool {
        let mut changed = false;
        if let Some(alpha) = self.fade_in.update(timestamp) {
            self.fade_in_alpha = alpha;
            if alpha >= 1.0 {
                self.fading_in.clear();
            }
            changed = true;
        }
        if let Some(alpha) = self.fade_out.update(timestamp) {
            self.fade_out_alpha = alpha;
            if alpha <= FADE_OUT_THRESHOLD {
                for index in std::mem::take(&mut self.fading_out) {
                    if !self.drawn.contains(&index) {
                        self.positions.remove(&index);
                    }
                }
            }
            changed = true;
        }
        changed
    }

    fn frame(&self) -> TimeLegendFrame {
        let labels = self
            .positions
            .iter()
            .map(|(index, x)| {
                let alpha = if self.fading_in.contains(index) {
                    self.fade_in_alpha
                } else if self.drawn.contains(index) {
                    1.0
                } else {
                    self.fade_out_alpha
                };
                TimeLabel {
                    index: *index,
                    x: *x,
                    alpha,
                    text: self.labels.peek(*index).unwrap_or_default().to_owned(),
                }
            })
            .collect();
        TimeLegendFrame { labels }
    }
}
