use smallvec::{SmallVec, smallvec};

use crate::core::{AxisInterval, EdgeInsets, Interval, ViewSize};
use crate::error::{ChartError, ChartResult};
use crate::render::TransformMatrix;

/// Upper bound of independently scaled Y axes.
pub const MAX_Y_AXES: usize = 2;

pub type AxisValues = SmallVec<[f64; MAX_Y_AXES]>;
pub type AxisIntervals = SmallVec<[AxisInterval; MAX_Y_AXES]>;

/// Mapping between the visible data window and normalized draw space.
///
/// X is expressed as a fraction of the full index range (`[0, 1]`); every
/// change of `interval_x` re-derives scale, translation and the visible index
/// window. Y axes are scaled relative to a baseline captured once per zoom
/// session, so already normalized vertex positions stay valid and only the
/// per-axis transform changes while the visible value range animates.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    size: ViewSize,
    insets: EdgeInsets,
    rel_offset_left: f64,
    rel_offset_right: f64,
    rel_offset_top: f64,
    rel_offset_bottom: f64,
    interval_x: Interval<f64>,
    interval_ys: AxisIntervals,
    default_diff_ys: AxisValues,
    default_max_ys: AxisValues,
    scale_x: f64,
    scale_ys: AxisValues,
    spacing_x: f64,
    default_spacing_x: f64,
    spacing_ys: AxisValues,
    default_spacing_ys: AxisValues,
    translate_left: f64,
    translate_right: f64,
    timestamps_count: usize,
    last_left_index: usize,
    last_right_index: usize,
    axis_count: usize,
}

impl Viewport {
    pub fn new(axis_count: usize, insets: EdgeInsets) -> ChartResult<Self> {
        if axis_count == 0 || axis_count > MAX_Y_AXES {
            return Err(ChartError::InvalidData(format!(
                "viewport supports 1..={MAX_Y_AXES} y axes, got {axis_count}"
            )));
        }
        let insets = insets.validate()?;

        Ok(Self {
            size: ViewSize::default(),
            insets,
            rel_offset_left: 0.0,
            rel_offset_right: 0.0,
            rel_offset_top: 0.0,
            rel_offset_bottom: 0.0,
            interval_x: Interval::UNIT,
            interval_ys: smallvec![AxisInterval::ZERO; axis_count],
            default_diff_ys: smallvec![0.0; axis_count],
            default_max_ys: smallvec![0.0; axis_count],
            scale_x: 1.0,
            scale_ys: smallvec![1.0; axis_count],
            spacing_x: 0.0,
            default_spacing_x: 0.0,
            spacing_ys: smallvec![0.0; axis_count],
            default_spacing_ys: smallvec![0.0; axis_count],
            translate_left: 0.0,
            translate_right: 0.0,
            timestamps_count: 0,
            last_left_index: 0,
            last_right_index: 0,
            axis_count,
        })
    }

    pub fn set_size(&mut self, size: ViewSize) -> ChartResult<()> {
        let size = size.validate()?;
        validate_insets_fit(self.insets, size)?;
        self.size = size;
        self.refresh_layout();
        Ok(())
    }

    pub fn set_insets(&mut self, insets: EdgeInsets) -> ChartResult<()> {
        let insets = insets.validate()?;
        if self.size.is_valid() {
            validate_insets_fit(insets, self.size)?;
        }
        self.insets = insets;
        self.refresh_layout();
        Ok(())
    }

    /// Sets the visible X window as a fraction of the full index range.
    pub fn set_interval_x(&mut self, interval: Interval<f64>) -> ChartResult<()> {
        if !interval.is_finite() || interval.max <= interval.min {
            return Err(ChartError::InvalidData(
                "x interval must be finite with min < max".to_owned(),
            ));
        }
        self.interval_x = interval;
        self.update_scale_x();
        Ok(())
    }

    pub fn set_interval_ys(&mut self, intervals: &[AxisInterval]) -> ChartResult<()> {
        self.check_axis_count(intervals.len())?;
        self.interval_ys = intervals.iter().copied().collect();
        self.update_scale_ys();
        Ok(())
    }

    pub fn set_interval_y(&mut self, axis: usize, interval: AxisInterval) -> ChartResult<()> {
        self.check_axis(axis)?;
        self.interval_ys[axis] = interval;
        self.update_scale_ys();
        Ok(())
    }

    /// Derives the unzoomed X spacing from the number of timestamps.
    pub fn update_default_x_scales(&mut self, timestamps_count: usize) {
        self.timestamps_count = timestamps_count;
        self.default_spacing_x = if timestamps_count > 1 {
            self.size.width / (timestamps_count - 1) as f64
        } else {
            0.0
        };
        self.update_scale_x();
    }

    /// Captures the baseline of every axis and displays `intervals`.
    pub fn update_default_y_scales(&mut self, intervals: &[AxisInterval]) -> ChartResult<()> {
        self.check_axis_count(intervals.len())?;
        for (axis, interval) in intervals.iter().copied().enumerate() {
            self.capture_baseline(axis, interval);
        }
        self.interval_ys = intervals.iter().copied().collect();
        self.update_scale_ys();
        Ok(())
    }

    /// Captures the baseline of one axis, starting a new zoom session for it.
    pub fn establish_baseline(&mut self, axis: usize, interval: AxisInterval) -> ChartResult<()> {
        self.check_axis(axis)?;
        self.capture_baseline(axis, interval);
        self.interval_ys[axis] = interval;
        self.update_scale_ys();
        Ok(())
    }

    /// Drops every baseline; the next established range starts a new session.
    pub fn reset_baselines(&mut self) {
        for axis in 0..self.axis_count {
            self.default_diff_ys[axis] = 0.0;
            self.default_max_ys[axis] = 0.0;
            self.default_spacing_ys[axis] = 0.0;
            self.scale_ys[axis] = 1.0;
            self.spacing_ys[axis] = 0.0;
            self.interval_ys[axis] = AxisInterval::ZERO;
        }
    }

    #[must_use]
    pub fn is_baseline_established(&self, axis: usize) -> bool {
        self.default_diff_ys.get(axis).is_some_and(|diff| *diff != 0.0)
    }

    /// Index of the sample closest to a normalized translation.
    ///
    /// `translate_left() - x / width` addresses the sample under pixel `x`.
    /// The result is clamped to `[0, count - 1]`; degenerate state yields 0.
    #[must_use]
    pub fn closest_index(&self, translate: f64) -> usize {
        if self.timestamps_count == 0 || !self.spacing_x.is_finite() || self.spacing_x <= 0.0 {
            return 0;
        }
        let raw = (-translate * self.size.width / self.spacing_x).round();
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        let last = self.timestamps_count - 1;
        if raw >= last as f64 { last } else { raw as usize }
    }

    /// Pixel Y of `value` on `axis`; axes past the last one reuse the last.
    #[must_use]
    pub fn y(&self, value: f64, axis: usize) -> f64 {
        let axis = axis.min(self.axis_count - 1);
        self.insets.top + (self.interval_ys[axis].max - value) * self.spacing_ys[axis]
    }

    /// Pixels per value unit for hypothetical per-axis scale ratios.
    #[must_use]
    pub fn spacing_ys(&self, scale_ratios: &[f64]) -> AxisValues {
        (0..self.axis_count)
            .map(|axis| self.default_spacing_ys[axis] * scale_ratios.get(axis).copied().unwrap_or(1.0))
            .collect()
    }

    /// Scale ratio that `interval` would have against the axis baseline.
    #[must_use]
    pub fn scale_ratio_for(&self, axis: usize, interval: AxisInterval) -> f64 {
        let axis = axis.min(self.axis_count - 1);
        let default_diff = self.default_diff_ys[axis];
        if default_diff == 0.0 || interval.is_zero_diff() {
            return self.scale_ys[axis];
        }
        default_diff / interval.diff()
    }

    /// Pixel X of the sample at `index` under the current zoom.
    #[must_use]
    pub fn x_position(&self, index: usize) -> f64 {
        self.spacing_x * index as f64 + self.translate_left * self.size.width
    }

    /// Clip-space transform re-mapping baseline-normalized vertices of `axis`.
    #[must_use]
    pub fn transform_matrix(&self, axis: usize) -> TransformMatrix {
        let axis = axis.min(self.axis_count - 1);
        let scale_x = self.scale_x;
        let translate_x = self.translate_left + self.translate_right;

        let default_diff = self.default_diff_ys[axis];
        if default_diff == 0.0 {
            return TransformMatrix::scale_translate(scale_x, 1.0, translate_x, 0.0);
        }

        let top = self.rel_offset_top * 2.0;
        let bottom = self.rel_offset_bottom * 2.0;
        let scale_y = self.scale_ys[axis];
        let old_location = 1.0
            - top
            - ((self.default_max_ys[axis] - self.interval_ys[axis].max) / default_diff)
                * (2.0 - top - bottom);
        let translate_y = (1.0 - top) - old_location * scale_y;

        TransformMatrix::scale_translate(scale_x, scale_y, translate_x, translate_y)
    }

    /// Inclusive sample window covering the full view width.
    #[must_use]
    pub fn visible_index_window(&self) -> (usize, usize) {
        (self.last_left_index, self.last_right_index)
    }

    /// Inclusive sample window covering the drawable area (insets excluded).
    #[must_use]
    pub fn drawable_index_window(&self) -> (usize, usize) {
        let left = self.translate_left - self.rel_offset_left;
        let drawable = 1.0 - self.rel_offset_right - self.rel_offset_left;
        (self.closest_index(left), self.closest_index(left - drawable))
    }

    #[must_use]
    pub fn size(&self) -> ViewSize {
        self.size
    }

    #[must_use]
    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }

    /// Drawable height in pixels (view height minus vertical insets).
    #[must_use]
    pub fn drawable_height(&self) -> f64 {
        self.size.height - self.insets.top - self.insets.bottom
    }

    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.axis_count
    }

    #[must_use]
    pub fn timestamps_count(&self) -> usize {
        self.timestamps_count
    }

    #[must_use]
    pub fn interval_x(&self) -> Interval<f64> {
        self.interval_x
    }

    #[must_use]
    pub fn interval_ys(&self) -> &[AxisInterval] {
        &self.interval_ys
    }

    #[must_use]
    pub fn default_diff_ys(&self) -> &[f64] {
        &self.default_diff_ys
    }

    #[must_use]
    pub fn default_max_ys(&self) -> &[f64] {
        &self.default_max_ys
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    #[must_use]
    pub fn scale_ys(&self) -> &[f64] {
        &self.scale_ys
    }

    #[must_use]
    pub fn spacing_x(&self) -> f64 {
        self.spacing_x
    }

    #[must_use]
    pub fn current_spacing_ys(&self) -> &[f64] {
        &self.spacing_ys
    }

    #[must_use]
    pub fn translate_left(&self) -> f64 {
        self.translate_left
    }

    #[must_use]
    pub fn translate_right(&self) -> f64 {
        self.translate_right
    }

    #[must_use]
    pub fn rel_offset_left(&self) -> f64 {
        self.rel_offset_left
    }

    #[must_use]
    pub fn rel_offset_right(&self) -> f64 {
        self.rel_offset_right
    }

    #[must_use]
    pub fn rel_offset_top(&self) -> f64 {
        self.rel_offset_top
    }

    #[must_use]
    pub fn rel_offset_bottom(&self) -> f64 {
        self.rel_offset_bottom
    }

    fn refresh_layout(&mut self) {
        if self.size.is_valid() {
            self.rel_offset_left = self.insets.left / self.size.width;
            self.rel_offset_right = self.insets.right / self.size.width;
            self.rel_offset_top = self.insets.top / self.size.height;
            self.rel_offset_bottom = self.insets.bottom / self.size.height;
        }
        for axis in 0..self.axis_count {
            let diff = self.default_diff_ys[axis];
            self.default_spacing_ys[axis] = if diff != 0.0 {
                self.drawable_height() / diff
            } else {
                0.0
            };
        }
        // Re-derives default spacing for the new width.
        self.update_default_x_scales(self.timestamps_count);
        self.update_scale_ys();
    }

    fn capture_baseline(&mut self, axis: usize, interval: AxisInterval) {
        if interval.is_zero_diff() {
            self.default_diff_ys[axis] = 0.0;
            self.default_max_ys[axis] = 0.0;
            self.default_spacing_ys[axis] = 0.0;
            return;
        }
        self.default_diff_ys[axis] = interval.diff();
        self.default_max_ys[axis] = interval.max;
        self.default_spacing_ys[axis] = self.drawable_height() / interval.diff();
    }

    fn update_scale_x(&mut self) {
        let scale_x = (1.0 - self.rel_offset_left - self.rel_offset_right)
            / (self.interval_x.max - self.interval_x.min);
        self.translate_left = -scale_x * self.interval_x.min + self.rel_offset_left;
        self.translate_right = scale_x * (1.0 - self.interval_x.max) - self.rel_offset_right;
        self.scale_x = scale_x;
        self.spacing_x = self.default_spacing_x * scale_x;
        self.last_left_index = self.closest_index(self.translate_left);
        self.last_right_index = self.closest_index(self.translate_left - 1.0);
    }

    fn update_scale_ys(&mut self) {
        for axis in 0..self.axis_count {
            let default_diff = self.default_diff_ys[axis];
            let interval = self.interval_ys[axis];
            if default_diff != 0.0 && !interval.is_zero_diff() {
                self.scale_ys[axis] = default_diff / interval.diff();
            }
            self.spacing_ys[axis] = self.default_spacing_ys[axis] * self.scale_ys[axis];
        }
    }

    fn check_axis(&self, axis: usize) -> ChartResult<()> {
        if axis >= self.axis_count {
            return Err(ChartError::AxisOutOfRange {
                axis,
                count: self.axis_count,
            });
        }
        Ok(())
    }

    fn check_axis_count(&self, actual: usize) -> ChartResult<()> {
        if actual != self.axis_count {
            return Err(ChartError::AxisCountMismatch {
                expected: self.axis_count,
                actual,
            });
        }
        Ok(())
    }
}

fn validate_insets_fit(insets: EdgeInsets, size: ViewSize) -> ChartResult<()> {
    if insets.left + insets.right >= size.width || insets.top + insets.bottom >= size.height {
        return Err(ChartError::InvalidData(
            "insets must leave a non-empty drawable area".to_owned(),
        ));
    }
    Ok(())
}
