use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AxisInterval, MAX_Y_AXES, Viewport};

use super::label_format::abbreviate_value;

/// One horizontal gridline with its value label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub value: f64,
    /// Pixel y of the line.
    pub y: f64,
    pub alpha: f64,
    pub label: String,
}

/// Gridlines of one axis: the incoming set and, mid transition, the outgoing one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisGridLines {
    pub axis: usize,
    pub incoming: Vec<GridLine>,
    pub outgoing: Vec<GridLine>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueLegendFrame {
    pub axes: Vec<AxisGridLines>,
}

/// Collaborator drawing value gridlines over the chart.
pub trait ValueLegend {
    /// Called when the Y axes start animating toward `to_intervals`.
    fn chart_will_transition(&mut self, to_intervals: &[AxisInterval], viewport: &Viewport);

    /// Eased progress of the running Y transition of `axis`, in `[0, 1]`.
    fn set_progress(&mut self, axis: usize, progress: f64);

    fn frame(&self) -> ValueLegendFrame;
}

/// Alpha below which a fading line is dropped.
const FADED_ALPHA: f64 = 1e-6;

/// A line gliding from `from_y` to `to_y` as the transition progresses.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FadingLine {
    value: f64,
    from_y: f64,
    to_y: f64,
    from_alpha: f64,
}

impl FadingLine {
    fn settled(value: f64, y: f64) -> Self {
        Self {
            value,
            from_y: y,
            to_y: y,
            from_alpha: 1.0,
        }
    }

    fn y_at(self, progress: f64) -> f64 {
        if progress >= 1.0 {
            return self.to_y;
        }
        self.from_y + (self.to_y - self.from_y) * progress
    }

    fn incoming_alpha_at(self, progress: f64) -> f64 {
        if progress >= 1.0 {
            return 1.0;
        }
        self.from_alpha + (1.0 - self.from_alpha) * progress
    }

    fn outgoing_alpha_at(self, progress: f64) -> f64 {
        self.from_alpha * (1.0 - progress)
    }

    fn is_settled(self) -> bool {
        self.from_y == self.to_y && self.from_alpha == 1.0
    }
}

#[derive(Debug, Clone, Default)]
struct AxisLines {
    /// One per row, fading in toward the row.
    incoming: Vec<FadingLine>,
    outgoing: Vec<FadingLine>,
    progress: f64,
}

impl AxisLines {
    fn adopt(&mut self, values: Vec<f64>, rows: &[f64]) {
        self.incoming = values
            .into_iter()
            .zip(rows)
            .map(|(value, y)| FadingLine::settled(value, *y))
            .collect();
        self.outgoing.clear();
        self.progress = 1.0;
    }
}

/// Value legend with gridlines pinned to fixed pixel rows.
///
/// Rows never move; their values change. On a transition every row whose
/// value changes gets an outgoing line sliding to where its old value lands
/// under the new range, and an incoming line sliding in from where its new
/// value sits under the displayed range. Both follow the Y-interval progress.
/// A transition that interrupts another starts every visible line from its
/// current position and opacity.
#[derive(Debug)]
pub struct FloatingValueLegend {
    line_count: usize,
    shows_top_value: bool,
    rows: Vec<f64>,
    axes: SmallVec<[AxisLines; MAX_Y_AXES]>,
}

impl FloatingValueLegend {
    #[must_use]
    pub fn new(line_count: usize, shows_top_value: bool) -> Self {
        Self {
            line_count,
            shows_top_value,
            rows: Vec::new(),
            axes: SmallVec::new(),
        }
    }

    /// Pixel rows of the gridlines for the current layout.
    #[must_use]
    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    /// Values currently shown on `axis` (the incoming set).
    #[must_use]
    pub fn values(&self, axis: usize) -> Option<Vec<f64>> {
        self.axes
            .get(axis)
            .map(|lines| lines.incoming.iter().map(|line| line.value).collect())
    }

    /// Values fading out on `axis`, including lines carried over from an
    /// interrupted transition.
    #[must_use]
    pub fn outgoing_values(&self, axis: usize) -> Option<Vec<f64>> {
        self.axes
            .get(axis)
            .map(|lines| lines.outgoing.iter().map(|line| line.value).collect())
    }

    fn layout_rows(&self, viewport: &Viewport) -> Vec<f64> {
        let top = viewport.insets().top;
        let step = if self.line_count > 1 {
            viewport.drawable_height() / (self.line_count - 1) as f64
        } else {
            0.0
        };
        let start = if self.shows_top_value { 0 } else { 1 };
        (start..self.line_count)
            .map(|row| top + step * row as f64)
            .collect()
    }
}

impl ValueLegend for FloatingValueLegend {
    fn chart_will_transition(&mut self, to_intervals: &[AxisInterval], viewport: &Viewport) {
        let rows = self.layout_rows(viewport);
        let top = viewport.insets().top;
        let ratios: SmallVec<[f64; MAX_Y_AXES]> = to_intervals
            .iter()
            .enumerate()
            .map(|(axis, interval)| viewport.scale_ratio_for(axis, *interval))
            .collect();
        let to_spacings = viewport.spacing_ys(&ratios);

        if self.axes.len() != to_intervals.len() {
            self.axes.resize_with(to_intervals.len(), AxisLines::default);
        }

        for (axis, interval) in to_intervals.iter().enumerate() {
            let spacing = to_spacings.get(axis).copied().unwrap_or(0.0);
            if interval.is_zero_diff() || !(spacing > 0.0) {
                continue;
            }
            let new_values: Vec<f64> = rows
                .iter()
                .map(|y| interval.max - ((y - top) / spacing).round())
                .collect();

            let lines = &mut self.axes[axis];
            if lines.incoming.len() != new_values.len() {
                lines.adopt(new_values, &rows);
                continue;
            }

            // Lines pick up from where the running transition left them.
            let progress = lines.progress;
            let landing = |value: f64| top + (interval.max - value) * spacing;
            let mut outgoing: Vec<FadingLine> = lines
                .outgoing
                .iter()
                .filter_map(|line| {
                    let alpha = line.outgoing_alpha_at(progress);
                    (alpha > FADED_ALPHA).then(|| FadingLine {
                        value: line.value,
                        from_y: line.y_at(progress),
                        to_y: landing(line.value),
                        from_alpha: alpha,
                    })
                })
                .collect();
            let mut incoming = Vec::with_capacity(rows.len());
            for ((line, value), row_y) in lines.incoming.iter().zip(&new_values).zip(&rows) {
                let y = line.y_at(progress);
                let alpha = line.incoming_alpha_at(progress);
                if line.value == *value {
                    incoming.push(FadingLine {
                        value: *value,
                        from_y: y,
                        to_y: *row_y,
                        from_alpha: alpha,
                    });
                    continue;
                }
                if alpha > FADED_ALPHA {
                    outgoing.push(FadingLine {
                        value: line.value,
                        from_y: y,
                        to_y: landing(line.value),
                        from_alpha: alpha,
                    });
                }
                incoming.push(FadingLine {
                    value: *value,
                    from_y: viewport.y(*value, axis),
                    to_y: *row_y,
                    from_alpha: 0.0,
                });
            }

            let settled = outgoing.is_empty() && incoming.iter().all(|line| line.is_settled());
            lines.incoming = incoming;
            lines.outgoing = outgoing;
            lines.progress = if settled { 1.0 } else { 0.0 };
        }

        self.rows = rows;
    }

    fn set_progress(&mut self, axis: usize, progress: f64) {
        if let Some(lines) = self.axes.get_mut(axis) {
            lines.progress = progress.clamp(0.0, 1.0);
        }
    }

    fn frame(&self) -> ValueLegendFrame {
        let axes = self
            .axes
            .iter()
            .enumerate()
            .map(|(axis, lines)| {
                let progress = lines.progress;
                let incoming = lines
                    .incoming
                    .iter()
                    .map(|line| GridLine {
                        value: line.value,
                        y: line.y_at(progress),
                        alpha: line.incoming_alpha_at(progress),
                        label: abbreviate_value(line.value),
                    })
                    .collect();
                let outgoing = if progress < 1.0 {
                    lines
                        .outgoing
                        .iter()
                        .map(|line| GridLine {
                            value: line.value,
                            y: line.y_at(progress),
                            alpha: line.outgoing_alpha_at(progress),
                            label: abbreviate_value(line.value),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                AxisGridLines {
                    axis,
                    incoming,
                    outgoing,
                }
            })
            .collect();
        ValueLegendFrame { axes }
    }
}
