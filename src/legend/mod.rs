//! Axis legends cross-fading labels while the chart zooms.

mod label_cache;
mod label_format;
mod time_legend;
mod value_legend;

pub use label_cache::LabelCacheStats;
pub use label_format::{abbreviate_value, format_time_label};
pub use time_legend::{
    FloatingTimeLegend, TimeLabel, TimeLegend, TimeLegendFrame, visible_label_indices,
};
pub use value_legend::{AxisGridLines, FloatingValueLegend, GridLine, ValueLegend, ValueLegendFrame};
