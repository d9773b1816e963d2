pub mod data_set;
pub mod interval;
pub mod normalization;
pub mod primitives;
pub mod types;
pub mod viewport;
pub mod y_calculator;

pub use data_set::{Channel, DataSet, DataSetFlags};
pub use interval::{AxisInterval, Interval};
pub use types::{EdgeInsets, ViewSize};
pub use viewport::{AxisIntervals, AxisValues, MAX_Y_AXES, Viewport};
pub use y_calculator::{
    CommonYCalculator, PercentYCalculator, SeparateYCalculator, SumYCalculator, YCalculator,
    YCalculatorKind,
};
