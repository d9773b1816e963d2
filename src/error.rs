use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("channel `{channel}` has {actual} values, expected {expected}")]
    ChannelLengthMismatch {
        channel: String,
        expected: usize,
        actual: usize,
    },

    #[error("timestamps must be strictly increasing (violated at index {index})")]
    NonMonotonicTimestamps { index: usize },

    #[error("channel index {index} is out of range for {count} channels")]
    ChannelOutOfRange { index: usize, count: usize },

    #[error("axis index {axis} is out of range for {count} axes")]
    AxisOutOfRange { axis: usize, count: usize },

    #[error("expected {expected} axis intervals, got {actual}")]
    AxisCountMismatch { expected: usize, actual: usize },
}
