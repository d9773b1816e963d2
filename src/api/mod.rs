mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod frame_controller;
mod interval_controller;
mod invalidation;
mod selection_controller;

pub use engine::ChartEngine;
pub use engine_config::{AnimationTuning, ChartEngineConfig, LegendConfig};
pub use engine_snapshot::{ChannelSnapshot, ChartSnapshot};
pub use invalidation::{InvalidationTopic, InvalidationTopics};
pub use selection_controller::{ChannelReading, SelectionDetails};
