//! zoom-chart: viewport, auto-scaling and animation core for zoomable time charts.
//!
//! The crate decides what a drawing backend receives each frame: baseline
//! normalized vertex data uploaded once, and per-axis transforms plus channel
//! colors that follow pan/zoom and visibility animations.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod legend;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
