mod frame;
mod null_renderer;
mod primitives;

pub use frame::{ChartFrame, TransformMatrix, fraction_to_clip};
pub use null_renderer::NullRenderer;
pub use primitives::Color;

use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// How a backend highlights the selected sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionType {
    /// Circles on every enabled line at the selected sample.
    #[default]
    Point,
    /// Everything but the selected column is dimmed.
    Mask,
    /// Only a vertical rule is drawn.
    None,
}

/// Contract implemented by any drawing backend.
///
/// Vertex data arrives once as baseline-normalized view fractions (`y` from
/// the top); per frame the backend only receives a [`ChartFrame`] with the
/// axis transforms and channel colors, so drawing code stays isolated from
/// zoom and animation logic.
pub trait ChartRenderer {
    fn selection_type(&self) -> SelectionType;

    /// Whether the value axis must include zero, which drops the bottom inset.
    fn starts_from_zero(&self) -> bool {
        false
    }

    fn update_x_values(&mut self, values: &[f32], line_count: usize) -> ChartResult<()>;

    fn update_y_values(&mut self, values: &[Vec<f32>]) -> ChartResult<()>;

    fn update(&mut self, frame: &ChartFrame) -> ChartResult<()>;

    fn render(&mut self) -> ChartResult<()>;
}
