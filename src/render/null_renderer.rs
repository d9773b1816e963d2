use crate::error::ChartResult;
use crate::render::{ChartFrame, ChartRenderer, SelectionType};

/// Recording renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid transforms
/// before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub selection_type: SelectionType,
    pub starts_from_zero: bool,
    pub x_values: Vec<f32>,
    pub line_count: usize,
    pub y_values: Vec<Vec<f32>>,
    pub last_frame: Option<ChartFrame>,
    pub x_updates: usize,
    pub y_updates: usize,
    pub frame_updates: usize,
    pub render_count: usize,
}

impl NullRenderer {
    #[must_use]
    pub fn with_selection_type(mut self, selection_type: SelectionType) -> Self {
        self.selection_type = selection_type;
        self
    }

    /// Mimics bar-like backends whose value axis is anchored at zero.
    #[must_use]
    pub fn with_starts_from_zero(mut self, starts_from_zero: bool) -> Self {
        self.starts_from_zero = starts_from_zero;
        self
    }
}

impl ChartRenderer for NullRenderer {
    fn selection_type(&self) -> SelectionType {
        self.selection_type
    }

    fn starts_from_zero(&self) -> bool {
        self.starts_from_zero
    }

    fn update_x_values(&mut self, values: &[f32], line_count: usize) -> ChartResult<()> {
        self.x_values = values.to_vec();
        self.line_count = line_count;
        self.x_updates += 1;
        Ok(())
    }

    fn update_y_values(&mut self, values: &[Vec<f32>]) -> ChartResult<()> {
        self.y_values = values.to_vec();
        self.y_updates += 1;
        Ok(())
    }

    fn update(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_frame = Some(frame.clone());
        self.frame_updates += 1;
        Ok(())
    }

    fn render(&mut self) -> ChartResult<()> {
        self.render_count += 1;
        Ok(())
    }
}
