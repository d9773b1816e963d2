use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionMode {
    #[default]
    Idle,
    Scrubbing,
}

/// Details-selection state driven by scrubbing over the chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionState {
    mode: SelectionMode,
    selected_index: Option<usize>,
    last_x: f64,
}

impl SelectionState {
    #[must_use]
    pub fn mode(self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.mode == SelectionMode::Scrubbing
    }

    #[must_use]
    pub fn selected_index(self) -> Option<usize> {
        self.selected_index
    }

    /// Pixel x of the selected sample when it was last placed.
    #[must_use]
    pub fn last_x(self) -> f64 {
        self.last_x
    }

    /// Records a selection; returns `true` when the selected index changed.
    pub fn on_select(&mut self, index: usize, x: f64) -> bool {
        self.mode = SelectionMode::Scrubbing;
        self.last_x = x;
        let changed = self.selected_index != Some(index);
        self.selected_index = Some(index);
        changed
    }

    pub fn on_end(&mut self) {
        self.mode = SelectionMode::Idle;
        self.selected_index = None;
    }
}
