use tracing::{debug, warn};

use crate::core::SelectionWindow;
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::{ChartEngine, PersistedUiState};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn save_state(&self) -> PersistedUiState {
        let selection = self.gesture.selection();
        PersistedUiState {
            has_data: true,
            series_count: self.dataset.series_count(),
            axis_length: self.dataset.axis_len(),
            visibility: self.visibility.as_slice().to_vec(),
            selection_start: selection.start(),
            selection_end: selection.end(),
        }
    }

    /// Replays a saved state. States saved for a differently shaped dataset
    /// are ignored; returns whether the state was applied.
    pub fn restore_state(&mut self, state: &PersistedUiState) -> ChartResult<bool> {
        let series_count = self.dataset.series_count();
        let axis_length = self.dataset.axis_len();
        if !state.matches(series_count, axis_length) {
            warn!(
                has_data = state.has_data,
                saved_series = state.series_count,
                saved_axis = state.axis_length,
                series_count,
                axis_length,
                "ignoring persisted state for a different dataset"
            );
            return Ok(false);
        }
        let selection = match SelectionWindow::new(state.selection_start, state.selection_end) {
            Ok(selection) => selection,
            Err(err) => {
                warn!(error = %err, "ignoring persisted state with invalid selection");
                return Ok(false);
            }
        };

        for (index, visible) in state.visibility.iter().copied().enumerate() {
            self.set_series_visible(index, visible)?;
        }
        self.set_selection(selection);
        debug!(
            start = selection.start(),
            end = selection.end(),
            "persisted state restored"
        );
        self.emit_plugin_event(ChartEvent::StateRestored);
        Ok(true)
    }

    pub fn save_state_json(&self) -> ChartResult<String> {
        self.save_state().to_json_contract_v1_pretty()
    }

    pub fn restore_state_json(&mut self, input: &str) -> ChartResult<bool> {
        let state = PersistedUiState::from_json_compat_str(input)?;
        self.restore_state(&state)
    }
}
