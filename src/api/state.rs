use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const PERSISTED_UI_STATE_JSON_SCHEMA_V1: u32 = 1;

/// UI state saved across a host lifecycle pause/resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedUiState {
    pub has_data: bool,
    pub series_count: usize,
    pub axis_length: usize,
    pub visibility: Vec<bool>,
    pub selection_start: f64,
    pub selection_end: f64,
}

impl PersistedUiState {
    /// State of a chart that never received data.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            has_data: false,
            series_count: 0,
            axis_length: 0,
            visibility: Vec::new(),
            selection_start: 0.0,
            selection_end: 1.0,
        }
    }

    /// Whether this state was saved for a dataset of the given shape.
    #[must_use]
    pub fn matches(&self, series_count: usize, axis_length: usize) -> bool {
        self.has_data
            && self.series_count == series_count
            && self.axis_length == axis_length
            && self.visibility.len() == series_count
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = PersistedUiStateJsonContractV1 {
            schema_version: PERSISTED_UI_STATE_JSON_SCHEMA_V1,
            state: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize ui state contract v1: {e}"))
        })
    }

    /// Accepts both the bare record and the versioned contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(state) = serde_json::from_str::<PersistedUiState>(input) {
            return Ok(state);
        }
        let payload: PersistedUiStateJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse ui state json payload: {e}"))
        })?;
        if payload.schema_version != PERSISTED_UI_STATE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported ui state schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.state)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedUiStateJsonContractV1 {
    pub schema_version: u32,
    pub state: PersistedUiState,
}
