use serde::Serialize;
use ts_rs::TS;

/// Stateless progress readout for the step indicator, derived entirely from
/// engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Progress {
    pub current_step: u32,
    pub total_steps: u32,
    pub label: String,
    /// Whole-number percent of steps reached, `current / total`.
    pub percent: u8,
}

impl Progress {
    pub fn new(current_step: u32, total_steps: u32, label: impl Into<String>) -> Self {
        let percent = if total_steps == 0 {
            0
        } else {
            (current_step * 100 / total_steps).min(100) as u8
        };
        Self {
            current_step,
            total_steps,
            label: label.into(),
            percent,
        }
    }
}
