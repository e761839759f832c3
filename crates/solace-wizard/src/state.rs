use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

/// Navigation and in-flight state for one wizard instance.
///
/// `is_saving_draft` and `is_submitting` are mutually exclusive: only one
/// network operation may be in flight at a time per instance. `current_step`
/// is 1-based and only advances when the current step's schema validates.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct WizardState {
    pub current_step: u32,
    pub is_saving_draft: bool,
    pub is_submitting: bool,
    pub completed: bool,
    /// Dotted field path to user-facing message.
    pub field_errors: BTreeMap<String, String>,
}

impl WizardState {
    pub fn at_step(current_step: u32) -> Self {
        Self {
            current_step,
            is_saving_draft: false,
            is_submitting: false,
            completed: false,
            field_errors: BTreeMap::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.is_saving_draft || self.is_submitting
    }
}
