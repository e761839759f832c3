//! solace-wizard
//!
//! The multi-step form wizard engine. One generic engine drives every form
//! in the system (ASAM, intake, PHQ-9): it owns the form state, validates
//! the current step before permitting forward navigation, and persists
//! drafts and final submissions through the gateway. Backward navigation is
//! never validated, and a failed save never discards the user's edits.

pub mod engine;
pub mod error;
pub mod progress;
pub mod state;

pub use engine::{Advance, InitialData, SaveOutcome, StepFields, SubmitOutcome, WizardEngine};
pub use error::WizardError;
pub use progress::Progress;
pub use state::WizardState;
