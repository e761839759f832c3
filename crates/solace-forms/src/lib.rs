//! solace-forms
//!
//! The step schema registry: declarative per-step validation contracts for
//! each multi-step clinical form, plus one combined full-form contract for
//! final submission. Pure data and validation logic — no UI, no I/O.

pub mod error;
pub mod forms;
pub mod schema;
pub mod severity;
pub mod validate;

use solace_core::fields::FormState;

use schema::{FieldRule, StepSchema};

/// Trait implemented by each registered multi-step form.
pub trait FormDefinition: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this form (e.g., "asam", "intake").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "ASAM Assessment").
    fn name(&self) -> &str;

    /// Collection path segment at the persistence gateway.
    fn collection(&self) -> &str;

    /// Singular record key, used when the gateway nests the created id
    /// (e.g., `{ "intake": { "id": ... } }`).
    fn record_key(&self) -> &str;

    /// The ordered per-step schemas.
    fn steps(&self) -> &[StepSchema];

    /// Rules that only matter at final submission (e.g., signature fields on
    /// the last step). Most forms have none.
    fn submit_rules(&self) -> &[FieldRule] {
        &[]
    }

    /// Default field values for a fresh form.
    fn defaults(&self) -> FormState;

    fn total_steps(&self) -> u32 {
        self.steps().len() as u32
    }

    /// The schema for a 1-based step index.
    fn step_schema(&self, step: u32) -> Option<&StepSchema> {
        (step >= 1).then(|| self.steps().get(step as usize - 1)).flatten()
    }

    fn step_labels(&self) -> Vec<&str> {
        self.steps().iter().map(|s| s.label.as_str()).collect()
    }

    /// The combined full-form schema: the logical AND of every step's rules
    /// plus the submit-only rules. Every field validated at the step level is
    /// therefore also validated at final-submit time, by construction.
    fn submit_schema(&self) -> Vec<FieldRule> {
        self.steps()
            .iter()
            .flat_map(|s| s.rules.iter().cloned())
            .chain(self.submit_rules().iter().cloned())
            .collect()
    }
}

impl<T: FormDefinition + ?Sized> FormDefinition for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn collection(&self) -> &str {
        (**self).collection()
    }

    fn record_key(&self) -> &str {
        (**self).record_key()
    }

    fn steps(&self) -> &[StepSchema] {
        (**self).steps()
    }

    fn submit_rules(&self) -> &[FieldRule] {
        (**self).submit_rules()
    }

    fn defaults(&self) -> FormState {
        (**self).defaults()
    }
}

/// Return all registered forms.
pub fn all_forms() -> Vec<Box<dyn FormDefinition>> {
    vec![
        Box::new(forms::asam::Asam),
        Box::new(forms::intake::Intake),
        Box::new(forms::phq9::Phq9),
    ]
}

/// Look up a form by ID.
pub fn get_form(id: &str) -> Option<Box<dyn FormDefinition>> {
    all_forms().into_iter().find(|f| f.id() == id)
}

/// Look up a form by ID, failing with [`FormError::UnknownForm`] for ids the
/// registry does not know. For callers resolving an id from a route or a
/// persisted record rather than a compile-time constant.
pub fn require_form(id: &str) -> Result<Box<dyn FormDefinition>, error::FormError> {
    get_form(id).ok_or_else(|| error::FormError::UnknownForm(id.to_string()))
}
