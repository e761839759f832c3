//! The wizard engine itself.
//!
//! One engine instance corresponds to one user editing one record in one
//! session. The engine owns the [`FormState`] exclusively and hands step
//! renderers a narrow [`StepFields`] capability instead of ambient shared
//! state; there is no concurrent writer, so no locking.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::{info, warn};

use solace_core::fields::{FieldPath, FormState};
use solace_forms::FormDefinition;
use solace_forms::error::FormError;
use solace_forms::schema::FieldRule;
use solace_forms::validate::evaluate;
use solace_gateway::{DraftGateway, SaveBody};

use crate::error::WizardError;
use crate::progress::Progress;
use crate::state::WizardState;

/// A previously saved record being resumed, as loaded from the gateway.
#[derive(Debug, Clone, Default)]
pub struct InitialData {
    /// Saved field values, keyed by dotted path.
    pub fields: Map<String, Value>,
    /// The step the draft was saved on, if any.
    pub draft_step: Option<u32>,
    /// The record's identifier, so subsequent saves are updates.
    pub record_id: Option<String>,
}

impl InitialData {
    /// Split a raw persisted record into field values and bookkeeping.
    ///
    /// `id`, `isDraft`, and `currentStep` are bookkeeping, not form fields;
    /// everything else is carried into the form state as-is.
    pub fn from_wire(mut record: Map<String, Value>) -> Self {
        let record_id = match record.remove("id") {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        let draft_step = record
            .remove("currentStep")
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok());
        record.remove("isDraft");
        Self {
            fields: record,
            draft_step,
            record_id,
        }
    }
}

/// Result of an [`WizardEngine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The step validated and the wizard moved forward; the UI scrolls to
    /// the top of the new step.
    Moved,
    /// Validation failed; `field_errors` holds the reasons and the step is
    /// unchanged.
    Blocked,
    /// Already on the last step. The step still validated; the UI replaces
    /// "Next" with "Submit" here.
    AtLastStep,
}

/// Result of a successful [`WizardEngine::save_draft`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save of a new record; the engine has adopted the returned id
    /// and the UI should move navigation to the record's edit context.
    Created { id: String },
    Updated,
}

/// Result of a [`WizardEngine::submit`] call that reached a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was finalized server-side; this wizard is done.
    Completed { record_id: String },
    /// Full-form validation failed; no network call was made. The failing
    /// fields may live on steps other than the visible one, so the owning
    /// step numbers are reported for the UI to badge.
    Rejected { steps_with_errors: Vec<u32> },
}

/// Narrow read/write access to the form state, handed to the step renderer
/// for the current step.
pub struct StepFields<'a> {
    state: &'a mut FormState,
}

impl StepFields<'_> {
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        self.state.get(path)
    }

    pub fn set(&mut self, path: &FieldPath, value: impl Into<Value>) {
        self.state.set(path, value.into());
    }

    pub fn clear(&mut self, path: &FieldPath) {
        self.state.remove(path);
    }

    /// Entries currently present in a repeated group.
    pub fn group_len(&self, group: &str) -> usize {
        self.state.group_len(group)
    }
}

/// The multi-step form wizard engine, generic over a form definition and a
/// persistence gateway.
pub struct WizardEngine<F: FormDefinition, G: DraftGateway> {
    form: F,
    gateway: G,
    state: FormState,
    wizard: WizardState,
    record_id: Option<String>,
}

impl<F: FormDefinition, G: DraftGateway> WizardEngine<F, G> {
    /// Build a wizard from the form's defaults, optionally resuming a saved
    /// record.
    ///
    /// Present keys in `initial` override defaults field-by-field, with date
    /// fields normalized to `YYYY-MM-DD`. The starting step comes from the
    /// draft's saved step when it is within `[1, total_steps]`, else 1.
    /// Never fails: a missing or malformed initial field just falls back to
    /// its default, because the record may predate the current shape of the
    /// form.
    pub fn new(form: F, gateway: G, initial: Option<InitialData>) -> Self {
        let mut state = form.defaults();
        let mut current_step = 1;
        let mut record_id = None;

        if let Some(initial) = initial {
            let date_fields = date_field_paths(&form);
            state.merge_initial(&initial.fields, |key| date_fields.contains(key));
            if let Some(step) = initial.draft_step
                && (1..=form.total_steps()).contains(&step)
            {
                current_step = step;
            }
            record_id = initial.record_id;
        }

        Self {
            form,
            gateway,
            state,
            wizard: WizardState::at_step(current_step),
            record_id,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_state(&self) -> &FormState {
        &self.state
    }

    pub fn wizard_state(&self) -> &WizardState {
        &self.wizard
    }

    pub fn current_step(&self) -> u32 {
        self.wizard.current_step
    }

    pub fn total_steps(&self) -> u32 {
        self.form.total_steps()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn field_errors(&self) -> &std::collections::BTreeMap<String, String> {
        &self.wizard.field_errors
    }

    /// Read/write access for the step renderer.
    pub fn fields(&mut self) -> StepFields<'_> {
        StepFields {
            state: &mut self.state,
        }
    }

    /// Progress readout for the step indicator.
    pub fn progress(&self) -> Progress {
        let label = self
            .form
            .step_schema(self.wizard.current_step)
            .map(|s| s.label.clone())
            .unwrap_or_default();
        Progress::new(self.wizard.current_step, self.form.total_steps(), label)
    }

    /// Validate one step's slice of the form state.
    ///
    /// Async so schemas with suspending refinements fit the same call shape;
    /// the built-in constraints evaluate in-process. Validation failure is
    /// `Ok(false)` with `field_errors` populated for that step; `Err` is
    /// reserved for schema-evaluation faults and leaves the form state and
    /// existing errors untouched.
    pub async fn validate_step(&mut self, step: u32) -> Result<bool, WizardError> {
        let Some(schema) = self.form.step_schema(step) else {
            return Err(FormError::StepOutOfRange {
                form: self.form.id().to_string(),
                step,
                total: self.form.total_steps(),
            }
            .into());
        };

        let errors = evaluate(&schema.rules, &self.state)?;
        let rules = schema.rules.clone();

        // Clear only this step's prior errors; other steps keep theirs.
        self.wizard
            .field_errors
            .retain(|path, _| !rules.iter().any(|r| r.covers(path)));
        let passed = errors.is_empty();
        for error in errors {
            self.wizard.field_errors.insert(error.path, error.message);
        }
        Ok(passed)
    }

    /// Validate the current step and move forward if it passes.
    pub async fn advance(&mut self) -> Result<Advance, WizardError> {
        let step = self.wizard.current_step;
        if !self.validate_step(step).await? {
            return Ok(Advance::Blocked);
        }
        if step >= self.form.total_steps() {
            return Ok(Advance::AtLastStep);
        }
        self.wizard.current_step = step + 1;
        Ok(Advance::Moved)
    }

    /// Move back one step. Never validates; existing errors stay until their
    /// step next validates cleanly. Returns false when already at step 1.
    pub fn retreat(&mut self) -> bool {
        if self.wizard.current_step > 1 {
            self.wizard.current_step -= 1;
            true
        } else {
            false
        }
    }

    /// Persist the whole form as a draft, creating the record on first save.
    ///
    /// Suspends for the network round-trip; a second save or submit while
    /// one is in flight is refused. On failure the form state is preserved
    /// unchanged: a failed save never discards in-progress edits.
    pub async fn save_draft(&mut self) -> Result<SaveOutcome, WizardError> {
        // `&mut self` already serializes callers; this refusal backs the
        // flag invariant for any future shared-mutability wrapper.
        if self.wizard.is_busy() {
            return Err(WizardError::OperationInFlight);
        }
        self.wizard.is_saving_draft = true;

        let body = SaveBody::draft(self.state.to_wire(), self.wizard.current_step);
        let result = match &self.record_id {
            Some(id) => self
                .gateway
                .update(self.form.collection(), id, &body)
                .await
                .map(|()| SaveOutcome::Updated),
            None => self
                .gateway
                .create(self.form.collection(), self.form.record_key(), &body)
                .await
                .map(|id| SaveOutcome::Created { id }),
        };

        self.wizard.is_saving_draft = false;
        match result {
            Ok(outcome) => {
                if let SaveOutcome::Created { id } = &outcome {
                    self.record_id = Some(id.clone());
                }
                info!(
                    form = self.form.id(),
                    step = self.wizard.current_step,
                    "draft saved"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(form = self.form.id(), error = %e, "draft save failed");
                Err(e.into())
            }
        }
    }

    /// Validate the combined full-form schema and finalize the record.
    ///
    /// A validation rejection is a normal outcome, not an error: the field
    /// errors are attached (possibly spanning non-visible steps) and no
    /// network call is made. On a gateway failure the form state is
    /// preserved unchanged and the user can retry.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        // Same in-flight refusal as save_draft.
        if self.wizard.is_busy() {
            return Err(WizardError::OperationInFlight);
        }

        let rules = self.form.submit_schema();
        let errors = evaluate(&rules, &self.state)?;
        if !errors.is_empty() {
            let steps = self.steps_with_errors(errors.iter().map(|e| e.path.as_str()));
            self.wizard.field_errors = errors
                .into_iter()
                .map(|e| (e.path, e.message))
                .collect();
            return Ok(SubmitOutcome::Rejected {
                steps_with_errors: steps,
            });
        }
        self.wizard.field_errors.clear();
        self.wizard.is_submitting = true;

        let body = SaveBody::finalized(self.state.to_wire());
        let result = match &self.record_id {
            Some(id) => self
                .gateway
                .update(self.form.collection(), id, &body)
                .await
                .map(|()| id.clone()),
            None => {
                self.gateway
                    .create(self.form.collection(), self.form.record_key(), &body)
                    .await
            }
        };

        self.wizard.is_submitting = false;
        match result {
            Ok(record_id) => {
                self.record_id = Some(record_id.clone());
                self.wizard.completed = true;
                info!(form = self.form.id(), id = %record_id, "form submitted");
                Ok(SubmitOutcome::Completed { record_id })
            }
            Err(e) => {
                warn!(form = self.form.id(), error = %e, "submit failed");
                Err(e.into())
            }
        }
    }

    /// Map failing field paths to the step numbers that own them, sorted and
    /// deduplicated. Submit-only fields belong to the last step.
    fn steps_with_errors<'a>(&self, paths: impl Iterator<Item = &'a str>) -> Vec<u32> {
        let steps = self.form.steps();
        let total = self.form.total_steps();
        let mut owners = BTreeSet::new();
        for path in paths {
            let owner = steps
                .iter()
                .position(|s| s.rules.iter().any(|r| r.covers(path)))
                .map(|i| i as u32 + 1)
                .unwrap_or(total);
            owners.insert(owner);
        }
        owners.into_iter().collect()
    }
}

/// Dotted paths of every date-constrained field, including submit-only ones.
/// Used to normalize resumed values that come back as timestamps.
fn date_field_paths<F: FormDefinition>(form: &F) -> BTreeSet<String> {
    fn is_date(rule: &FieldRule) -> bool {
        matches!(rule.constraint, solace_forms::schema::Constraint::Date)
    }
    form.steps()
        .iter()
        .flat_map(|s| s.rules.iter())
        .chain(form.submit_rules().iter())
        .filter(|r| is_date(r))
        .map(|r| r.path.dotted())
        .collect()
}
