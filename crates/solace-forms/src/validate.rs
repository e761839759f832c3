//! Schema evaluation.
//!
//! Validation failure is a normal result: `Ok` with a non-empty error list.
//! `Err(SchemaFault)` is reserved for schemas that cannot be evaluated at
//! all, and never corrupts the form state being checked (evaluation only
//! reads).

use serde_json::Value;

use solace_core::dates::is_iso_date;
use solace_core::fields::{FieldPath, FormState};

use crate::schema::{Constraint, FieldError, FieldRule, SchemaFault};

/// Evaluate a set of rules against a form state.
pub fn evaluate(rules: &[FieldRule], state: &FormState) -> Result<Vec<FieldError>, SchemaFault> {
    let mut errors = Vec::new();
    for rule in rules {
        if let Some(condition) = &rule.when {
            let target = state.get(&condition.path);
            if matches!(target, Some(Value::Array(_)) | Some(Value::Object(_))) {
                return Err(SchemaFault::UnevaluableCondition {
                    path: condition.path.dotted(),
                });
            }
            let applies = target.unwrap_or(&Value::Null) == &condition.equals;
            if !applies {
                continue;
            }
        }
        check(rule, state, &mut errors);
    }
    Ok(errors)
}

fn check(rule: &FieldRule, state: &FormState, errors: &mut Vec<FieldError>) {
    let value = state.get(&rule.path);
    match &rule.constraint {
        Constraint::Required => {
            if is_empty(value) {
                errors.push(fail(&rule.path, "This field is required"));
            }
        }
        Constraint::Date => {
            if !is_empty(value) {
                let ok = value.and_then(Value::as_str).is_some_and(is_iso_date);
                if !ok {
                    errors.push(fail(&rule.path, "Enter a date as YYYY-MM-DD"));
                }
            }
        }
        Constraint::IntRange { min, max } => {
            if !is_empty(value) {
                match value.and_then(Value::as_i64) {
                    Some(n) if (*min..=*max).contains(&n) => {}
                    Some(_) => errors.push(fail(
                        &rule.path,
                        format!("Enter a whole number between {min} and {max}"),
                    )),
                    None => errors.push(fail(&rule.path, "Enter a whole number")),
                }
            }
        }
        Constraint::Rating => {
            if !is_empty(value) {
                let ok = value
                    .and_then(Value::as_i64)
                    .is_some_and(|n| (0..=4).contains(&n));
                if !ok {
                    errors.push(fail(
                        &rule.path,
                        "Select a rating from 0 (none) to 4 (very severe)",
                    ));
                }
            }
        }
        Constraint::Bool => {
            if !is_empty(value) && !value.is_some_and(Value::is_boolean) {
                errors.push(fail(&rule.path, "Select yes or no"));
            }
        }
        Constraint::Accepted => {
            if value.and_then(Value::as_bool) != Some(true) {
                errors.push(fail(&rule.path, "This must be accepted to continue"));
            }
        }
        Constraint::MaxLen(limit) => {
            if let Some(text) = value.and_then(Value::as_str)
                && text.chars().count() > *limit
            {
                errors.push(fail(
                    &rule.path,
                    format!("Must be {limit} characters or fewer"),
                ));
            }
        }
        Constraint::RequiredInGroup { field } => {
            // Only entries actually present count: groups are sparse after a
            // middle entry is deleted or an old draft left stray indices.
            let group = rule.path.root();
            for index in state.group_indices(group) {
                let entry = FieldPath::indexed(group, index, field.clone());
                if is_empty(state.get(&entry)) {
                    errors.push(fail(&entry, "This field is required"));
                }
            }
        }
    }
}

fn fail(path: &FieldPath, message: impl Into<String>) -> FieldError {
    FieldError {
        path: path.dotted(),
        message: message.into(),
    }
}

/// Missing, `null`, and blank strings all count as empty.
fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
