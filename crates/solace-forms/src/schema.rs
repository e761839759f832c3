//! Declarative per-step validation schemas.
//!
//! Each wizard step owns one [`StepSchema`]: an ordered list of field rules
//! that must hold before the engine permits forward navigation from that
//! step. Rules may be conditional on another field's value within the same or
//! an earlier step; that cross-field conditionality is the main source of
//! complexity here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use ts_rs::TS;

use solace_core::fields::FieldPath;

/// A single field-level constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Constraint {
    /// The field must be present and non-empty.
    Required,
    /// When present, the value must be a strict `YYYY-MM-DD` date string.
    Date,
    /// When present, the value must be an integer within the range.
    IntRange { min: i64, max: i64 },
    /// When present, the value must be a 0–4 severity rating.
    Rating,
    /// When present, the value must be a boolean.
    Bool,
    /// A consent checkbox: the value must be boolean `true`.
    Accepted,
    /// When present, the string value may not exceed this length.
    MaxLen(usize),
    /// Every entry present in the repeated group at this rule's path must
    /// have a non-empty `field`.
    RequiredInGroup { field: String },
}

/// Cross-field condition gating a rule.
///
/// The rule applies only when the value at `path` equals `equals`. The target
/// must be a scalar; comparing against an array or object is a schema fault,
/// not a pass or a fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Condition {
    pub path: FieldPath,
    pub equals: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldRule {
    pub path: FieldPath,
    pub constraint: Constraint,
    pub when: Option<Condition>,
}

impl FieldRule {
    pub fn new(path: FieldPath, constraint: Constraint) -> Self {
        Self {
            path,
            constraint,
            when: None,
        }
    }

    pub fn when(mut self, path: FieldPath, equals: impl Into<Value>) -> Self {
        self.when = Some(Condition {
            path,
            equals: equals.into(),
        });
        self
    }

    /// Whether an error reported at `dotted` was produced by this rule.
    ///
    /// Group rules cover every entry key under their group; all other rules
    /// cover exactly their own path.
    pub fn covers(&self, dotted: &str) -> bool {
        let base = self.path.dotted();
        match self.constraint {
            Constraint::RequiredInGroup { .. } => {
                dotted.strip_prefix(&base).is_some_and(|rest| rest.starts_with('.'))
            }
            _ => dotted == base,
        }
    }
}

/// The validation contract for one wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepSchema {
    pub label: String,
    pub rules: Vec<FieldRule>,
}

impl StepSchema {
    pub fn new(label: impl Into<String>, rules: Vec<FieldRule>) -> Self {
        Self {
            label: label.into(),
            rules,
        }
    }
}

/// A single failed constraint, keyed by the field's dotted path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{path}: {message}")]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// An unexpected schema-evaluation fault, distinct from validation failure.
///
/// Fatal to the single validation call that hit it; never mutates form state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaFault {
    #[error("condition on '{path}' compares against a non-scalar value")]
    UnevaluableCondition { path: String },
}
