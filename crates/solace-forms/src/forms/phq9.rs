use std::sync::LazyLock;

use serde_json::{Value, json};

use solace_core::fields::{FieldPath, FormState};

use crate::FormDefinition;
use crate::schema::{Constraint, FieldRule, StepSchema};

/// PHQ-9 depression screening: 3 steps — screening header, the nine items
/// (0–3 each), and reviewer attestation. Interpretation bands are out of
/// scope here; this form only constrains item ranges.
#[derive(Debug)]
pub struct Phq9;

impl FormDefinition for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9 Screening"
    }

    fn collection(&self) -> &str {
        "phq9-screenings"
    }

    fn record_key(&self) -> &str {
        "screening"
    }

    fn steps(&self) -> &[StepSchema] {
        static STEPS: LazyLock<Vec<StepSchema>> = LazyLock::new(|| {
            let mut items = Vec::new();
            for n in 1..=9 {
                let name = format!("phq{n}");
                items.push(FieldRule::new(
                    FieldPath::field(name.clone()),
                    Constraint::Required,
                ));
                items.push(FieldRule::new(
                    FieldPath::field(name),
                    Constraint::IntRange { min: 0, max: 3 },
                ));
            }

            vec![
                StepSchema::new(
                    "Screening Information",
                    vec![
                        FieldRule::new(FieldPath::field("residentName"), Constraint::Required),
                        FieldRule::new(FieldPath::field("screeningDate"), Constraint::Required),
                        FieldRule::new(FieldPath::field("screeningDate"), Constraint::Date),
                    ],
                ),
                StepSchema::new("Questionnaire", items),
                StepSchema::new(
                    "Review",
                    vec![
                        FieldRule::new(FieldPath::field("administeredBy"), Constraint::Required),
                        FieldRule::new(
                            FieldPath::field("functionalImpact"),
                            Constraint::IntRange { min: 0, max: 3 },
                        ),
                    ],
                ),
            ]
        });
        &STEPS
    }

    fn defaults(&self) -> FormState {
        static DEFAULTS: LazyLock<FormState> = LazyLock::new(|| {
            let mut state = FormState::new();
            for field in ["residentName", "screeningDate", "administeredBy"] {
                state.set_dotted(field, json!(""));
            }
            for n in 1..=9 {
                state.set_dotted(format!("phq{n}"), Value::Null);
            }
            state.set_dotted("functionalImpact", Value::Null);
            state
        });
        DEFAULTS.clone()
    }
}
