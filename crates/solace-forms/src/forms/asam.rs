use std::sync::LazyLock;

use serde_json::{Value, json};

use solace_core::fields::{FieldPath, FormState};

use crate::FormDefinition;
use crate::schema::{Constraint, FieldRule, StepSchema};

/// ASAM substance-use assessment: 8 steps covering patient identification,
/// presenting problem, use history, the six ASAM dimensions (0–4 severity
/// each), legal status, and the level-of-care recommendation.
#[derive(Debug)]
pub struct Asam;

impl FormDefinition for Asam {
    fn id(&self) -> &str {
        "asam"
    }

    fn name(&self) -> &str {
        "ASAM Assessment"
    }

    fn collection(&self) -> &str {
        "asam-assessments"
    }

    fn record_key(&self) -> &str {
        "asamAssessment"
    }

    fn steps(&self) -> &[StepSchema] {
        static STEPS: LazyLock<Vec<StepSchema>> = LazyLock::new(|| {
            vec![
                StepSchema::new(
                    "Patient Information",
                    vec![
                        required("patientName"),
                        required("dateOfBirth"),
                        date("dateOfBirth"),
                        required("intakeDate"),
                        date("intakeDate"),
                        max_len("referralSource", 200),
                    ],
                ),
                StepSchema::new(
                    "Presenting Problem",
                    vec![
                        required("presentingProblem"),
                        max_len("presentingProblem", 4000),
                        int_range("priorTreatmentEpisodes", 0, 50),
                    ],
                ),
                StepSchema::new(
                    "Substance Use History",
                    vec![
                        group_required("substanceUseHistory", "substance"),
                        group_required("substanceUseHistory", "frequency"),
                        int_range("ageOfFirstUse", 0, 120),
                    ],
                ),
                StepSchema::new(
                    "Dimensions 1 & 2: Withdrawal and Biomedical",
                    [dimension_rules(1), dimension_rules(2)].concat(),
                ),
                StepSchema::new(
                    "Dimensions 3 & 4: Emotional and Readiness",
                    [dimension_rules(3), dimension_rules(4)].concat(),
                ),
                StepSchema::new(
                    "Dimensions 5 & 6: Relapse and Recovery Environment",
                    [dimension_rules(5), dimension_rules(6)].concat(),
                ),
                StepSchema::new(
                    "Legal",
                    vec![
                        required("courtOrderedTreatment"),
                        boolean("courtOrderedTreatment"),
                        required("courtOrderedDetails")
                            .when(FieldPath::field("courtOrderedTreatment"), true),
                        max_len("courtOrderedDetails", 2000),
                        keyed_bool("legalHistory", "pendingCharges"),
                        keyed_bool("legalHistory", "priorConvictions"),
                    ],
                ),
                StepSchema::new(
                    "Summary and Recommendation",
                    vec![
                        required("recommendedLevelOfCare"),
                        required("counselorName"),
                        max_len("assessmentSummary", 4000),
                    ],
                ),
            ]
        });
        &STEPS
    }

    fn submit_rules(&self) -> &[FieldRule] {
        static RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
            vec![FieldRule::new(
                FieldPath::keyed("signatures", "counselorSignature"),
                Constraint::Required,
            )]
        });
        &RULES
    }

    fn defaults(&self) -> FormState {
        static DEFAULTS: LazyLock<FormState> = LazyLock::new(|| {
            let mut state = FormState::new();
            for field in [
                "patientName",
                "dateOfBirth",
                "intakeDate",
                "referralSource",
                "presentingProblem",
                "courtOrderedDetails",
                "recommendedLevelOfCare",
                "counselorName",
                "assessmentSummary",
            ] {
                state.set_dotted(field, json!(""));
            }
            for field in ["priorTreatmentEpisodes", "ageOfFirstUse"] {
                state.set_dotted(field, Value::Null);
            }
            for n in 1..=6 {
                state.set_dotted(format!("dimension{n}Severity"), Value::Null);
                state.set_dotted(format!("dimension{n}Notes"), json!(""));
            }
            state.set_dotted("courtOrderedTreatment", json!(false));
            state.set_dotted("legalHistory.pendingCharges", json!(false));
            state.set_dotted("legalHistory.priorConvictions", json!(false));
            state.set_dotted("signatures.counselorSignature", json!(""));
            state
        });
        DEFAULTS.clone()
    }
}

/// Severity rating plus notes for one ASAM dimension.
fn dimension_rules(n: u32) -> Vec<FieldRule> {
    vec![
        required(&format!("dimension{n}Severity")),
        FieldRule::new(
            FieldPath::field(format!("dimension{n}Severity")),
            Constraint::Rating,
        ),
        max_len(&format!("dimension{n}Notes"), 2000),
    ]
}

fn required(name: &str) -> FieldRule {
    FieldRule::new(FieldPath::field(name), Constraint::Required)
}

fn date(name: &str) -> FieldRule {
    FieldRule::new(FieldPath::field(name), Constraint::Date)
}

fn boolean(name: &str) -> FieldRule {
    FieldRule::new(FieldPath::field(name), Constraint::Bool)
}

fn keyed_bool(group: &str, key: &str) -> FieldRule {
    FieldRule::new(FieldPath::keyed(group, key), Constraint::Bool)
}

fn max_len(name: &str, limit: usize) -> FieldRule {
    FieldRule::new(FieldPath::field(name), Constraint::MaxLen(limit))
}

fn int_range(name: &str, min: i64, max: i64) -> FieldRule {
    FieldRule::new(FieldPath::field(name), Constraint::IntRange { min, max })
}

fn group_required(group: &str, field: &str) -> FieldRule {
    FieldRule::new(
        FieldPath::field(group),
        Constraint::RequiredInGroup {
            field: field.to_string(),
        },
    )
}
