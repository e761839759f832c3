use std::sync::LazyLock;

use serde_json::{Value, json};

use solace_core::fields::{FieldPath, FormState};

use crate::FormDefinition;
use crate::schema::{Constraint, FieldRule, StepSchema};

/// Resident intake: 17 steps from identity through signatures. The longest
/// form in the system; repeated groups (emergency contacts, medical
/// providers, medications) and several conditionally required fields.
#[derive(Debug)]
pub struct Intake;

impl FormDefinition for Intake {
    fn id(&self) -> &str {
        "intake"
    }

    fn name(&self) -> &str {
        "Resident Intake"
    }

    fn collection(&self) -> &str {
        "intakes"
    }

    fn record_key(&self) -> &str {
        "intake"
    }

    fn steps(&self) -> &[StepSchema] {
        static STEPS: LazyLock<Vec<StepSchema>> = LazyLock::new(|| {
            vec![
                StepSchema::new(
                    "Resident Identity",
                    vec![
                        required("firstName"),
                        required("lastName"),
                        required("dateOfBirth"),
                        date("dateOfBirth"),
                        max_len("ssnLast4", 4),
                        max_len("genderIdentity", 100),
                    ],
                ),
                StepSchema::new(
                    "Contact Information",
                    vec![
                        required("phone"),
                        max_len("phone", 20),
                        max_len("email", 254),
                        required("mailingAddress"),
                        max_len("city", 100),
                        max_len("state", 2),
                        max_len("zip", 10),
                    ],
                ),
                StepSchema::new(
                    "Emergency Contacts",
                    vec![
                        group_required("emergencyContacts", "name"),
                        group_required("emergencyContacts", "phone"),
                    ],
                ),
                StepSchema::new(
                    "Insurance",
                    vec![
                        required("hasInsurance"),
                        boolean("hasInsurance"),
                        required("insuranceProvider").when(FieldPath::field("hasInsurance"), true),
                        required("policyNumber").when(FieldPath::field("hasInsurance"), true),
                        max_len("policyNumber", 50),
                    ],
                ),
                StepSchema::new(
                    "Medical Providers",
                    vec![
                        group_required("medicalProviders", "name"),
                        group_required("medicalProviders", "phone"),
                        max_len("primaryCarePhysician", 200),
                    ],
                ),
                StepSchema::new(
                    "Current Medications",
                    vec![
                        group_required("medications", "name"),
                        group_required("medications", "dosage"),
                    ],
                ),
                StepSchema::new(
                    "Medical History",
                    vec![
                        max_len("allergies", 1000),
                        max_len("chronicConditions", 1000),
                        date("lastPhysicalDate"),
                    ],
                ),
                StepSchema::new(
                    "Mental Health History",
                    vec![
                        max_len("mentalHealthDiagnoses", 2000),
                        required("currentlyInCrisis"),
                        boolean("currentlyInCrisis"),
                        required("crisisDetails").when(FieldPath::field("currentlyInCrisis"), true),
                    ],
                ),
                StepSchema::new(
                    "Substance Use History",
                    vec![
                        required("primarySubstance"),
                        group_required("substanceUseHistory", "substance"),
                        group_required("substanceUseHistory", "frequency"),
                    ],
                ),
                StepSchema::new(
                    "Treatment History",
                    vec![
                        max_len("priorTreatmentPrograms", 2000),
                        date("lastTreatmentDate"),
                    ],
                ),
                StepSchema::new(
                    "Legal",
                    vec![
                        required("courtOrderedTreatment"),
                        boolean("courtOrderedTreatment"),
                        required("courtOrderedDetails")
                            .when(FieldPath::field("courtOrderedTreatment"), true),
                        required("probationOfficerName")
                            .when(FieldPath::field("courtOrderedTreatment"), true),
                        boolean("pendingCharges"),
                    ],
                ),
                StepSchema::new(
                    "Employment & Education",
                    vec![
                        required("employmentStatus"),
                        max_len("employer", 200),
                        max_len("highestEducation", 100),
                    ],
                ),
                StepSchema::new(
                    "Financial",
                    vec![
                        max_len("incomeSource", 200),
                        int_range("monthlyIncome", 0, 1_000_000),
                        boolean("owesRestitution"),
                    ],
                ),
                StepSchema::new(
                    "Preferences & Referral",
                    vec![
                        max_len("dietaryRestrictions", 500),
                        max_len("religiousPreference", 100),
                        keyed_bool("referralSources", "court"),
                        keyed_bool("referralSources", "family"),
                        keyed_bool("referralSources", "selfReferral"),
                    ],
                ),
                StepSchema::new(
                    "Program Expectations",
                    vec![
                        required("goals"),
                        max_len("goals", 2000),
                        max_len("expectations", 2000),
                    ],
                ),
                StepSchema::new(
                    "Consents",
                    vec![
                        accepted("consentToTreatment"),
                        accepted("releaseOfInformation"),
                        accepted("residentHandbook"),
                    ],
                ),
                StepSchema::new(
                    "Review & Signatures",
                    vec![
                        required("intakeCompletedBy"),
                        required("signatureDate"),
                        date("signatureDate"),
                    ],
                ),
            ]
        });
        &STEPS
    }

    fn submit_rules(&self) -> &[FieldRule] {
        static RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
            vec![
                FieldRule::new(
                    FieldPath::keyed("signatures", "clientSignature"),
                    Constraint::Required,
                ),
                FieldRule::new(
                    FieldPath::keyed("signatures", "staffSignature"),
                    Constraint::Required,
                ),
            ]
        });
        &RULES
    }

    fn defaults(&self) -> FormState {
        static DEFAULTS: LazyLock<FormState> = LazyLock::new(|| {
            let mut state = FormState::new();
            for field in [
                "firstName",
                "lastName",
                "dateOfBirth",
                "ssnLast4",
                "genderIdentity",
                "phone",
                "email",
                "mailingAddress",
                "city",
                "state",
                "zip",
                "insuranceProvider",
                "policyNumber",
                "primaryCarePhysician",
                "allergies",
                "chronicConditions",
                "lastPhysicalDate",
                "mentalHealthDiagnoses",
                "crisisDetails",
                "primarySubstance",
                "priorTreatmentPrograms",
                "lastTreatmentDate",
                "courtOrderedDetails",
                "probationOfficerName",
                "employmentStatus",
                "employer",
                "highestEducation",
                "incomeSource",
                "dietaryRestrictions",
                "religiousPreference",
                "goals",
                "expectations",
                "intakeCompletedBy",
                "signatureDate",
            ] {
                state.set_dotted(field, json!(""));
            }
            for field in [
                "hasInsurance",
                "currentlyInCrisis",
                "courtOrderedTreatment",
                "pendingCharges",
                "owesRestitution",
                "consentToTreatment",
                "releaseOfInformation",
                "residentHandbook",
                "referralSources.court",
                "referralSources.family",
                "referralSources.selfReferral",
            ] {
                state.set_dotted(field, json!(false));
            }
            state.set_dotted("monthlyIncome", Value::Null);
            state.set_dotted("signatures.clientSignature", json!(""));
            state.set_dotted("signatures.staffSignature", json!(""));
            state
        });
        DEFAULTS.clone()
    }
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

fn accepted(name: &str) -> FieldRule {
    FieldRule::new(FieldPath::field(name), Constraint::Accepted)
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
