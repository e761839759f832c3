use serde_json::json;

use solace_forms::error::FormError;
use solace_forms::severity::Severity;
use solace_forms::{FormDefinition, all_forms, get_form, require_form};

#[test]
fn registry_lists_every_form() {
    let ids: Vec<String> = all_forms().iter().map(|f| f.id().to_string()).collect();
    assert_eq!(ids, vec!["asam", "intake", "phq9"]);
}

#[test]
fn lookup_by_id() {
    assert_eq!(get_form("intake").unwrap().name(), "Resident Intake");
    assert!(get_form("mmpi").is_none());
}

#[test]
fn require_form_names_the_unknown_id() {
    assert!(require_form("phq9").is_ok());

    let err = require_form("mmpi").unwrap_err();
    assert!(matches!(err, FormError::UnknownForm(ref id) if id == "mmpi"));
    assert_eq!(err.to_string(), "unknown form: mmpi");
}

#[test]
fn step_counts() {
    assert_eq!(get_form("asam").unwrap().total_steps(), 8);
    assert_eq!(get_form("intake").unwrap().total_steps(), 17);
    assert_eq!(get_form("phq9").unwrap().total_steps(), 3);
}

#[test]
fn step_schema_is_one_based() {
    let form = get_form("asam").unwrap();
    assert_eq!(form.step_schema(1).unwrap().label, "Patient Information");
    assert_eq!(
        form.step_schema(8).unwrap().label,
        "Summary and Recommendation"
    );
    assert!(form.step_schema(0).is_none());
    assert!(form.step_schema(9).is_none());
}

#[test]
fn every_step_has_a_label_and_rules() {
    for form in all_forms() {
        for step in form.steps() {
            assert!(!step.label.is_empty(), "{}: unlabeled step", form.id());
            assert!(
                !step.rules.is_empty(),
                "{}: step '{}' has no rules",
                form.id(),
                step.label
            );
        }
    }
}

/// Every rule enforced at the step level is also enforced by the combined
/// submit schema, so nothing that passed step-by-step can fail a weaker
/// check at the end (or vice versa).
#[test]
fn submit_schema_is_a_superset_of_every_step() {
    for form in all_forms() {
        let combined = form.submit_schema();
        for (i, step) in form.steps().iter().enumerate() {
            for rule in &step.rules {
                assert!(
                    combined.contains(rule),
                    "{}: step {} rule for '{}' missing from submit schema",
                    form.id(),
                    i + 1,
                    rule.path.dotted()
                );
            }
        }
        for rule in form.submit_rules() {
            assert!(combined.contains(rule));
        }
    }
}

#[test]
fn defaults_cover_the_headline_fields() {
    let asam = get_form("asam").unwrap().defaults();
    assert_eq!(asam.get_dotted("patientName"), Some(&json!("")));
    assert_eq!(asam.get_dotted("courtOrderedTreatment"), Some(&json!(false)));
    assert_eq!(asam.get_dotted("dimension1Severity"), Some(&json!(null)));

    let intake = get_form("intake").unwrap().defaults();
    assert_eq!(intake.get_dotted("signatures.clientSignature"), Some(&json!("")));
    assert_eq!(intake.get_dotted("consentToTreatment"), Some(&json!(false)));
}

#[test]
fn severity_labels() {
    let expected = [
        (0, "None"),
        (1, "Mild"),
        (2, "Moderate"),
        (3, "Severe"),
        (4, "Very Severe"),
    ];
    for (rating, label) in expected {
        let severity = Severity::from_rating(rating).unwrap();
        assert_eq!(severity.label(), label);
        assert_eq!(severity.rating(), rating);
    }
    assert!(Severity::from_rating(5).is_none());
    assert!(Severity::from_rating(-1).is_none());
}
