use serde_json::json;

use solace_core::fields::{FieldPath, FormState};
use solace_forms::schema::{Constraint, FieldRule, SchemaFault};
use solace_forms::validate::evaluate;

fn rule(path: FieldPath, constraint: Constraint) -> FieldRule {
    FieldRule::new(path, constraint)
}

#[test]
fn required_rejects_missing_null_and_blank() {
    let rules = vec![rule(FieldPath::field("patientName"), Constraint::Required)];
    let path = FieldPath::field("patientName");

    for state in [
        FormState::new(),
        FormState::from_iter([("patientName".to_string(), json!(null))]),
        FormState::from_iter([("patientName".to_string(), json!(""))]),
        FormState::from_iter([("patientName".to_string(), json!("   "))]),
    ] {
        let errors = evaluate(&rules, &state).unwrap();
        assert_eq!(errors.len(), 1, "state {state:?}");
        assert_eq!(errors[0].path, path.dotted());
    }

    let filled = FormState::from_iter([("patientName".to_string(), json!("Jane Doe"))]);
    assert!(evaluate(&rules, &filled).unwrap().is_empty());
}

#[test]
fn date_validates_only_when_present() {
    let rules = vec![rule(FieldPath::field("dateOfBirth"), Constraint::Date)];

    let empty = FormState::from_iter([("dateOfBirth".to_string(), json!(""))]);
    assert!(evaluate(&rules, &empty).unwrap().is_empty());

    let bad = FormState::from_iter([("dateOfBirth".to_string(), json!("01/01/1990"))]);
    let errors = evaluate(&rules, &bad).unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("YYYY-MM-DD"));

    let good = FormState::from_iter([("dateOfBirth".to_string(), json!("1990-01-01"))]);
    assert!(evaluate(&rules, &good).unwrap().is_empty());
}

#[test]
fn rating_bounds() {
    let rules = vec![rule(FieldPath::field("dimension1Severity"), Constraint::Rating)];

    for ok in [0, 4] {
        let state = FormState::from_iter([("dimension1Severity".to_string(), json!(ok))]);
        assert!(evaluate(&rules, &state).unwrap().is_empty(), "rating {ok}");
    }
    for bad in [json!(5), json!(-1), json!(2.5), json!("high")] {
        let state = FormState::from_iter([("dimension1Severity".to_string(), bad.clone())]);
        assert_eq!(evaluate(&rules, &state).unwrap().len(), 1, "rating {bad}");
    }
}

#[test]
fn int_range_bounds() {
    let rules = vec![rule(
        FieldPath::field("ageOfFirstUse"),
        Constraint::IntRange { min: 0, max: 120 },
    )];

    let state = FormState::from_iter([("ageOfFirstUse".to_string(), json!(121))]);
    let errors = evaluate(&rules, &state).unwrap();
    assert!(errors[0].message.contains("between 0 and 120"));
}

#[test]
fn conditional_rule_applies_only_when_condition_matches() {
    let rules = vec![
        rule(FieldPath::field("courtOrderedDetails"), Constraint::Required)
            .when(FieldPath::field("courtOrderedTreatment"), true),
    ];

    let not_ordered = FormState::from_iter([
        ("courtOrderedTreatment".to_string(), json!(false)),
        ("courtOrderedDetails".to_string(), json!("")),
    ]);
    assert!(evaluate(&rules, &not_ordered).unwrap().is_empty());

    let ordered = FormState::from_iter([
        ("courtOrderedTreatment".to_string(), json!(true)),
        ("courtOrderedDetails".to_string(), json!("")),
    ]);
    let errors = evaluate(&rules, &ordered).unwrap();
    assert_eq!(errors[0].path, "courtOrderedDetails");
}

#[test]
fn unevaluable_condition_is_a_fault_not_a_failure() {
    let rules = vec![
        rule(FieldPath::field("courtOrderedDetails"), Constraint::Required)
            .when(FieldPath::field("courtOrderedTreatment"), true),
    ];
    let state = FormState::from_iter([(
        "courtOrderedTreatment".to_string(),
        json!(["not", "a", "scalar"]),
    )]);

    match evaluate(&rules, &state) {
        Err(SchemaFault::UnevaluableCondition { path }) => {
            assert_eq!(path, "courtOrderedTreatment");
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

#[test]
fn repeated_group_requires_each_present_entry() {
    let rules = vec![rule(
        FieldPath::field("substanceUseHistory"),
        Constraint::RequiredInGroup {
            field: "substance".to_string(),
        },
    )];

    let state = FormState::from_iter([
        ("substanceUseHistory.0.substance".to_string(), json!("alcohol")),
        ("substanceUseHistory.1.frequency".to_string(), json!("daily")),
    ]);

    let errors = evaluate(&rules, &state).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "substanceUseHistory.1.substance");
}

#[test]
fn sparse_group_validates_only_present_entries() {
    let rules = vec![rule(
        FieldPath::field("medications"),
        Constraint::RequiredInGroup {
            field: "name".to_string(),
        },
    )];

    // Entry 1 was deleted; entries 0 and 2 remain, and 2 has no name.
    let state = FormState::from_iter([
        ("medications.0.name".to_string(), json!("naltrexone")),
        ("medications.0.dosage".to_string(), json!("50mg")),
        ("medications.2.dosage".to_string(), json!("20mg")),
    ]);

    let errors = evaluate(&rules, &state).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "medications.2.name");
}

#[test]
fn stray_high_index_from_an_old_draft_yields_one_error() {
    let rules = vec![rule(
        FieldPath::field("medications"),
        Constraint::RequiredInGroup {
            field: "name".to_string(),
        },
    )];
    let state = FormState::from_iter([(
        "medications.4000000000.dosage".to_string(),
        json!("10mg"),
    )]);

    let errors = evaluate(&rules, &state).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "medications.4000000000.name");
}

#[test]
fn empty_group_is_valid() {
    let rules = vec![rule(
        FieldPath::field("medications"),
        Constraint::RequiredInGroup {
            field: "name".to_string(),
        },
    )];
    assert!(evaluate(&rules, &FormState::new()).unwrap().is_empty());
}

#[test]
fn accepted_requires_literal_true() {
    let rules = vec![rule(FieldPath::field("consentToTreatment"), Constraint::Accepted)];

    for bad in [json!(false), json!(null), json!("yes")] {
        let state = FormState::from_iter([("consentToTreatment".to_string(), bad)]);
        assert_eq!(evaluate(&rules, &state).unwrap().len(), 1);
    }
    let ok = FormState::from_iter([("consentToTreatment".to_string(), json!(true))]);
    assert!(evaluate(&rules, &ok).unwrap().is_empty());
}

#[test]
fn max_len_counts_characters() {
    let rules = vec![rule(FieldPath::field("ssnLast4"), Constraint::MaxLen(4))];

    let over = FormState::from_iter([("ssnLast4".to_string(), json!("12345"))]);
    assert_eq!(evaluate(&rules, &over).unwrap().len(), 1);

    let exact = FormState::from_iter([("ssnLast4".to_string(), json!("1234"))]);
    assert!(evaluate(&rules, &exact).unwrap().is_empty());
}

#[test]
fn group_rule_covers_entry_paths() {
    let group = rule(
        FieldPath::field("medications"),
        Constraint::RequiredInGroup {
            field: "name".to_string(),
        },
    );
    assert!(group.covers("medications.0.name"));
    assert!(group.covers("medications.12.dosage"));
    assert!(!group.covers("medications"));
    assert!(!group.covers("medicationsOther.0.name"));

    let plain = rule(FieldPath::field("patientName"), Constraint::Required);
    assert!(plain.covers("patientName"));
    assert!(!plain.covers("patientName.0.x"));
}
