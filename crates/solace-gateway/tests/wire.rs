use serde_json::{Map, json};

use solace_gateway::SaveBody;
use solace_gateway::http::{extract_error_message, extract_record_id};

#[test]
fn record_id_from_top_level_string() {
    let body = r#"{"id":"abc-123"}"#;
    assert_eq!(extract_record_id(body, "intake"), Some("abc-123".to_string()));
}

#[test]
fn record_id_from_nested_record_key() {
    let body = r#"{"intake":{"id":17,"isDraft":true}}"#;
    assert_eq!(extract_record_id(body, "intake"), Some("17".to_string()));
}

#[test]
fn top_level_id_wins_over_nested() {
    let body = r#"{"id":"outer","intake":{"id":"inner"}}"#;
    assert_eq!(extract_record_id(body, "intake"), Some("outer".to_string()));
}

#[test]
fn missing_or_unusable_id_is_none() {
    assert_eq!(extract_record_id(r#"{"ok":true}"#, "intake"), None);
    assert_eq!(extract_record_id(r#"{"id":""}"#, "intake"), None);
    assert_eq!(extract_record_id(r#"{"id":null}"#, "intake"), None);
    assert_eq!(extract_record_id("not json", "intake"), None);
}

#[test]
fn error_message_extraction() {
    assert_eq!(
        extract_error_message(r#"{"error":"db unavailable"}"#),
        "db unavailable"
    );
    assert_eq!(extract_error_message(r#"{"message":"nope"}"#), "");
    assert_eq!(extract_error_message("<html>502</html>"), "");
}

#[test]
fn draft_body_carries_bookkeeping_alongside_fields() {
    let mut fields = Map::new();
    fields.insert("patientName".to_string(), json!("Jane Doe"));
    fields.insert("legalHistory.pendingCharges".to_string(), json!(false));

    let body = serde_json::to_value(SaveBody::draft(fields, 5)).unwrap();
    assert_eq!(body["patientName"], json!("Jane Doe"));
    assert_eq!(body["legalHistory.pendingCharges"], json!(false));
    assert_eq!(body["isDraft"], json!(true));
    assert_eq!(body["currentStep"], json!(5));
}

#[test]
fn finalized_body_has_no_step() {
    let body = serde_json::to_value(SaveBody::finalized(Map::new())).unwrap();
    assert_eq!(body["isDraft"], json!(false));
    assert!(body.get("currentStep").is_none());
}
