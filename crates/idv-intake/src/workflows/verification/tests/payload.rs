use serde_json::json;

use super::common::*;
use crate::workflows::verification::domain::ApplicantRecord;
use crate::workflows::verification::payload::{to_provider_payload, ENTITY_TYPE_INDIVIDUAL};

#[test]
fn payload_uses_provider_field_names() {
    let payload = to_provider_payload(&review_record());
    let body = serde_json::to_value(&payload).expect("payload serializes");

    assert_eq!(
        body,
        json!({
            "name_first": "Jessica",
            "name_last": "Review",
            "birth_date": "1995-05-15",
            "document_ssn": "123456789",
            "address_line_1": "100 Test St",
            "address_city": "Testville",
            "address_state": "NY",
            "address_postal_code": "10001",
            "address_country_code": "US",
            "email_address": "jessica.review@example.com",
            "entity_type": "individual"
        })
    );
}

#[test]
fn payload_carries_second_address_line_when_present() {
    let payload = to_provider_payload(&valid_record());
    assert_eq!(payload.address_line_2.as_deref(), Some("Apt 4B"));
    assert_eq!(payload.entity_type, ENTITY_TYPE_INDIVIDUAL);
}

#[test]
fn blank_second_address_line_is_omitted() {
    let mut record = valid_record();
    record.address.line2 = Some("  ".to_string());
    let payload = to_provider_payload(&record);
    assert!(payload.address_line_2.is_none());

    let body = serde_json::to_value(&payload).expect("payload serializes");
    assert!(body.get("address_line_2").is_none());
}

#[test]
fn form_json_carries_unused_second_line_as_empty_string() {
    let record = review_record();
    assert!(record.address.line2.is_none());

    let form = serde_json::to_value(&record).expect("record serializes");
    assert_eq!(form["address"]["line2"], "");

    let reread: ApplicantRecord = serde_json::from_value(form).expect("record parses");
    assert_eq!(to_provider_payload(&reread), to_provider_payload(&record));
}

#[test]
fn mapping_is_deterministic() {
    let record = valid_record();
    assert_eq!(to_provider_payload(&record), to_provider_payload(&record));
}
