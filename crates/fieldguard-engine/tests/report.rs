//! The serializable report envelope produced by `ValidationEngine::report`.

use fieldguard_engine::test_support::{engine, Contact};
use fieldguard_types::SCHEMA_REPORT_V1;

#[test]
fn report_serializes_with_schema_tag_and_timestamps() {
    let engine = engine();
    let mut contact = Contact::valid();
    contact.display_name = None;

    let report = engine.report(&mut contact).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["schema"], SCHEMA_REPORT_V1);
    assert_eq!(json["type_name"], "Contact");
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0], "display name is required");
    assert!(json["started_at"].as_str().unwrap().ends_with('Z'));
    assert!(json["finished_at"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn valid_values_produce_a_passing_report() {
    let engine = engine();
    let mut contact = Contact::valid();

    let report = engine.report(&mut contact).unwrap();
    assert!(report.valid);
    assert!(report.errors.is_empty());
}
