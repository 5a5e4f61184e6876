//! End-to-end scenarios for the cruise mapping rules.

use super::export_value;
use cruise_export::formats::cruise::render;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static CRUISE_ONLY: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(include_str!("fixtures/cruise_only.json")).unwrap());

fn with_blocks(blocks: Value) -> Value {
    json!({"datasetVersion": {"metadataBlocks": blocks}})
}

#[test]
fn test_cruise_block_only() {
    let output = export_value(&CRUISE_ONLY);
    let cruise = &output["cruise"];

    assert_eq!(cruise["id"], "CR-100");
    assert_eq!(cruise["vessel_id"], "V1");
    assert_eq!(cruise["persons"], json!([]));
    assert_eq!(cruise["awards"], json!([]));
    assert_eq!(cruise["schedule_records"], json!([]));
    assert_eq!(cruise["embargoes"], "none");
}

#[test]
fn test_two_persons_in_source_order() {
    let dataset = with_blocks(json!({
        "persons": {"fields": [{"typeName": "person_n", "value": [
            {"person_name": "Ada Lovelace", "instituion_id": "WHOI", "role": "Chief Scientist"},
            {"person_name": "Alan Turing", "instituion_id": "SIO", "role": "Watchstander"}
        ]}]}
    }));
    let persons = export_value(&dataset)["cruise"]["persons"].clone();

    assert_eq!(
        persons,
        json!([
            {"id": "Ada Lovelace", "name": "Ada Lovelace", "institution_id": "WHOI", "role": "Chief Scientist"},
            {"id": "Alan Turing", "name": "Alan Turing", "institution_id": "SIO", "role": "Watchstander"}
        ])
    );
}

#[test]
fn test_persons_read_only_first_trigger_field() {
    let dataset = with_blocks(json!({
        "persons": {"fields": [
            {"typeName": "person_n", "value": [{"person_name": "First"}]},
            {"typeName": "person_n", "value": [{"person_name": "Second"}]}
        ]}
    }));
    let persons = export_value(&dataset)["cruise"]["persons"].clone();
    assert_eq!(persons.as_array().unwrap().len(), 1);
    assert_eq!(persons[0]["name"], "First");
}

#[test]
fn test_two_award_field_sets_yield_one_award() {
    let dataset = with_blocks(json!({
        "awards": {"fields": [
            {"typeName": "award", "value": [{
                "project_number": "OCE-1", "project_name": "First",
                "agency_id": "NSF", "agency_department": "OCE"
            }]},
            {"typeName": "award", "value": [{
                "project_number": "N-2", "project_name": "Second",
                "agency_id": "ONR", "agency_department": "Code 32"
            }]}
        ]}
    }));
    let awards = export_value(&dataset)["cruise"]["awards"].clone();

    assert_eq!(
        awards,
        json!([{"project_number": "OCE-1", "name": "First", "agency_id": "NSF", "agency_department": "OCE"}])
    );
}

#[test]
fn test_flat_award_field_sets_yield_one_award() {
    let dataset = with_blocks(json!({
        "awards": {"fields": [
            {"project_number": "OCE-1", "project_name": "Deep", "agency_id": "NSF", "agency_department": "OCE"},
            {"project_number": "N-2", "project_name": "Second", "agency_id": "ONR"}
        ]}
    }));
    let awards = export_value(&dataset)["cruise"]["awards"].clone();

    assert_eq!(
        awards,
        json!([{"project_number": "OCE-1", "name": "Deep", "agency_id": "NSF", "agency_department": "OCE"}])
    );
}

#[test]
fn test_non_repeatable_award_compound() {
    let dataset = with_blocks(json!({
        "awards": {"fields": [{"typeName": "award", "value": {
            "project_number": {"typeName": "project_number", "value": "OCE-9"},
            "agency_id": {"typeName": "agency_id", "value": "NSF"}
        }}]}
    }));
    let awards = export_value(&dataset)["cruise"]["awards"].clone();

    assert_eq!(
        awards,
        json!([{"project_number": "OCE-9", "name": "", "agency_id": "NSF", "agency_department": ""}])
    );
}

#[test]
fn test_schedule_record_aliasing() {
    let dataset = with_blocks(json!({
        "scheduler_records": {"fields": [
            {"typeName": "scheduler_id", "value": "STR-1"},
            {"typeName": "scheduler", "value": "UNOLS"},
            {"typeName": "scheduler_id", "value": "STR-2"}
        ]}
    }));
    let records = export_value(&dataset)["cruise"]["schedule_records"].clone();

    assert_eq!(
        records,
        json!([{"scheduler_id": "UNOLS", "scheduler_cruise_id": "STR-1"}])
    );
}

#[test]
fn test_missing_version_fails() {
    let dataset = json!({"metadataBlocks": {}});
    assert!(render(&dataset, false).is_err());

    let dataset = json!({"datasetVersion": {"termsOfAccess": "open"}});
    assert!(render(&dataset, false).is_err());
}

#[test]
fn test_field_without_type_name_fails() {
    let dataset = with_blocks(json!({
        "cruise": {"fields": [{"value": "V1"}]}
    }));
    let err = render(&dataset, false).unwrap_err();
    assert!(err.to_string().contains("typeName"), "{err}");
    assert!(
        err.to_string().contains("metadataBlocks.cruise.fields[0]"),
        "{err}"
    );
}
