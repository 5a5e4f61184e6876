//! Missing blocks and fields resolve to defaults instead of failing the export.

use super::export_value;
use serde_json::{json, Value};

fn full_blocks() -> Value {
    json!({
        "citation": {"fields": [{"typeName": "title", "value": "Leg 2"}]},
        "cruise": {"fields": [
            {"typeName": "cnumber", "value": ["CR-200"]},
            {"typeName": "vessel_id", "value": "V2"},
            {"typeName": "depart_date", "value": "2024-01-01"},
            {"typeName": "depart_port_id", "value": "HNL"},
            {"typeName": "arrive_date", "value": "2024-01-30"},
            {"typeName": "arrive_poer_id", "value": "PPT"}
        ]},
        "scheduler_records": {"fields": [
            {"typeName": "scheduler", "value": "UNOLS"},
            {"typeName": "scheduler_id", "value": "S-1"}
        ]},
        "persons": {"fields": [{"typeName": "person_n", "value": [{"person_name": "Ada"}]}]},
        "awards": {"fields": [{"typeName": "award", "value": [{"project_number": "P-1"}]}]}
    })
}

fn without_block(name: &str) -> Value {
    let mut blocks = full_blocks();
    blocks.as_object_mut().unwrap().remove(name);
    json!({"datasetVersion": {"metadataBlocks": blocks}})
}

#[test]
fn test_missing_cruise_block() {
    let cruise = &export_value(&without_block("cruise"))["cruise"];
    for key in [
        "id",
        "vessel_id",
        "depart_date",
        "depart_port_id",
        "arrive_date",
        "arrive_port_id",
    ] {
        assert_eq!(cruise[key], "", "{key}");
    }
    assert_eq!(cruise["name"], "Leg 2");
    assert_eq!(cruise["persons"].as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_citation_block() {
    let cruise = &export_value(&without_block("citation"))["cruise"];
    assert_eq!(cruise["name"], "");
    assert_eq!(cruise["id"], "CR-200");
}

#[test]
fn test_missing_schedule_block() {
    let cruise = &export_value(&without_block("scheduler_records"))["cruise"];
    assert_eq!(cruise["schedule_records"], json!([]));
    assert_eq!(cruise["vessel_id"], "V2");
}

#[test]
fn test_missing_persons_block() {
    let cruise = &export_value(&without_block("persons"))["cruise"];
    assert_eq!(cruise["persons"], json!([]));
    assert_eq!(cruise["awards"].as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_awards_block() {
    let cruise = &export_value(&without_block("awards"))["cruise"];
    assert_eq!(cruise["awards"], json!([]));
    assert_eq!(cruise["persons"].as_array().unwrap().len(), 1);
}

#[test]
fn test_blocks_without_field_lists() {
    let dataset = json!({"datasetVersion": {"metadataBlocks": {
        "cruise": {"displayName": "Cruise"},
        "persons": {"fields": null},
        "awards": {},
        "scheduler_records": {"name": "scheduler_records"}
    }}});
    let cruise = &export_value(&dataset)["cruise"];
    assert_eq!(cruise["id"], "");
    assert_eq!(cruise["persons"], json!([]));
    assert_eq!(cruise["awards"], json!([]));
    assert_eq!(cruise["schedule_records"], json!([]));
}

#[test]
fn test_mismatched_payloads_read_as_absent() {
    let dataset = json!({"datasetVersion": {"metadataBlocks": {
        "cruise": {"fields": [
            {"typeName": "cnumber", "value": "CR-300"},
            {"typeName": "vessel_id", "value": ["V3"]},
            {"typeName": "depart_date", "value": 20240101}
        ]},
        "persons": {"fields": [{"typeName": "person_n", "value": "Ada"}]}
    }}});
    let cruise = &export_value(&dataset)["cruise"];
    assert_eq!(cruise["id"], "");
    assert_eq!(cruise["vessel_id"], "");
    assert_eq!(cruise["depart_date"], "");
    assert_eq!(cruise["persons"], json!([]));
}

#[test]
fn test_embargo_default_and_value() {
    let cruise = &export_value(&without_block("awards"))["cruise"];
    assert_eq!(cruise["embargoes"], "none");

    let dataset = json!({"datasetVersion": {
        "termsOfAccess": "Restricted to cruise participants",
        "metadataBlocks": {}
    }});
    assert_eq!(
        export_value(&dataset)["cruise"]["embargoes"],
        "Restricted to cruise participants"
    );

    let dataset = json!({"datasetVersion": {"termsOfAccess": null, "metadataBlocks": {}}});
    assert_eq!(export_value(&dataset)["cruise"]["embargoes"], "none");
}

#[test]
fn test_malformed_unread_blocks_are_ignored() {
    let mut blocks = full_blocks();
    let map = blocks.as_object_mut().unwrap();
    map.insert(
        "geospatial".to_string(),
        json!({"fields": [{"typeName": 7, "value": "x"}]}),
    );
    map.insert("socialscience".to_string(), json!({"fields": "n/a"}));
    map.insert("journal".to_string(), json!("not a block"));
    let dataset = json!({"datasetVersion": {"metadataBlocks": blocks}});

    let cruise = &export_value(&dataset)["cruise"];
    assert_eq!(cruise["id"], "CR-200");
    assert_eq!(cruise["vessel_id"], "V2");
    assert_eq!(cruise["awards"].as_array().unwrap().len(), 1);
}
