use ledger_api_schemas::node_api::{self, INDEX_RESPONSE};
use ledger_api_schemas::{SchemaDescriptor, SchemaError, SchemaRegistry, ValidationError};
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_generated_descriptor_parses_from_wire_text() {
    let wire_text = r#"{
        "description": "The struct holding all data returned to the client by the index endpoint (i.e., GET \"/\").",
        "properties": {
            "chain_id": {
                "type": "number",
                "isRequired": true,
                "format": "uint8"
            },
            "epoch": {
                "type": "U64",
                "isRequired": true
            },
            "ledger_version": {
                "type": "U64",
                "isRequired": true
            },
            "oldest_ledger_version": {
                "type": "U64",
                "isRequired": true
            },
            "ledger_timestamp": {
                "type": "U64",
                "isRequired": true
            },
            "node_role": {
                "type": "RoleType",
                "isRequired": true
            },
            "oldest_block_height": {
                "type": "U64",
                "isRequired": true
            },
            "block_height": {
                "type": "U64",
                "isRequired": true
            }
        }
    }"#;

    let parsed: SchemaDescriptor = serde_json::from_str(wire_text).unwrap();
    assert_eq!(parsed, *INDEX_RESPONSE);
}

#[test]
fn test_round_trip_is_idempotent() {
    let first = serde_json::to_string(&*INDEX_RESPONSE).unwrap();
    let reparsed: SchemaDescriptor = serde_json::from_str(&first).unwrap();
    let second = serde_json::to_string(&reparsed).unwrap();
    assert_eq!(first, second);
    assert_eq!(reparsed, *INDEX_RESPONSE);
}

#[test]
fn test_serialized_field_specs_match_api_contract() {
    let value = serde_json::to_value(&*INDEX_RESPONSE).unwrap();
    let properties = value["properties"].as_object().unwrap();

    let expected_types = [
        ("chain_id", "number"),
        ("epoch", "U64"),
        ("ledger_version", "U64"),
        ("oldest_ledger_version", "U64"),
        ("block_height", "U64"),
        ("oldest_block_height", "U64"),
        ("ledger_timestamp", "U64"),
        ("node_role", "RoleType"),
    ];
    assert_eq!(properties.len(), expected_types.len());
    for (name, type_tag) in expected_types {
        let spec = &properties[name];
        assert_eq!(spec["type"], json!(type_tag), "{name}");
        assert_eq!(spec["isRequired"], json!(true), "{name}");
    }
    assert_eq!(properties["chain_id"]["format"], json!("uint8"));
    assert!(properties["epoch"].get("format").is_none());
}

#[test]
fn test_index_payload_accepted() {
    init_logging();
    let registry = SchemaRegistry::with_node_api_schemas();
    let payload = json!({
        "chain_id": 4,
        "epoch": "1",
        "ledger_version": "100",
        "oldest_ledger_version": "0",
        "block_height": "10",
        "oldest_block_height": "0",
        "ledger_timestamp": "123",
        "node_role": "full_node"
    });
    assert!(registry
        .validator()
        .validate(node_api::INDEX_RESPONSE_NAME, &payload)
        .is_ok());
}

#[test]
fn test_index_payload_missing_epoch_rejected() {
    init_logging();
    let registry = SchemaRegistry::with_node_api_schemas();
    let payload = json!({
        "chain_id": 4,
        "ledger_version": "100",
        "oldest_ledger_version": "0",
        "block_height": "10",
        "oldest_block_height": "0",
        "ledger_timestamp": "123",
        "node_role": "full_node"
    });
    let err = registry
        .validator()
        .validate(node_api::INDEX_RESPONSE_NAME, &payload)
        .unwrap_err();
    match err {
        SchemaError::Validation(ValidationError::MissingField { schema, field }) => {
            assert_eq!(schema, "IndexResponse");
            assert_eq!(field, "epoch");
        }
        other => panic!("expected a missing-field violation, got {other}"),
    }
}
