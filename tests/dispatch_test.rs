use fractal_forge_connector::request::build_request;
use fractal_forge_connector::ConnectorError;
use reqwest::Method;
use serde_json::{json, Value};

#[test]
fn query_list_is_get_on_collection() {
    let params = json!({
        "resource": "query",
        "operation": "list",
        "collection": "invoices"
    });

    let desc = build_request(&params, 0).expect("build failed");
    assert_eq!(desc.method, Method::GET);
    assert_eq!(desc.endpoint, "invoices");
    assert!(desc.qs.is_empty());
    assert!(desc.body.is_none());
}

#[test]
fn list_appends_custom_query_when_supplied() {
    let params = json!({
        "resource": "query",
        "operation": "list",
        "collection": "invoices",
        "customQuery": "overdue"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.endpoint, "invoices/overdue");
}

#[test]
fn get_targets_the_object() {
    let params = json!({
        "resource": "query",
        "operation": "get",
        "collection": "customers",
        "objectId": "42"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.method, Method::GET);
    assert_eq!(desc.endpoint, "customers/42");
}

#[test]
fn custom_object_query_path() {
    let params = json!({
        "resource": "query",
        "operation": "custom_object_query",
        "collection": "customers",
        "objectId": "42",
        "customQuery": "history"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.method, Method::GET);
    assert_eq!(desc.endpoint, "customers/42/history");
}

#[test]
fn create_with_blank_id_uses_bare_collection() {
    let params = json!({
        "resource": "command",
        "operation": "create",
        "collection": "customers",
        "objectId": "   ",
        "jsonBody": "{\"name\":\"Ann\"}"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.method, Method::POST);
    assert_eq!(desc.endpoint, "customers");
    assert_eq!(desc.body, Some(json!({"name": "Ann"})));
}

#[test]
fn create_with_id_appends_segment() {
    let params = json!({
        "resource": "command",
        "operation": "create",
        "collection": "customers",
        "objectId": "42",
        "jsonBody": "{}"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.endpoint, "customers/42");
}

#[test]
fn update_sends_parsed_body_verbatim() {
    let params = json!({
        "resource": "command",
        "operation": "update",
        "collection": "customers",
        "objectId": "42",
        "jsonBody": "{\"name\":\"Ann\",\"tags\":[1,2]}"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.method, Method::PUT);
    assert_eq!(desc.endpoint, "customers/42");
    assert_eq!(desc.body, Some(json!({"name": "Ann", "tags": [1, 2]})));
}

#[test]
fn update_with_blank_id_keeps_empty_segment() {
    // Only create special-cases a blank id; everything else passes it through.
    let params = json!({
        "resource": "command",
        "operation": "update",
        "collection": "customers",
        "objectId": "",
        "jsonBody": "{}"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.endpoint, "customers/");
}

#[test]
fn delete_has_no_body() {
    let params = json!({
        "resource": "command",
        "operation": "delete",
        "collection": "customers",
        "objectId": "42"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.method, Method::DELETE);
    assert_eq!(desc.endpoint, "customers/42");
    assert!(desc.body.is_none());
}

#[test]
fn custom_collection_command_posts_to_command_path() {
    let params = json!({
        "resource": "command",
        "operation": "custom_collection_command",
        "collection": "customers",
        "customCommand": "reindex"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.method, Method::POST);
    assert_eq!(desc.endpoint, "customers/reindex");
    assert!(desc.body.is_none());
}

#[test]
fn custom_object_command_includes_object_id() {
    let params = json!({
        "resource": "command",
        "operation": "custom_object_command",
        "collection": "customers",
        "objectId": "42",
        "customCommand": "archive"
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.endpoint, "customers/42/archive");
}

#[test]
fn custom_properties_flatten_into_query_string() {
    let params = json!({
        "resource": "command",
        "operation": "delete",
        "collection": "customers",
        "objectId": "42",
        "properties": {
            "force": true,
            "customProperties": {
                "property": [
                    {"name": "reason", "value": "gdpr"},
                    {"name": "notify", "value": "false"}
                ]
            }
        }
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.qs.get("force"), Some(&Value::Bool(true)));
    assert_eq!(desc.qs.get("reason"), Some(&json!("gdpr")));
    assert_eq!(desc.qs.get("notify"), Some(&json!("false")));
    assert_eq!(desc.qs.len(), 3);
}

#[test]
fn bare_custom_properties_list_is_accepted() {
    let params = json!({
        "resource": "command",
        "operation": "delete",
        "collection": "customers",
        "objectId": "42",
        "properties": {
            "customProperties": [
                {"name": "reason", "value": "gdpr"}
            ]
        }
    });

    let desc = build_request(&params, 0).unwrap();
    assert_eq!(desc.qs.get("reason"), Some(&json!("gdpr")));
}

#[test]
fn malformed_properties_is_a_config_error() {
    let params = json!({
        "resource": "command",
        "operation": "delete",
        "collection": "customers",
        "objectId": "42",
        "properties": {
            "customProperties": "nope"
        }
    });

    let err = build_request(&params, 3).unwrap_err();
    assert!(matches!(err, ConnectorError::BadProperties { item_index: 3, .. }));
    assert!(err.is_config());
}

#[test]
fn bad_json_body_is_a_config_error() {
    let params = json!({
        "resource": "command",
        "operation": "create",
        "collection": "customers",
        "jsonBody": "{not json"
    });

    let err = build_request(&params, 5).unwrap_err();
    assert!(matches!(err, ConnectorError::BadJsonBody { item_index: 5, .. }));
    assert_eq!(err.item_index(), Some(5));
}

#[test]
fn unknown_operation_is_tagged_with_item_index() {
    let params = json!({
        "resource": "query",
        "operation": "explode",
        "collection": "customers"
    });

    let err = build_request(&params, 7).unwrap_err();
    match err {
        ConnectorError::UnknownOperation { operation, item_index } => {
            assert_eq!(operation, "explode");
            assert_eq!(item_index, 7);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn operation_from_the_wrong_resource_is_unknown() {
    // create is a command, not a query
    let params = json!({
        "resource": "query",
        "operation": "create",
        "collection": "customers"
    });

    let err = build_request(&params, 0).unwrap_err();
    assert!(matches!(err, ConnectorError::UnknownOperation { .. }));
}

#[test]
fn unknown_resource_is_a_config_error() {
    let params = json!({
        "resource": "invoice",
        "operation": "list",
        "collection": "invoices"
    });

    let err = build_request(&params, 2).unwrap_err();
    assert!(matches!(err, ConnectorError::UnknownResource { item_index: 2, .. }));
}

#[test]
fn building_twice_yields_identical_descriptors() {
    let params = json!({
        "resource": "command",
        "operation": "update",
        "collection": "customers",
        "objectId": "42",
        "jsonBody": "{\"name\":\"Ann\"}",
        "properties": {
            "customProperties": [{"name": "audit", "value": "yes"}]
        }
    });

    let first = build_request(&params, 0).unwrap();
    let second = build_request(&params, 0).unwrap();
    assert_eq!(first, second);
}
