//! Integration tests for validating nested serde_json::Value documents.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use trellis_validator::prelude::*;

fn etcd_section() -> Record {
    Record::new(vec![
        KeyDescriptor::required("namespace").with_validator(string().boxed()),
        KeyDescriptor::with_default("addr", json!(["127.0.0.1", 2379]))
            .with_validator(Tuple::new(vec![string().boxed(), integer().boxed()]).boxed()),
        KeyDescriptor::with_default("user", json!("")).with_validator(null().or(string()).boxed()),
        KeyDescriptor::with_default("password", json!(""))
            .with_validator(null().or(string()).boxed()),
    ])
    .with_extra(ExtraKeys::Keep)
}

fn config() -> Record {
    Record::new(vec![
        KeyDescriptor::required("etcd").with_validator(etcd_section().boxed()),
    ])
    .with_extra(ExtraKeys::Keep)
}

// ============================================================================
// CONFIGURATION DOCUMENTS
// ============================================================================

#[test]
fn fills_defaults_in_nested_sections() {
    let out = config().check(&json!({"etcd": {"namespace": "local"}})).unwrap();
    assert_eq!(
        out,
        json!({
            "etcd": {
                "namespace": "local",
                "addr": ["127.0.0.1", 2379],
                "user": "",
                "password": "",
            }
        })
    );
}

#[test]
fn keeps_unknown_sections() {
    let input = json!({
        "etcd": {"namespace": "local", "user": null, "ttl": 30},
        "logging": {"level": "debug"},
    });
    let out = config().check(&input).unwrap();
    assert_eq!(out["logging"], json!({"level": "debug"}));
    assert_eq!(out["etcd"]["ttl"], json!(30));
    assert_eq!(out["etcd"]["user"], Value::Null);
}

#[test]
fn coerces_nested_values() {
    let out = config()
        .check(&json!({"etcd": {"namespace": "x", "addr": ["10.0.0.1", "2380"]}}))
        .unwrap();
    assert_eq!(out["etcd"]["addr"], json!(["10.0.0.1", 2380]));
}

#[test]
fn reports_nested_paths() {
    let err = config()
        .check(&json!({"etcd": {"addr": ["10.0.0.1", "port"], "user": 5}}))
        .unwrap_err();

    let messages = err.field_messages();
    let paths: Vec<&str> = messages.keys().map(String::as_str).collect();
    assert_eq!(paths, ["etcd.addr[1]", "etcd.namespace", "etcd.user"]);
    assert_eq!(messages["etcd.namespace"], "is required");
}

#[test]
fn error_serializes_to_json() {
    let err = config().check(&json!({"etcd": 1})).unwrap_err();
    let json = err.to_json_value();
    assert_eq!(json["code"], "record_invalid");
    assert_eq!(json["nested"][0]["field"], "etcd");
    assert_eq!(json["nested"][0]["params"]["expected"], "object");
}

// ============================================================================
// LISTS
// ============================================================================

#[test]
fn list_of_records_pinpoints_element_field() {
    let users = Each::new(
        Record::new(vec![KeyDescriptor::required("name").with_validator(string().boxed())]).boxed(),
    );

    let err = users
        .check(&json!([{"name": "a"}, {"name": 1}]))
        .unwrap_err();
    assert!(err.find("[1].name").is_some());
    assert!(err.find("[0].name").is_none());
}

#[test]
fn fail_fast_stops_at_first_element() {
    let ints = Each::fail_fast(integer().boxed());
    let err = ints.check(&json!(["a", "b"])).unwrap_err();
    assert_eq!(err.total_error_count(), 1);
    assert_eq!(err.field.as_deref(), Some("[0]"));
}
