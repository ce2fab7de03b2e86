//! Tests for any-of / all-of composition through the public API.

use rstest::rstest;
use serde_json::{Value, json};
use trellis_validator::prelude::*;

#[rstest]
#[case(json!(null), json!(null))]
#[case(json!("7"), json!(7))]
#[case(json!(7.0), json!(7))]
fn nullable_integer_accepts(#[case] input: Value, #[case] expected: Value) {
    let v = null().or(integer());
    assert_eq!(v.check(&input).unwrap(), expected);
}

#[test]
fn any_of_lists_every_alternative() {
    let v = null().or(integer()).or(literal("auto"));
    assert_eq!(v.mode(), CombineMode::AnyOf);
    assert_eq!(v.children().len(), 3);

    let err = v.check(&json!("manual")).unwrap_err();
    assert_eq!(err.code, "any_of_failed");
    let codes: Vec<&str> = err.nested.iter().map(|e| e.code.as_ref()).collect();
    assert_eq!(codes, ["type_mismatch", "not_integer", "not_exact"]);
}

#[test]
fn all_of_feeds_coerced_output_forward() {
    // "3" only matches the literal after integer coercion
    let v = integer().and(literal(3));
    assert_eq!(v.check(&json!("3")).unwrap(), json!(3));
    assert!(literal(3).check(&json!("3")).is_err());
}

#[test]
fn all_of_stops_at_first_failure() {
    let v = string().and(integer());
    let err = v.check(&json!(5)).unwrap_err();
    assert_eq!(err.code, "type_mismatch");
    assert_eq!(err.param("expected"), Some("string"));
}

#[test]
fn chains_flatten_through_handles() {
    let left = null().or(integer()).boxed();
    let v = left.or(string());
    assert_eq!(v.children().len(), 3);
}

#[test]
fn validators_share_across_threads() {
    let v = null().or(integer()).boxed();
    std::thread::scope(|scope| {
        for n in 0..4 {
            let v = v.clone();
            scope.spawn(move || {
                assert_eq!(v.check(&json!(n.to_string())).unwrap(), json!(n));
            });
        }
    });
}
