//! Property-based tests for trellis-validator.

use proptest::prelude::*;
use serde_json::{Value, json};
use trellis_validator::combinators::{any_of, each};
use trellis_validator::foundation::{Validate, ValidateExt};
use trellis_validator::validators::{boolean, float, integer, null, string};
use trellis_validator::validators::any as anything;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(Value::from),
        ".{0,8}".prop_map(Value::from),
    ]
}

// ============================================================================
// IDEMPOTENCY: coercing a coerced value changes nothing
// ============================================================================

proptest! {
    #[test]
    fn integer_coercion_is_idempotent(v in scalar()) {
        if let Ok(once) = integer().check(&v) {
            prop_assert_eq!(integer().check(&once).unwrap(), once);
        }
    }

    #[test]
    fn float_coercion_is_idempotent(v in scalar()) {
        if let Ok(once) = float().check(&v) {
            prop_assert_eq!(float().check(&once).unwrap(), once);
        }
    }

    #[test]
    fn integer_string_round_trip(n in any::<i64>()) {
        prop_assert_eq!(integer().check(&json!(n.to_string())).unwrap(), json!(n));
    }
}

// ============================================================================
// COMBINATOR LAWS
// ============================================================================

proptest! {
    #[test]
    fn any_of_passes_iff_some_child_passes(v in scalar()) {
        let children = [null().boxed(), boolean().boxed(), string().boxed()];
        let expected = children.iter().any(|c| c.is_valid(&v));
        prop_assert_eq!(any_of(children.to_vec()).is_valid(&v), expected);
    }

    #[test]
    fn any_of_returns_first_passing_output(v in scalar()) {
        let combined = integer().or(float()).or(anything());
        let expected = integer()
            .check(&v)
            .or_else(|_| float().check(&v))
            .unwrap_or_else(|_| v.clone());
        prop_assert_eq!(combined.check(&v).unwrap(), expected);
    }

    #[test]
    fn each_passes_iff_every_element_passes(items in prop::collection::vec(scalar(), 0..8)) {
        let expected = items.iter().all(|v| integer().is_valid(v));
        prop_assert_eq!(each(integer().boxed()).is_valid(&Value::Array(items)), expected);
    }

    #[test]
    fn each_reports_one_error_per_failing_element(items in prop::collection::vec(scalar(), 1..8)) {
        let failing = items.iter().filter(|v| !string().is_valid(v)).count();
        match each(string().boxed()).check(&Value::Array(items)) {
            Ok(_) => prop_assert_eq!(failing, 0),
            Err(e) => prop_assert_eq!(e.nested.len(), failing),
        }
    }
}
