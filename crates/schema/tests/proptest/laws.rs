//! Property-based tests for compiler laws

use proptest::prelude::*;
use serde_json::{Value, json};
use trellis_schema::{RecordSpec, Specification, combine_all, combine_any, compile};
use trellis_validator::combinators::{Combinator, Each};
use trellis_validator::foundation::Validate;

const MARKERS: &[&str] = &["any", "null", "boolean", "integer", "float", "string", "list", "mapping"];

fn marker() -> impl Strategy<Value = Specification> {
    prop::sample::select(MARKERS).prop_map(Specification::marker)
}

fn specification() -> impl Strategy<Value = Specification> {
    marker().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Specification::list_of),
            prop::collection::vec(inner.clone(), 2..4).prop_map(Specification::from),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| combine_any(a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| combine_all(a, b)),
            prop::collection::btree_map("[a-z]{1,6}", inner, 1..4)
                .prop_map(|fields| RecordSpec::from_iter(fields).into()),
        ]
    })
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9]{0,8}".prop_map(Value::from),
    ]
}

// ===== IDENTITY =====

proptest! {
    #[test]
    fn compiling_a_validator_returns_it(spec in specification()) {
        let once = compile(&spec).unwrap();
        let twice = compile(&once.clone().into()).unwrap();
        prop_assert!(twice.ptr_eq(&once));
    }

    #[test]
    fn recompiling_data_is_deterministic(spec in specification(), input in scalar()) {
        let a = compile(&spec).unwrap();
        let b = compile(&spec).unwrap();
        prop_assert_eq!(a.check(&input), b.check(&input));
    }
}

// ===== RECORDS =====

proptest! {
    #[test]
    fn record_field_order_does_not_change_results(
        fields in prop::collection::btree_map("[a-z]{1,6}", prop::sample::select(MARKERS), 1..6)
            .prop_map(|m| m.into_iter().collect::<Vec<_>>())
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
        input in prop::collection::btree_map("[a-z]{1,6}", scalar(), 0..6),
    ) {
        let (declared, shuffled) = fields;
        let a = compile(&RecordSpec::from_iter(declared).into()).unwrap();
        let b = compile(&RecordSpec::from_iter(shuffled).into()).unwrap();

        let input = Value::Object(input.into_iter().collect());
        match (a.check(&input), b.check(&input)) {
            (Ok(left), Ok(right)) => prop_assert_eq!(left, right),
            (Err(left), Err(right)) => prop_assert_eq!(left.flatten().len(), right.flatten().len()),
            (left, right) => prop_assert!(false, "acceptance differs: {:?} vs {:?}", left, right),
        }
    }

    #[test]
    fn defaults_fill_every_missing_field(names in prop::collection::btree_set("[a-z]{1,6}", 1..6)) {
        let spec: RecordSpec = names.iter().map(|n| ((n.as_str(), 7), "integer")).collect();
        let v = compile(&spec.into()).unwrap();
        let out = v.check(&json!({})).unwrap();
        prop_assert_eq!(out.as_object().unwrap().len(), names.len());
        prop_assert!(out.as_object().unwrap().values().all(|x| *x == json!(7)));
    }
}

// ===== COMBINATORS =====

proptest! {
    #[test]
    fn left_folded_any_of_is_flat(operands in prop::collection::vec(marker(), 2..8)) {
        let count = operands.len();
        let mut operands = operands.into_iter();
        let first = operands.next().unwrap();
        let spec = operands.fold(first, |acc, next| combine_any(acc, next));

        let v = compile(&spec).unwrap();
        let combinator = v.downcast_ref::<Combinator>().unwrap();
        prop_assert_eq!(combinator.children().len(), count);
    }

    #[test]
    fn any_of_accepts_what_an_operand_accepts(a in marker(), b in marker(), input in scalar()) {
        let left = compile(&a).unwrap();
        let right = compile(&b).unwrap();
        let either = compile(&combine_any(a, b)).unwrap();
        prop_assert_eq!(either.is_valid(&input), left.is_valid(&input) || right.is_valid(&input));
    }
}

// ===== SEQUENCES =====

proptest! {
    #[test]
    fn single_element_sequence_checks_every_item(items in prop::collection::vec(any::<i64>(), 0..20)) {
        let v = compile(&Specification::list_of("integer")).unwrap();
        prop_assert!(v.is::<Each>());

        let input = Value::from(items.clone());
        prop_assert_eq!(v.check(&input).unwrap(), input);

        let mut mixed: Vec<Value> = items.into_iter().map(Value::from).collect();
        mixed.push(json!("nope"));
        prop_assert!(!v.is_valid(&Value::Array(mixed)));
    }
}
