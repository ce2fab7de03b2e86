//! Literal validator - exact equality with one scalar value

use crate::foundation::ValidationError;
use serde_json::Value;

crate::validator! {
    /// Accepts only values equal to `expected`.
    ///
    /// Numbers compare by numeric value, so `1` matches a literal `1.0`; the
    /// output is always the literal itself.
    #[derive(PartialEq)]
    pub Exact { expected: Value };
    check(self, input) {
        if literal_eq(&self.expected, input) {
            Ok(self.expected.clone())
        } else {
            Err(ValidationError::new(
                "not_exact",
                format!("value is not exactly {}", self.expected),
            )
            .with_param("expected", self.expected.to_string()))
        }
    }
    fn exact(expected: Value);
}

fn literal_eq(expected: &Value, input: &Value) -> bool {
    match (expected, input) {
        // Integers compare exactly; f64 only when a float is involved
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
        }
        _ => expected == input,
    }
}

/// Creates a literal validator from anything convertible to a JSON value.
#[must_use]
pub fn literal(expected: impl Into<Value>) -> Exact {
    Exact::new(expected.into())
}
