//! TUPLE validator - fixed-arity, position-wise array validation

use crate::foundation::{Validate, ValidationError, ValidationErrors, ValidationResult, Validator};
use serde_json::Value;

/// Validates an array of exactly `N` elements, each against its own validator.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use trellis_validator::combinators::Tuple;
/// use trellis_validator::foundation::{Validate, ValidateExt};
/// use trellis_validator::validators::{integer, string};
///
/// let host_port = Tuple::new(vec![string().boxed(), integer().boxed()]);
/// assert!(host_port.is_valid(&json!(["127.0.0.1", 2379])));
/// assert!(!host_port.is_valid(&json!(["127.0.0.1"])));
/// ```
#[derive(Debug, Clone)]
pub struct Tuple {
    items: Vec<Validator>,
    fail_fast: bool,
}

impl Tuple {
    /// Creates a tuple validator with one validator per position.
    #[must_use]
    pub fn new(items: Vec<Validator>) -> Self {
        Self {
            items,
            fail_fast: false,
        }
    }

    /// Sets whether to stop on the first failing position.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Returns the positional validators.
    #[must_use]
    pub fn items(&self) -> &[Validator] {
        &self.items
    }

    /// Returns the required length.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.items.len()
    }
}

impl Validate for Tuple {
    fn check(&self, input: &Value) -> ValidationResult {
        let Value::Array(values) = input else {
            return Err(ValidationError::type_mismatch("array", input));
        };

        if values.len() != self.items.len() {
            return Err(ValidationError::new(
                "tuple_arity",
                format!(
                    "expected exactly {} elements, got {}",
                    self.items.len(),
                    values.len()
                ),
            )
            .with_param("expected", self.items.len().to_string())
            .with_param("actual", values.len().to_string()));
        }

        let mut output = Vec::with_capacity(values.len());
        let mut errors = ValidationErrors::new();

        for (index, (validator, value)) in self.items.iter().zip(values).enumerate() {
            match validator.check(value) {
                Ok(value) => output.push(value),
                Err(e) if self.fail_fast => return Err(e.at(index)),
                Err(e) => errors.add(e.at(index)),
            }
        }

        errors.into_result("tuple_invalid", |n| format!("{n} position(s) failed validation"))?;
        Ok(Value::Array(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Kind(&'static str);

    impl Validate for Kind {
        fn check(&self, input: &Value) -> Result<Value, ValidationError> {
            if crate::foundation::json_kind(input) == self.0 {
                Ok(input.clone())
            } else {
                Err(ValidationError::type_mismatch(self.0, input))
            }
        }
    }

    fn pair() -> Tuple {
        Tuple::new(vec![
            Validator::new(Kind("string")),
            Validator::new(Kind("integer")),
        ])
    }

    #[test]
    fn test_tuple_accepts_exact_shape() {
        assert_eq!(pair().check(&json!(["a", 1])).unwrap(), json!(["a", 1]));
        assert_eq!(pair().arity(), 2);
    }

    #[test]
    fn test_tuple_arity_mismatch() {
        for input in [json!([]), json!(["a"]), json!(["a", 1, 2])] {
            let err = pair().check(&input).unwrap_err();
            assert_eq!(err.code, "tuple_arity");
        }
    }

    #[test]
    fn test_tuple_pinpoints_position() {
        let err = pair().check(&json!([1, "a"])).unwrap_err();
        assert_eq!(err.code, "tuple_invalid");
        assert_eq!(err.nested[0].field.as_deref(), Some("[0]"));
        assert_eq!(err.nested[1].field.as_deref(), Some("[1]"));
    }

    #[test]
    fn test_empty_tuple_accepts_only_empty_array() {
        let unit = Tuple::new(Vec::new());
        assert!(unit.is_valid(&json!([])));
        assert!(!unit.is_valid(&json!([null])));
    }
}
