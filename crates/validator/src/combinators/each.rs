//! EACH combinator - validates each element of a JSON array

use crate::foundation::{Validate, ValidationError, ValidationErrors, ValidationResult, Validator};
use serde_json::Value;

// ============================================================================
// EACH COMBINATOR
// ============================================================================

/// Validates every element of an array against one element validator.
///
/// Collects all errors with their indices unless built with
/// [`Each::fail_fast`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use trellis_validator::combinators::Each;
/// use trellis_validator::foundation::{Validate, ValidateExt};
/// use trellis_validator::validators::integer;
///
/// let validator = Each::new(integer().boxed());
/// assert!(validator.is_valid(&json!([1, 2, 3])));
///
/// let err = validator.check(&json!([1, "x"])).unwrap_err();
/// assert_eq!(err.nested[0].field.as_deref(), Some("[1]"));
/// ```
#[derive(Debug, Clone)]
pub struct Each {
    inner: Validator,
    fail_fast: bool,
}

impl Each {
    /// Creates a new EACH combinator.
    ///
    /// By default, validates all elements and collects all errors.
    #[must_use]
    pub fn new(inner: Validator) -> Self {
        Self {
            inner,
            fail_fast: false,
        }
    }

    /// Creates an EACH combinator that stops on first error.
    #[must_use]
    pub fn fail_fast(inner: Validator) -> Self {
        Self {
            inner,
            fail_fast: true,
        }
    }

    /// Sets whether to stop on first error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Returns a reference to the element validator.
    #[must_use]
    pub fn inner(&self) -> &Validator {
        &self.inner
    }
}

impl Validate for Each {
    fn check(&self, input: &Value) -> ValidationResult {
        let Value::Array(items) = input else {
            return Err(ValidationError::type_mismatch("array", input));
        };

        let mut output = Vec::with_capacity(items.len());
        let mut errors = ValidationErrors::new();

        for (index, element) in items.iter().enumerate() {
            match self.inner.check(element) {
                Ok(value) => output.push(value),
                Err(e) if self.fail_fast => return Err(e.at(index)),
                Err(e) => errors.add(e.at(index)),
            }
        }

        let total = items.len();
        errors.into_result("each_failed", |n| {
            format!("{n} of {total} elements failed validation")
        })?;
        Ok(Value::Array(output))
    }
}

/// Creates an EACH combinator that validates all elements.
#[must_use]
pub fn each(validator: Validator) -> Each {
    Each::new(validator)
}

/// Creates an EACH combinator that stops on first error.
#[must_use]
pub fn each_fail_fast(validator: Validator) -> Each {
    Each::fail_fast(validator)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Positive;

    impl Validate for Positive {
        fn check(&self, input: &Value) -> Result<Value, ValidationError> {
            match input.as_i64() {
                Some(n) if n > 0 => Ok(input.clone()),
                _ => Err(ValidationError::new("positive", "Must be positive")),
            }
        }
    }

    fn positive() -> Validator {
        Validator::new(Positive)
    }

    #[test]
    fn test_each_all_valid() {
        assert_eq!(each(positive()).check(&json!([1, 2, 3])).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_each_some_invalid() {
        let error = each(positive()).check(&json!([1, -2, -3])).unwrap_err();
        assert_eq!(error.code, "each_failed");
        assert!(error.message.contains("2 of 3"));
        let fields: Vec<_> = error.nested.iter().map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, [Some("[1]"), Some("[2]")]);
    }

    #[test]
    fn test_each_empty() {
        assert!(each(positive()).is_valid(&json!([])));
    }

    #[test]
    fn test_each_rejects_non_array() {
        let error = each(positive()).check(&json!({"0": 1})).unwrap_err();
        assert_eq!(error.code, "type_mismatch");
    }

    #[test]
    fn test_each_fail_fast() {
        let error = each_fail_fast(positive())
            .check(&json!([1, -2, -3]))
            .unwrap_err();
        // only the first failure, at index 1
        assert_eq!(error.code, "positive");
        assert_eq!(error.field.as_deref(), Some("[1]"));
    }
}
