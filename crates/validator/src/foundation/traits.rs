//! Core traits for the validation system
//!
//! This module defines the capability every validator implements, the shared
//! [`Validator`] handle the compiler hands out, and the extension trait that
//! chains validators into combinators.

use crate::combinators::{CombineMode, Combinator};
use crate::foundation::{ValidationError, ValidationResult};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The capability all validators implement.
///
/// A validator checks a JSON value and returns either the (possibly coerced)
/// value or a structured failure. Implementations hold no mutable state, so
/// one instance can serve any number of concurrent checks.
///
/// # Examples
///
/// ```
/// use serde_json::{Value, json};
/// use trellis_validator::foundation::{Validate, ValidationError};
///
/// #[derive(Debug)]
/// struct NonEmptyString;
///
/// impl Validate for NonEmptyString {
///     fn check(&self, input: &Value) -> Result<Value, ValidationError> {
///         match input {
///             Value::String(s) if !s.is_empty() => Ok(input.clone()),
///             _ => Err(ValidationError::new("non_empty_string", "expected a non-empty string")),
///         }
///     }
/// }
///
/// assert!(NonEmptyString.check(&json!("hi")).is_ok());
/// assert!(!NonEmptyString.is_valid(&json!("")));
/// ```
pub trait Validate: AsAny + fmt::Debug + Send + Sync {
    /// Checks the input, returning the coerced value on success.
    fn check(&self, input: &Value) -> ValidationResult;

    /// Checks the input, discarding the coerced value.
    fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        self.check(input).map(|_| ())
    }

    /// Returns true if the input passes.
    fn is_valid(&self, input: &Value) -> bool {
        self.check(input).is_ok()
    }
}

/// Upcast to [`Any`] so shared validators can be inspected by concrete type.
///
/// Implemented for every sized `'static` type; never implement it by hand.
pub trait AsAny {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// SHARED HANDLE
// ============================================================================

/// A shared, immutable, type-erased validator.
///
/// Cloning is an `Arc` bump; clones compare equal under [`Validator::ptr_eq`].
#[derive(Clone)]
pub struct Validator(Arc<dyn Validate>);

impl Validator {
    /// Wraps a concrete validator.
    ///
    /// Wrapping a handle returns that handle, so identity is preserved.
    pub fn new<V: Validate + 'static>(validator: V) -> Self {
        if let Some(handle) = (&validator as &dyn Any).downcast_ref::<Validator>() {
            return handle.clone();
        }
        Self(Arc::new(validator))
    }

    /// Returns true if both handles point at the same validator instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Borrows the validator as a concrete type, if it is one.
    #[must_use]
    pub fn downcast_ref<V: Validate + 'static>(&self) -> Option<&V> {
        self.0.as_ref().as_any().downcast_ref::<V>()
    }

    /// Returns true if the validator is a `V`.
    #[must_use]
    pub fn is<V: Validate + 'static>(&self) -> bool {
        self.downcast_ref::<V>().is_some()
    }
}

impl Validate for Validator {
    fn check(&self, input: &Value) -> ValidationResult {
        self.0.check(input)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<V: Validate + 'static> From<Arc<V>> for Validator {
    fn from(validator: Arc<V>) -> Self {
        Self(validator)
    }
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension trait providing combinator methods for validators.
///
/// Automatically implemented for every [`Validate`] type. Chaining the same
/// method flattens into one [`Combinator`] instead of nesting.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use trellis_validator::prelude::*;
///
/// let id = integer().or(string());
/// assert!(id.is_valid(&json!(7)));
/// assert!(id.is_valid(&json!("seven")));
/// assert!(!id.is_valid(&json!(null)));
/// ```
pub trait ValidateExt: Validate + Sized + 'static {
    /// Erases the concrete type into a shared [`Validator`].
    fn boxed(self) -> Validator {
        Validator::new(self)
    }

    /// All-of: both must pass; the left output feeds the right.
    fn and<V>(self, other: V) -> Combinator
    where
        V: Validate + 'static,
    {
        Combinator::chain(CombineMode::AllOf, self.boxed(), Validator::new(other))
    }

    /// Any-of: the first passing alternative wins.
    fn or<V>(self, other: V) -> Combinator
    where
        V: Validate + 'static,
    {
        Combinator::chain(CombineMode::AnyOf, self.boxed(), Validator::new(other))
    }
}

impl<T: Validate + 'static> ValidateExt for T {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct AlwaysValid;

    impl Validate for AlwaysValid {
        fn check(&self, input: &Value) -> Result<Value, ValidationError> {
            Ok(input.clone())
        }
    }

    #[derive(Debug)]
    struct AlwaysFails;

    impl Validate for AlwaysFails {
        fn check(&self, _input: &Value) -> Result<Value, ValidationError> {
            Err(ValidationError::new("always_fails", "Always fails"))
        }
    }

    #[test]
    fn test_validator_trait() {
        assert!(AlwaysValid.validate(&json!("test")).is_ok());
        assert!(!AlwaysFails.is_valid(&json!("test")));
    }

    #[test]
    fn handle_clones_share_identity() {
        let a = Validator::new(AlwaysValid);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Validator::new(AlwaysValid)));
        assert!(a.ptr_eq(&Validator::new(a.clone())));
    }

    #[test]
    fn handle_downcasts_to_concrete_type() {
        let v = Validator::new(AlwaysFails);
        assert!(v.is::<AlwaysFails>());
        assert!(v.downcast_ref::<AlwaysValid>().is_none());
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }
}
