//! ANY-OF / ALL-OF combinator - logical composition of validators
//!
//! [`Combinator`] holds an ordered list of child validators and a
//! [`CombineMode`]:
//!
//! - **any-of** tries children in order and returns the first success. When
//!   every child fails, the error lists all child failures in order.
//! - **all-of** applies children in order, feeding the coerced output of each
//!   child into the next. The first failure aborts the chain.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use trellis_validator::combinators::any_of;
//! use trellis_validator::foundation::{Validate, ValidateExt};
//! use trellis_validator::validators::{integer, null};
//!
//! let maybe_int = any_of(vec![null().boxed(), integer().boxed()]);
//! assert!(maybe_int.is_valid(&json!(null)));
//! assert_eq!(maybe_int.check(&json!("4")).unwrap(), json!(4));
//! ```

use crate::foundation::{Validate, ValidationError, ValidationResult, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How a [`Combinator`] joins its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Succeeds if any child succeeds.
    AnyOf,
    /// Succeeds only if every child succeeds, threading coerced output.
    AllOf,
}

impl CombineMode {
    /// Stable lowercase name, as used in error codes and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnyOf => "any_of",
            Self::AllOf => "all_of",
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of validators joined by a [`CombineMode`].
#[derive(Debug, Clone)]
pub struct Combinator {
    mode: CombineMode,
    children: Vec<Validator>,
}

impl Combinator {
    /// Creates a combinator over `children`, kept in the given order.
    #[must_use]
    pub fn new(mode: CombineMode, children: Vec<Validator>) -> Self {
        Self { mode, children }
    }

    /// Joins two validators, splicing in the children of either operand that
    /// is already a combinator of the same mode.
    #[must_use]
    pub fn chain(mode: CombineMode, left: Validator, right: Validator) -> Self {
        let mut children = Vec::new();
        for operand in [left, right] {
            match operand.downcast_ref::<Combinator>() {
                Some(inner) if inner.mode == mode => children.extend(inner.children.iter().cloned()),
                _ => children.push(operand),
            }
        }
        Self { mode, children }
    }

    /// Returns the combination mode.
    #[must_use]
    pub fn mode(&self) -> CombineMode {
        self.mode
    }

    /// Returns the children in application order.
    #[must_use]
    pub fn children(&self) -> &[Validator] {
        &self.children
    }

    /// Chains another validator with OR logic, flattening into `self`.
    #[must_use]
    pub fn or<V: Validate + 'static>(self, other: V) -> Combinator {
        Combinator::chain(CombineMode::AnyOf, Validator::new(self), Validator::new(other))
    }

    /// Chains another validator with AND logic, flattening into `self`.
    #[must_use]
    pub fn and<V: Validate + 'static>(self, other: V) -> Combinator {
        Combinator::chain(CombineMode::AllOf, Validator::new(self), Validator::new(other))
    }

    fn check_any(&self, input: &Value) -> ValidationResult {
        let mut errors = Vec::with_capacity(self.children.len());

        for child in &self.children {
            match child.check(input) {
                Ok(value) => return Ok(value),
                Err(e) => errors.push(e),
            }
        }

        let count = errors.len();
        Err(
            ValidationError::new("any_of_failed", format!("All {count} alternatives failed"))
                .with_param("alternatives", count.to_string())
                .with_nested(errors),
        )
    }

    fn check_all(&self, input: &Value) -> ValidationResult {
        let mut current = input.clone();
        for child in &self.children {
            current = child.check(&current)?;
        }
        Ok(current)
    }
}

impl Validate for Combinator {
    fn check(&self, input: &Value) -> ValidationResult {
        match self.mode {
            CombineMode::AnyOf => self.check_any(input),
            CombineMode::AllOf => self.check_all(input),
        }
    }
}

/// Creates an any-of combinator from a list of validators.
#[must_use]
pub fn any_of(validators: Vec<Validator>) -> Combinator {
    Combinator::new(CombineMode::AnyOf, validators)
}

/// Creates an all-of combinator from a list of validators.
#[must_use]
pub fn all_of(validators: Vec<Validator>) -> Combinator {
    Combinator::new(CombineMode::AllOf, validators)
}
