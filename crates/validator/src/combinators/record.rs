//! RECORD validator - checks a JSON object against declared fields
//!
//! Fields are checked in declaration order; that order decides the order of
//! reported errors and of keys in the coerced output, never acceptance.

use crate::combinators::KeyDescriptor;
use crate::foundation::{Validate, ValidationError, ValidationErrors, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// What a record does with input keys it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraKeys {
    /// Every undeclared key is an `extra_key` error.
    #[default]
    Reject,
    /// Undeclared keys are dropped from the output.
    Ignore,
    /// Undeclared keys are copied to the output unchanged.
    Keep,
}

/// Validates a JSON object field by field.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use trellis_validator::combinators::{KeyDescriptor, Record};
/// use trellis_validator::foundation::{Validate, ValidateExt};
/// use trellis_validator::validators::{integer, string};
///
/// let person = Record::new(vec![
///     KeyDescriptor::required("name").with_validator(string().boxed()),
///     KeyDescriptor::with_default("age", json!(0)).with_validator(integer().boxed()),
/// ]);
///
/// assert_eq!(person.check(&json!({"name": "Ann"})).unwrap(), json!({"name": "Ann", "age": 0}));
/// ```
#[derive(Debug, Clone)]
pub struct Record {
    keys: Vec<KeyDescriptor>,
    extra: ExtraKeys,
    fail_fast: bool,
}

impl Record {
    /// Creates a record over `keys` that rejects undeclared keys.
    #[must_use]
    pub fn new(keys: Vec<KeyDescriptor>) -> Self {
        Self {
            keys,
            extra: ExtraKeys::Reject,
            fail_fast: false,
        }
    }

    /// Sets the policy for undeclared keys.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_extra(mut self, extra: ExtraKeys) -> Self {
        self.extra = extra;
        self
    }

    /// Sets whether to stop on the first failing field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Returns the declared fields in order.
    #[must_use]
    pub fn keys(&self) -> &[KeyDescriptor] {
        &self.keys
    }

    /// Looks up a declared field by name.
    #[must_use]
    pub fn key(&self, name: &str) -> Option<&KeyDescriptor> {
        self.keys.iter().find(|key| key.name() == name)
    }

    /// Returns the policy for undeclared keys.
    #[must_use]
    pub fn extra(&self) -> ExtraKeys {
        self.extra
    }
}

impl Validate for Record {
    fn check(&self, input: &Value) -> ValidationResult {
        let Value::Object(object) = input else {
            return Err(ValidationError::type_mismatch("object", input));
        };

        let mut output = Map::with_capacity(self.keys.len());
        let mut errors = ValidationErrors::new();

        for key in &self.keys {
            match key.extract(object) {
                Ok(Some(value)) => {
                    output.insert(key.name().to_owned(), value);
                }
                Ok(None) => {}
                Err(e) if self.fail_fast => return Err(e),
                Err(e) => errors.add(e),
            }
        }

        if self.extra != ExtraKeys::Ignore {
            let declared: HashSet<&str> = self.keys.iter().map(KeyDescriptor::name).collect();
            for (name, value) in object {
                if declared.contains(name.as_str()) {
                    continue;
                }
                match self.extra {
                    ExtraKeys::Keep => {
                        output.insert(name.clone(), value.clone());
                    }
                    _ => {
                        let e = ValidationError::extra_key().at(name.clone());
                        if self.fail_fast {
                            return Err(e);
                        }
                        errors.add(e);
                    }
                }
            }
        }

        errors.into_result("record_invalid", |n| format!("{n} field(s) failed validation"))?;
        Ok(Value::Object(output))
    }
}
