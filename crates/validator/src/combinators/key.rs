//! KEY descriptor - one named field of a record shape
//!
//! A [`KeyDescriptor`] couples a field name with the validator for its value
//! and with what happens when the field is absent from the input.

use crate::foundation::{Validate, ValidationError, Validator};
use serde_json::Value;
use std::borrow::Cow;

// ============================================================================
// ABSENCE POLICY
// ============================================================================

/// What a record does when a declared field is missing from the input.
#[derive(Debug, Clone, PartialEq)]
pub enum OnMissing {
    /// Absence is a `required` error.
    Error,
    /// Absence substitutes this value.
    Default(Value),
    /// Absence is accepted and the field stays absent in the output.
    Skip,
}

// ============================================================================
// KEY DESCRIPTOR
// ============================================================================

/// Describes one record field.
///
/// The value validator may be left unset while the descriptor is built on its
/// own; the enclosing record shape attaches it. An unset validator passes the
/// field value through unchanged.
///
/// # Examples
///
/// ```
/// use trellis_validator::combinators::KeyDescriptor;
/// use serde_json::json;
///
/// let port = KeyDescriptor::with_default("port", json!(2379));
/// assert_eq!(port.name(), "port");
/// assert_eq!(port.default_value(), Some(&json!(2379)));
/// assert!(!port.is_required());
/// ```
#[derive(Debug, Clone)]
pub struct KeyDescriptor {
    name: Cow<'static, str>,
    validator: Option<Validator>,
    on_missing: OnMissing,
}

impl KeyDescriptor {
    /// Creates a required field with no value validator yet.
    pub fn required(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            validator: None,
            on_missing: OnMissing::Error,
        }
    }

    /// Creates a field that falls back to `default` when absent.
    pub fn with_default(name: impl Into<Cow<'static, str>>, default: Value) -> Self {
        Self {
            name: name.into(),
            validator: None,
            on_missing: OnMissing::Default(default),
        }
    }

    /// Creates a field whose absence is neither an error nor defaulted.
    pub fn optional(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            validator: None,
            on_missing: OnMissing::Skip,
        }
    }

    /// Attaches (or replaces) the value validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value validator, if one is attached.
    #[must_use]
    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    /// Returns the absence policy.
    #[must_use]
    pub fn on_missing(&self) -> &OnMissing {
        &self.on_missing
    }

    /// Returns the default substituted on absence, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        match &self.on_missing {
            OnMissing::Default(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if absence is an error.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.on_missing, OnMissing::Error)
    }

    /// Checks the field against `input`, the enclosing record object.
    ///
    /// Returns `Ok(None)` when the field is absent and skippable. A substituted
    /// default goes through the value validator like a present value. Errors
    /// are rooted at this field's name.
    pub fn extract(
        &self,
        input: &serde_json::Map<String, Value>,
    ) -> Result<Option<Value>, ValidationError> {
        match input.get(self.name()) {
            Some(value) => self.check_value(value).map(Some),
            None => match &self.on_missing {
                OnMissing::Error => Err(ValidationError::required().at(self.name.clone().into_owned())),
                OnMissing::Default(value) => self.check_value(value).map(Some),
                OnMissing::Skip => Ok(None),
            },
        }
    }

    fn check_value(&self, value: &Value) -> Result<Value, ValidationError> {
        match &self.validator {
            Some(validator) => validator
                .check(value)
                .map_err(|err| err.at(self.name.clone().into_owned())),
            None => Ok(value.clone()),
        }
    }
}
