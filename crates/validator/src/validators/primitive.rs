//! Primitive leaf validators
//!
//! One validator per JSON kind. The numeric ones coerce: `integer` accepts
//! integral floats and decimal strings, `float` accepts any number and
//! numeric strings. The others accept exactly their kind and return it
//! unchanged.

use crate::foundation::{ValidationError, Validator, json_kind};
use serde_json::{Number, Value};
use std::fmt;

// ============================================================================
// PRIMITIVE MARKERS
// ============================================================================

/// The primitive type markers understood by the builtin registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Anything, unchanged.
    Any,
    /// `null` only.
    Null,
    /// `true` / `false`.
    Boolean,
    /// Whole numbers.
    Integer,
    /// Any number, as a float.
    Float,
    /// Strings.
    String,
    /// Arrays of anything.
    List,
    /// Objects of anything.
    Mapping,
}

impl Primitive {
    /// Every primitive, in registration order.
    pub const ALL: [Self; 8] = [
        Self::Any,
        Self::Null,
        Self::Boolean,
        Self::Integer,
        Self::Float,
        Self::String,
        Self::List,
        Self::Mapping,
    ];

    /// Canonical marker name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::List => "list",
            Self::Mapping => "mapping",
        }
    }

    /// Alternative marker names accepted for this primitive.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Boolean => &["bool"],
            Self::Integer => &["int"],
            Self::Float => &["number"],
            Self::String => &["str"],
            Self::List => &["array"],
            Self::Mapping => &["object"],
            Self::Any | Self::Null => &[],
        }
    }

    /// Builds the validator for this primitive.
    #[must_use]
    pub fn validator(self) -> Validator {
        match self {
            Self::Any => Validator::new(Any),
            Self::Null => Validator::new(Null),
            Self::Boolean => Validator::new(Boolean),
            Self::Integer => Validator::new(Integer),
            Self::Float => Validator::new(Float),
            Self::String => Validator::new(Str),
            Self::List => Validator::new(List),
            Self::Mapping => Validator::new(Mapping),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LEAF VALIDATORS
// ============================================================================

crate::validator! {
    /// Accepts any value unchanged.
    pub Any;
    check(input) { Ok(input.clone()) }
    fn any();
}

crate::validator! {
    /// Accepts only `null`.
    pub Null;
    rule(input) { input.is_null() }
    error(input) { ValidationError::type_mismatch("null", input) }
    fn null();
}

crate::validator! {
    /// Accepts only booleans.
    pub Boolean;
    rule(input) { input.is_boolean() }
    error(input) { ValidationError::type_mismatch("boolean", input) }
    fn boolean();
}

crate::validator! {
    /// Accepts whole numbers, integral floats and decimal integer strings.
    pub Integer;
    check(input) { coerce_integer(input) }
    fn integer();
}

crate::validator! {
    /// Accepts any finite number or numeric string, producing a float.
    pub Float;
    check(input) { coerce_float(input) }
    fn float();
}

crate::validator! {
    /// Accepts only strings.
    pub Str;
    rule(input) { input.is_string() }
    error(input) { ValidationError::type_mismatch("string", input) }
    fn string();
}

crate::validator! {
    /// Accepts any array.
    pub List;
    rule(input) { input.is_array() }
    error(input) { ValidationError::type_mismatch("array", input) }
    fn list();
}

crate::validator! {
    /// Accepts any object.
    pub Mapping;
    rule(input) { input.is_object() }
    error(input) { ValidationError::type_mismatch("object", input) }
    fn mapping();
}

// ============================================================================
// COERCIONS
// ============================================================================

fn not_an_integer(input: &Value) -> ValidationError {
    ValidationError::new("not_integer", "value is not an integer")
        .with_param("actual", json_kind(input))
}

fn coerce_integer(input: &Value) -> Result<Value, ValidationError> {
    match input {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(input.clone()),
        Value::Number(n) => n
            .as_f64()
            .and_then(integral)
            .map(Value::from)
            .ok_or_else(|| not_an_integer(input)),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                Ok(Value::from(n))
            } else if let Ok(n) = s.parse::<u64>() {
                Ok(Value::from(n))
            } else {
                Err(not_an_integer(input))
            }
        }
        _ => Err(ValidationError::type_mismatch("integer", input)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn coerce_float(input: &Value) -> Result<Value, ValidationError> {
    let parsed = match input {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => return Err(ValidationError::type_mismatch("float", input)),
    };
    parsed
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| {
            ValidationError::new("not_float", "value is not a finite number")
                .with_param("actual", json_kind(input))
        })
}
