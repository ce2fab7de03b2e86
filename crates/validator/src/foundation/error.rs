//! Error types for validation failures
//!
//! This module provides a rich, structured error type that supports
//! nested errors, field paths, error codes, and parameterized messages.
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes and messages.

use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// PATH SEGMENTS
// ============================================================================

/// One step of a data path: a record key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A record field, rendered as `name` (or `.name` after another segment).
    /// Names containing `.`, `[`, `]` or `"` render quoted: `["a.b"]`.
    Key(Cow<'static, str>),
    /// A sequence position, rendered as `[index]`.
    Index(usize),
}

impl PathSegment {
    /// Joins this segment in front of an already-rendered relative path.
    fn prepend_to(&self, rest: Option<&str>) -> String {
        let head = match self {
            Self::Key(key) if is_plain_key(key) => key.to_string(),
            Self::Key(key) => format!("[{}]", Value::String(key.to_string())),
            Self::Index(index) => format!("[{index}]"),
        };
        match rest {
            None => head,
            Some(rest) if rest.starts_with('[') => head + rest,
            Some(rest) => format!("{head}.{rest}"),
        }
    }
}

/// Keys that would read as path syntax are rendered quoted, as `["a.b"]`.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', ']', '"'])
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&'static str> for PathSegment {
    fn from(key: &'static str) -> Self {
        Self::Key(Cow::Borrowed(key))
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(Cow::Owned(key))
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation error with support for nested errors and metadata.
///
/// Uses `Cow<'static, str>` for zero-allocation when error codes and messages
/// are known at compile time (the common case).
///
/// # Examples
///
/// ## Simple error
///
/// ```
/// use trellis_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("type_mismatch", "Expected integer");
/// assert_eq!(error.code, "type_mismatch");
/// ```
///
/// ## Nested errors
///
/// ```
/// use trellis_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("record_invalid", "1 field failed")
///     .with_nested_error(ValidationError::required().at("email"));
/// assert_eq!(error.nested[0].field.as_deref(), Some("email"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error code for programmatic handling and i18n.
    ///
    /// Examples: "type_mismatch", "required", "extra_key"
    pub code: Cow<'static, str>,

    /// Human-readable error message in English.
    pub message: Cow<'static, str>,

    /// Path of the offending value relative to the checked root.
    ///
    /// Examples: "user.email", "items[0].name", "[2]"
    pub field: Option<Cow<'static, str>>,

    /// Parameters for the error message template.
    ///
    /// Stored as ordered key-value pairs (typically 0-2 params).
    pub params: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>,

    /// Nested validation errors for records, sequences and combinators.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: SmallVec::new(),
            nested: Vec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds nested validation errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Adds a single nested error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested_error(mut self, error: ValidationError) -> Self {
        self.nested.push(error);
        self
    }

    /// Re-roots this error (and every nested error) under `segment`.
    ///
    /// Container validators call this on child failures so that the final
    /// error carries absolute paths such as `servers[1].port`.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        self.prefix_with(&segment);
        self
    }

    fn prefix_with(&mut self, segment: &PathSegment) {
        self.field = Some(Cow::Owned(segment.prepend_to(self.field.as_deref())));
        for nested in &mut self.nested {
            nested.prefix_with(segment);
        }
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if this error has nested errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Returns the number of errors (including nested).
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(ValidationError::total_error_count)
            .sum::<usize>()
    }

    /// Flattens all errors into a single list (depth-first).
    #[must_use]
    pub fn flatten(&self) -> Vec<&ValidationError> {
        let mut result = vec![self];
        for nested in &self.nested {
            result.extend(nested.flatten());
        }
        result
    }

    /// Finds the first error (depth-first) reported at exactly `path`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&ValidationError> {
        self.flatten()
            .into_iter()
            .find(|error| error.field.as_deref() == Some(path))
    }

    /// Collects leaf failures into a flat `path -> message` map.
    ///
    /// Errors without a path are keyed by `$`. When several leaves share a
    /// path the first one wins.
    #[must_use]
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for error in self.flatten() {
            if error.has_nested() {
                continue;
            }
            let key = error.field.as_deref().unwrap_or("$").to_owned();
            out.entry(key).or_insert_with(|| error.message.to_string());
        }
        out
    }

    /// Converts the error to a JSON structure.
    pub fn to_json_value(&self) -> Value {
        use serde_json::json;

        let params: serde_json::Map<String, Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "field": self.field,
            "params": params,
            "nested": self.nested.iter().map(ValidationError::to_json_value).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        if !self.nested.is_empty() {
            write!(f, "\n  Nested errors:")?;
            for (i, error) in self.nested.iter().enumerate() {
                write!(f, "\n    {}. {}", i + 1, error)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error for a missing record field.
    #[must_use]
    pub fn required() -> Self {
        Self::new("required", "is required")
    }

    /// Creates an "extra_key" error for an undeclared record field.
    #[must_use]
    pub fn extra_key() -> Self {
        Self::new("extra_key", "is not allowed")
    }

    /// Creates a "type_mismatch" error naming the expected and actual kinds.
    pub fn type_mismatch(expected: impl Into<Cow<'static, str>>, actual: &Value) -> Self {
        let expected = expected.into();
        let actual = json_kind(actual);
        Self::new(
            "type_mismatch",
            format!("expected {expected}, got {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual)
    }
}

/// Short name of a JSON value's kind, used in messages.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// A validation result carrying the coerced value.
pub type ValidationResult<T = Value> = Result<T, ValidationError>;

/// A collection of validation errors gathered by one container check.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns the number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Folds the collection into one parent error, or `Ok(())` if empty.
    pub fn into_result(
        self,
        code: &'static str,
        message: impl FnOnce(usize) -> String,
    ) -> ValidationResult<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let count = self.errors.len();
        Err(ValidationError::new(code, message(count))
            .with_param("failed_count", count.to_string())
            .with_nested(self.errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn at_builds_nested_paths() {
        let error = ValidationError::required().at("name").at(1).at("users");
        assert_eq!(error.field.as_deref(), Some("users[1].name"));

        let error = ValidationError::required().at(0).at(2);
        assert_eq!(error.field.as_deref(), Some("[2][0]"));
    }

    #[test]
    fn dotted_keys_do_not_collide_with_nesting() {
        let flat = ValidationError::required().at("a.b");
        let nested = ValidationError::required().at("b").at("a");
        assert_eq!(flat.field.as_deref(), Some(r#"["a.b"]"#));
        assert_eq!(nested.field.as_deref(), Some("a.b"));

        let under_parent = ValidationError::required().at("[0]").at(3).at("cfg");
        assert_eq!(under_parent.field.as_deref(), Some(r#"cfg[3]["[0]"]"#));
        assert_eq!(ValidationError::required().at("").field.as_deref(), Some(r#"[""]"#));
    }

    #[test]
    fn at_reroots_nested_errors() {
        let error = ValidationError::new("record_invalid", "1 field failed")
            .with_nested_error(ValidationError::required().at("port"))
            .at("server");
        assert_eq!(error.field.as_deref(), Some("server"));
        assert_eq!(error.nested[0].field.as_deref(), Some("server.port"));
    }

    #[test]
    fn type_mismatch_names_both_kinds() {
        let error = ValidationError::type_mismatch("integer", &json!("x"));
        assert_eq!(error.code, "type_mismatch");
        assert_eq!(error.param("expected"), Some("integer"));
        assert_eq!(error.param("actual"), Some("string"));
    }

    #[test]
    fn field_messages_lists_leaves_only() {
        let error = ValidationError::new("record_invalid", "2 fields failed")
            .with_nested_error(ValidationError::required().at("name"))
            .with_nested_error(
                ValidationError::new("each_failed", "1 element failed")
                    .with_nested_error(ValidationError::type_mismatch("integer", &json!("x")).at(1))
                    .at("tags"),
            );
        let messages = error.field_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages["name"], "is required");
        assert!(messages["tags[1]"].contains("expected integer"));
    }

    #[test]
    fn display_includes_nested() {
        let error = ValidationError::new("any_of_failed", "All 2 alternatives failed")
            .with_nested(vec![
                ValidationError::new("a", "first"),
                ValidationError::new("b", "second"),
            ]);
        let rendered = error.to_string();
        assert!(rendered.contains("1. a: first"));
        assert!(rendered.contains("2. b: second"));
        assert_eq!(error.total_error_count(), 3);
    }

    #[test]
    fn errors_fold_into_parent() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert!(errors.clone().into_result("x", |_| String::new()).is_ok());
        errors.add(ValidationError::required());
        assert_eq!(errors.len(), 1);
        let parent = errors
            .into_result("record_invalid", |n| format!("{n} field(s) failed"))
            .unwrap_err();
        assert_eq!(parent.param("failed_count"), Some("1"));
        assert_eq!(parent.nested.len(), 1);
    }
}
