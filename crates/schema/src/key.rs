//! Record key specifications

use crate::error::{CompileError, SpecPath};
use serde_json::Value;
use std::borrow::Cow;
use trellis_validator::combinators::KeyDescriptor;

/// Specification for one record field, before compilation.
///
/// ```
/// use trellis_schema::KeySpec;
///
/// let plain: KeySpec = "port".into();
/// let with_default: KeySpec = ("port", 2379).into();
/// assert_eq!(plain.name(), Some("port"));
/// assert_eq!(with_default.name(), Some("port"));
/// ```
#[derive(Debug, Clone)]
pub enum KeySpec {
    /// A prebuilt descriptor, used unchanged.
    Descriptor(KeyDescriptor),
    /// A required field.
    Name(Cow<'static, str>),
    /// A field that falls back to a default when absent.
    WithDefault(Cow<'static, str>, Value),
    /// A field whose absence yields nothing and no error.
    Optional(Cow<'static, str>),
    /// A loosely-typed key spec: `"x"`, `["x", default]`,
    /// `{"name": "x", "default": v}` or `{"name": "x", "optional": true}`.
    Raw(Value),
}

impl KeySpec {
    /// A required field.
    pub fn required(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }

    /// A field with a default.
    pub fn with_default(name: impl Into<Cow<'static, str>>, default: impl Into<Value>) -> Self {
        Self::WithDefault(name.into(), default.into())
    }

    /// An optional field.
    pub fn optional(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Optional(name.into())
    }

    /// The field name, when it can be read without compiling.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Descriptor(descriptor) => Some(descriptor.name()),
            Self::Name(name) | Self::WithDefault(name, _) | Self::Optional(name) => Some(&**name),
            Self::Raw(Value::String(name)) => Some(name.as_str()),
            Self::Raw(Value::Array(items)) => items.first().and_then(Value::as_str),
            Self::Raw(Value::Object(fields)) => fields.get("name").and_then(Value::as_str),
            Self::Raw(_) => None,
        }
    }

    /// Compiles the key alone; the value validator is attached later by
    /// the enclosing record.
    pub(crate) fn to_descriptor(&self, path: &SpecPath) -> Result<KeyDescriptor, CompileError> {
        match self {
            Self::Descriptor(descriptor) => {
                field_name(descriptor.name(), path)?;
                Ok(descriptor.clone())
            }
            Self::Name(name) => Ok(KeyDescriptor::required(field_name(name, path)?)),
            Self::WithDefault(name, default) => Ok(KeyDescriptor::with_default(
                field_name(name, path)?,
                default.clone(),
            )),
            Self::Optional(name) => Ok(KeyDescriptor::optional(field_name(name, path)?)),
            Self::Raw(raw) => raw_descriptor(raw, path),
        }
    }
}

fn field_name(name: &str, path: &SpecPath) -> Result<String, CompileError> {
    if name.is_empty() {
        Err(CompileError::unrecognized_key(path, "field name must not be empty"))
    } else {
        Ok(name.to_owned())
    }
}

fn raw_descriptor(raw: &Value, path: &SpecPath) -> Result<KeyDescriptor, CompileError> {
    let unrecognized = || CompileError::unrecognized_key(path, format!("unsupported key shape {raw}"));

    match raw {
        Value::String(name) => Ok(KeyDescriptor::required(field_name(name, path)?)),
        Value::Array(items) => match items.as_slice() {
            [Value::String(name), default] => Ok(KeyDescriptor::with_default(
                field_name(name, path)?,
                default.clone(),
            )),
            _ => Err(unrecognized()),
        },
        Value::Object(fields) => {
            let Some(Value::String(name)) = fields.get("name") else {
                return Err(unrecognized());
            };
            if fields
                .keys()
                .any(|k| !matches!(k.as_str(), "name" | "default" | "optional"))
            {
                return Err(unrecognized());
            }
            let name = field_name(name, path)?;
            match (fields.get("default"), fields.get("optional")) {
                (Some(default), None | Some(Value::Bool(false))) => {
                    Ok(KeyDescriptor::with_default(name, default.clone()))
                }
                (None, Some(Value::Bool(true))) => Ok(KeyDescriptor::optional(name)),
                (None, None | Some(Value::Bool(false))) => Ok(KeyDescriptor::required(name)),
                _ => Err(unrecognized()),
            }
        }
        _ => Err(unrecognized()),
    }
}

impl From<&str> for KeySpec {
    fn from(name: &str) -> Self {
        Self::Name(Cow::Owned(name.to_owned()))
    }
}

impl From<String> for KeySpec {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl<V: Into<Value>> From<(&str, V)> for KeySpec {
    fn from((name, default): (&str, V)) -> Self {
        Self::WithDefault(Cow::Owned(name.to_owned()), default.into())
    }
}

impl<V: Into<Value>> From<(String, V)> for KeySpec {
    fn from((name, default): (String, V)) -> Self {
        Self::WithDefault(Cow::Owned(name), default.into())
    }
}

impl From<KeyDescriptor> for KeySpec {
    fn from(descriptor: KeyDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}
