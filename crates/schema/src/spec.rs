//! Specification data model
//!
//! A [`Specification`] is the untyped input of the compiler. It is plain
//! data: building one never validates anything, and compiling one never
//! mutates it.

use crate::key::KeySpec;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};
use trellis_validator::combinators::{CombineMode, ExtraKeys};
use trellis_validator::foundation::{Validate, Validator};
use trellis_validator::validators::Primitive;

// ============================================================================
// SPECIFICATION
// ============================================================================

/// A schema fragment awaiting compilation.
///
/// ```
/// use serde_json::json;
/// use trellis_schema::{RecordSpec, Specification, compile};
/// use trellis_validator::foundation::Validate;
///
/// let spec: Specification = RecordSpec::new()
///     .field("name", "string")
///     .field(("age", 0), "integer")
///     .into();
///
/// let person = compile(&spec).unwrap();
/// assert_eq!(
///     person.check(&json!({"name": "Ann"})).unwrap(),
///     json!({"name": "Ann", "age": 0}),
/// );
/// ```
#[derive(Debug, Clone)]
pub enum Specification {
    /// An already-built validator, passed through unchanged.
    Validator(Validator),
    /// A primitive type marker resolved through the leaf registry.
    Type(String),
    /// An ordered record shape.
    Record(RecordSpec),
    /// One element spec for a homogeneous list, or N positional specs.
    Sequence(Vec<Specification>),
    /// Alternatives (any-of) or requirements (all-of).
    Combinator {
        /// How children are joined.
        mode: CombineMode,
        /// Child specifications, at least two.
        children: Vec<Specification>,
    },
    /// A scalar that input must equal exactly.
    Literal(Value),
    /// A shared slot defined after creation.
    Deferred(DeferredSpec),
}

impl Specification {
    /// Wraps a built validator.
    pub fn validator<V: Validate + 'static>(validator: V) -> Self {
        Self::Validator(Validator::new(validator))
    }

    /// A type marker such as `"integer"` or `"str"`.
    pub fn marker(marker: impl Into<String>) -> Self {
        Self::Type(marker.into())
    }

    /// A literal value; compiles only if the value is a scalar.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// A homogeneous list of `element`.
    pub fn list_of(element: impl Into<Specification>) -> Self {
        Self::Sequence(vec![element.into()])
    }

    /// A fixed-arity tuple, one spec per position.
    pub fn tuple<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Specification>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Reads a specification from JSON.
    ///
    /// Strings are type markers, arrays are sequence shapes, objects are
    /// record shapes of required fields, other scalars are literals.
    ///
    /// ```
    /// use serde_json::json;
    /// use trellis_schema::Specification;
    ///
    /// let spec = Specification::from_json(&json!({"tags": ["string"], "mode": "int"}));
    /// assert_eq!(spec.kind(), "record");
    /// ```
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(marker) => Self::Type(marker.clone()),
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from_json).collect()),
            Value::Object(fields) => Self::Record(
                fields
                    .iter()
                    .map(|(name, spec)| (KeySpec::from(name.as_str()), Self::from_json(spec)))
                    .collect(),
            ),
            scalar => Self::Literal(scalar.clone()),
        }
    }

    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validator(_) => "validator",
            Self::Type(_) => "type",
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
            Self::Combinator { .. } => "combinator",
            Self::Literal(_) => "literal",
            Self::Deferred(_) => "deferred",
        }
    }

    /// One-line description of the fragment, for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Validator(v) => format!("validator {v:?}"),
            Self::Type(marker) => format!("type marker `{marker}`"),
            Self::Record(record) => format!("record of {} field(s)", record.len()),
            Self::Sequence(items) => format!("sequence of {} item(s)", items.len()),
            Self::Combinator { mode, children } => {
                format!("{mode} combinator of {} child(ren)", children.len())
            }
            Self::Literal(value) => format!("literal {value}"),
            Self::Deferred(slot) => format!("{slot:?}"),
        }
    }
}

impl From<Validator> for Specification {
    fn from(validator: Validator) -> Self {
        Self::Validator(validator)
    }
}

impl From<&str> for Specification {
    fn from(marker: &str) -> Self {
        Self::Type(marker.to_owned())
    }
}

impl From<String> for Specification {
    fn from(marker: String) -> Self {
        Self::Type(marker)
    }
}

impl From<Primitive> for Specification {
    fn from(primitive: Primitive) -> Self {
        Self::Type(primitive.as_str().to_owned())
    }
}

impl From<RecordSpec> for Specification {
    fn from(record: RecordSpec) -> Self {
        Self::Record(record)
    }
}

impl From<Vec<Specification>> for Specification {
    fn from(items: Vec<Specification>) -> Self {
        Self::Sequence(items)
    }
}

impl From<DeferredSpec> for Specification {
    fn from(slot: DeferredSpec) -> Self {
        Self::Deferred(slot)
    }
}

// ============================================================================
// RECORD SHAPE
// ============================================================================

/// Ordered field → specification pairs, plus an optional extra key policy.
#[derive(Debug, Clone, Default)]
pub struct RecordSpec {
    fields: Vec<(KeySpec, Specification)>,
    extra: Option<ExtraKeys>,
}

impl RecordSpec {
    /// Creates an empty record shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, key: impl Into<KeySpec>, spec: impl Into<Specification>) -> Self {
        self.fields.push((key.into(), spec.into()));
        self
    }

    /// Copies undeclared keys through unchanged.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_extra(self) -> Self {
        self.with_extra(ExtraKeys::Keep)
    }

    /// Drops undeclared keys from the output.
    #[must_use = "builder methods must be chained or built"]
    pub fn ignore_extra(self) -> Self {
        self.with_extra(ExtraKeys::Ignore)
    }

    /// Sets the extra key policy, overriding the compiler default.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_extra(mut self, extra: ExtraKeys) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(KeySpec, Specification)] {
        &self.fields
    }

    /// Returns the extra key policy, if set on this shape.
    #[must_use]
    pub fn extra(&self) -> Option<ExtraKeys> {
        self.extra
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, S> FromIterator<(K, S)> for RecordSpec
where
    K: Into<KeySpec>,
    S: Into<Specification>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
            extra: None,
        }
    }
}

// ============================================================================
// DEFERRED SPECIFICATION
// ============================================================================

/// A shareable specification slot that is defined after it is created.
///
/// Clones share the slot. Within one compile call every occurrence of the
/// same slot compiles to the same validator. A slot that contains itself
/// compiles to [`CompileError::CyclicSpecification`](crate::CompileError).
///
/// ```
/// use trellis_schema::{DeferredSpec, RecordSpec, compile};
///
/// let node = DeferredSpec::new();
/// node.define(RecordSpec::new().field("next", node.clone())).unwrap();
///
/// assert!(compile(&node.into()).unwrap_err().is_cycle());
/// ```
#[derive(Clone, Default)]
pub struct DeferredSpec(Arc<OnceLock<Specification>>);

impl DeferredSpec {
    /// Creates an undefined slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot already holding `spec`.
    pub fn defined(spec: impl Into<Specification>) -> Self {
        Self(Arc::new(OnceLock::from(spec.into())))
    }

    /// Defines the slot. Fails, handing the spec back, if already defined.
    pub fn define(&self, spec: impl Into<Specification>) -> Result<(), Specification> {
        self.0.set(spec.into())
    }

    /// Returns the definition, if any.
    #[must_use]
    pub fn get(&self) -> Option<&Specification> {
        self.0.get()
    }

    /// Returns true once the slot is defined.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.0.get().is_some()
    }

    /// Returns true if both handles share one slot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the slot, stable while any handle is alive.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

// The slot may contain itself, so Debug never descends into it.
impl fmt::Debug for DeferredSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredSpec")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("defined", &self.is_defined())
            .finish()
    }
}
