//! Compile-time errors and spec paths

use std::fmt;
use trellis_validator::combinators::CombineMode;

// ============================================================================
// SPEC PATH
// ============================================================================

/// One step into a specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecSegment {
    /// A record field, by name.
    Field(String),
    /// A sequence position.
    Index(usize),
    /// A combinator child.
    Alternative {
        /// Mode of the enclosing combinator.
        mode: CombineMode,
        /// Child position.
        index: usize,
    },
}

/// Location of a fragment inside the overall specification.
///
/// Rendered as `$` for the root, `$.user.tags[0]` for nested fields and
/// positions, `$<any_of#1>` for combinator children.
///
/// ```
/// use trellis_schema::{SpecPath, SpecSegment};
///
/// let path = SpecPath::root()
///     .child(SpecSegment::Field("user".into()))
///     .child(SpecSegment::Index(0));
/// assert_eq!(path.to_string(), "$.user[0]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SpecPath(Vec<SpecSegment>);

impl SpecPath {
    /// The root of the specification.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns this path extended by `segment`.
    #[must_use]
    pub fn child(&self, segment: SpecSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Returns the segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[SpecSegment] {
        &self.0
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SpecPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                SpecSegment::Field(name) if is_plain_name(name) => write!(f, ".{name}")?,
                SpecSegment::Field(name) => write!(f, "[{}]", serde_json::Value::from(name.as_str()))?,
                SpecSegment::Index(index) => write!(f, "[{index}]")?,
                SpecSegment::Alternative { mode, index } => write!(f, "<{mode}#{index}>")?,
            }
        }
        Ok(())
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['.', '[', ']', '"', '<'])
}

// ============================================================================
// COMPILE ERROR
// ============================================================================

/// Error type for schema compilation.
///
/// Any of these aborts the whole compile call; no partial validator is
/// returned. Compilation is deterministic, so retrying never helps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A specification fragment matched no compile rule.
    #[error("unrecognized specification at {path}: {description}")]
    UnrecognizedSpecification { path: SpecPath, description: String },

    /// A record key specification has no recognized shape.
    #[error("unrecognized key specification at {path}: {description}")]
    UnrecognizedKeySpecification { path: SpecPath, description: String },

    /// Two fields of one record share a name.
    #[error("duplicate field name `{name}` in record at {path}")]
    DuplicateFieldName { path: SpecPath, name: String },

    /// A specification reaches itself along the current compile path.
    #[error("cyclic specification at {path}")]
    CyclicSpecification { path: SpecPath },

    /// Nesting is deeper than the configured limit.
    #[error("specification at {path} nests deeper than {max_depth} levels")]
    DepthExceeded { path: SpecPath, max_depth: usize },
}

impl CompileError {
    pub(crate) fn unrecognized(path: &SpecPath, description: impl Into<String>) -> Self {
        Self::UnrecognizedSpecification {
            path: path.clone(),
            description: description.into(),
        }
    }

    pub(crate) fn unrecognized_key(path: &SpecPath, description: impl Into<String>) -> Self {
        Self::UnrecognizedKeySpecification {
            path: path.clone(),
            description: description.into(),
        }
    }

    /// Where in the specification the error was found.
    #[must_use]
    pub fn path(&self) -> &SpecPath {
        match self {
            Self::UnrecognizedSpecification { path, .. }
            | Self::UnrecognizedKeySpecification { path, .. }
            | Self::DuplicateFieldName { path, .. }
            | Self::CyclicSpecification { path }
            | Self::DepthExceeded { path, .. } => path,
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnrecognizedSpecification { .. } => "SCHEMA_UNRECOGNIZED",
            Self::UnrecognizedKeySpecification { .. } => "SCHEMA_UNRECOGNIZED_KEY",
            Self::DuplicateFieldName { .. } => "SCHEMA_DUPLICATE_FIELD",
            Self::CyclicSpecification { .. } => "SCHEMA_CYCLE",
            Self::DepthExceeded { .. } => "SCHEMA_TOO_DEEP",
        }
    }

    /// Returns true for [`CompileError::UnrecognizedSpecification`].
    #[must_use]
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnrecognizedSpecification { .. })
    }

    /// Returns true for [`CompileError::UnrecognizedKeySpecification`].
    #[must_use]
    pub fn is_unrecognized_key(&self) -> bool {
        matches!(self, Self::UnrecognizedKeySpecification { .. })
    }

    /// Returns true for [`CompileError::DuplicateFieldName`].
    #[must_use]
    pub fn is_duplicate_field(&self) -> bool {
        matches!(self, Self::DuplicateFieldName { .. })
    }

    /// Returns true for [`CompileError::CyclicSpecification`].
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CyclicSpecification { .. })
    }

    /// Whether the operation might succeed if retried with the same input.
    ///
    /// Always `false`.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}
