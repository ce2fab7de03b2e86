//! Leaf validator registry
//!
//! The schema compiler resolves type markers (`"integer"`, `"str"`, ...)
//! through a [`LeafRegistry`]. An unknown marker is not an error here; the
//! compiler just moves on to its next rule.

use crate::foundation::Validator;
use crate::validators::Primitive;
use std::collections::HashMap;
use std::fmt;

/// Builds a fresh leaf validator.
pub type LeafFactory = fn() -> Validator;

/// Maps type markers to atomic validators.
pub trait LeafRegistry: fmt::Debug + Send + Sync {
    /// Returns the validator for `marker`, or `None` if the marker is unknown.
    fn instantiate(&self, marker: &str) -> Option<Validator>;

    /// Returns true if `marker` is known.
    fn recognizes(&self, marker: &str) -> bool {
        self.instantiate(marker).is_some()
    }
}

/// Errors from registering a marker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The marker is already registered.
    #[error("type marker `{0}` is already registered")]
    AlreadyRegistered(String),

    /// Markers must be non-empty.
    #[error("type marker must not be empty")]
    EmptyMarker,
}

#[derive(Clone)]
enum Entry {
    Factory(LeafFactory),
    Shared(Validator),
}

impl Entry {
    fn instantiate(&self) -> Validator {
        match self {
            Self::Factory(factory) => factory(),
            Self::Shared(validator) => validator.clone(),
        }
    }
}

/// Registry of the builtin primitives plus any markers added at runtime.
///
/// ```
/// use serde_json::json;
/// use trellis_validator::foundation::{Validate, ValidateExt};
/// use trellis_validator::registry::{BuiltinRegistry, LeafRegistry};
/// use trellis_validator::validators::literal;
///
/// let mut registry = BuiltinRegistry::new();
/// registry.register_validator("localhost", literal("127.0.0.1").boxed()).unwrap();
///
/// let v = registry.instantiate("localhost").unwrap();
/// assert!(v.is_valid(&json!("127.0.0.1")));
/// assert!(registry.recognizes("int"));
/// assert!(registry.instantiate("decimal").is_none());
/// ```
#[derive(Clone)]
pub struct BuiltinRegistry {
    entries: HashMap<String, Entry>,
}

impl BuiltinRegistry {
    /// Creates a registry holding every [`Primitive`] under its name and aliases.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for primitive in Primitive::ALL {
            registry.register_primitive(primitive);
        }
        registry
    }

    /// Creates a registry with no markers at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn register_primitive(&mut self, primitive: Primitive) {
        let validator = primitive.validator();
        for name in std::iter::once(primitive.as_str()).chain(primitive.aliases().iter().copied()) {
            self.entries
                .insert(name.to_owned(), Entry::Shared(validator.clone()));
        }
    }

    /// Registers a factory under `marker`. Fails if the marker exists.
    pub fn register(
        &mut self,
        marker: impl Into<String>,
        factory: LeafFactory,
    ) -> Result<(), RegistryError> {
        self.insert(marker.into(), Entry::Factory(factory))
    }

    /// Registers one shared validator under `marker`. Fails if the marker exists.
    pub fn register_validator(
        &mut self,
        marker: impl Into<String>,
        validator: Validator,
    ) -> Result<(), RegistryError> {
        self.insert(marker.into(), Entry::Shared(validator))
    }

    /// Registers or replaces a factory under `marker`.
    pub fn register_or_replace(&mut self, marker: impl Into<String>, factory: LeafFactory) {
        let marker = marker.into();
        if self.entries.insert(marker.clone(), Entry::Factory(factory)).is_some() {
            tracing::debug!(%marker, "replaced leaf validator");
        }
    }

    fn insert(&mut self, marker: String, entry: Entry) -> Result<(), RegistryError> {
        if marker.is_empty() {
            return Err(RegistryError::EmptyMarker);
        }
        if self.entries.contains_key(&marker) {
            return Err(RegistryError::AlreadyRegistered(marker));
        }
        tracing::debug!(%marker, "registered leaf validator");
        self.entries.insert(marker, entry);
        Ok(())
    }

    /// Returns all known markers, sorted.
    #[must_use]
    pub fn markers(&self) -> Vec<&str> {
        let mut markers: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        markers.sort_unstable();
        markers
    }

    /// Number of registered markers, aliases included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no marker is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("markers", &self.markers())
            .finish()
    }
}

impl LeafRegistry for BuiltinRegistry {
    fn instantiate(&self, marker: &str) -> Option<Validator> {
        self.entries.get(marker).map(Entry::instantiate)
    }

    fn recognizes(&self, marker: &str) -> bool {
        self.entries.contains_key(marker)
    }
}
