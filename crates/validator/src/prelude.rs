//! Prelude module for convenient imports.
//!
//! Provides a single `use trellis_validator::prelude::*;` import that brings
//! in all commonly needed traits, types, validators, and combinators.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use trellis_validator::prelude::*;
//!
//! let endpoint = Tuple::new(vec![string().boxed(), integer().boxed()]);
//! assert!(endpoint.is_valid(&json!(["127.0.0.1", "2379"])));
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, handle
// ============================================================================

pub use crate::foundation::{
    PathSegment, Validate, ValidateExt, ValidationError, ValidationErrors, ValidationResult,
    Validator,
};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

pub use crate::validators::{
    Primitive, any, boolean, exact, float, integer, list, literal, mapping, null, string,
};

// ============================================================================
// COMBINATORS: Composition functions and types
// ============================================================================

pub use crate::combinators::{
    CombineMode, Combinator, Each, ExtraKeys, KeyDescriptor, OnMissing, Record, Tuple, all_of,
    any_of, each,
};

// ============================================================================
// REGISTRY
// ============================================================================

pub use crate::registry::{BuiltinRegistry, LeafRegistry};
