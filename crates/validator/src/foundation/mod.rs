//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Validate`], [`ValidateExt`]
//! - **Handle**: [`Validator`], the shared type-erased validator
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`PathSegment`]
//!
//! # Architecture
//!
//! ## 1. One input type
//!
//! Every validator checks a [`serde_json::Value`] and returns a value, so
//! validators built from different shapes nest freely:
//!
//! ```
//! use serde_json::json;
//! use trellis_validator::prelude::*;
//!
//! let ids = Each::new(integer().boxed());
//! assert_eq!(ids.check(&json!(["1", 2])).unwrap(), json!([1, 2]));
//! ```
//!
//! ## 2. Composition
//!
//! Validators compose using logical combinators:
//!
//! ```
//! use serde_json::json;
//! use trellis_validator::prelude::*;
//!
//! let user = null().or(string());
//! assert!(user.is_valid(&json!(null)));
//! ```
//!
//! ## 3. Rich Error Information
//!
//! Errors are structured and carry the path of the failing value:
//!
//! ```
//! use trellis_validator::foundation::ValidationError;
//!
//! let error = ValidationError::new("type_mismatch", "expected integer")
//!     .at("port")
//!     .at("etcd")
//!     .with_param("expected", "integer");
//! assert_eq!(error.field.as_deref(), Some("etcd.port"));
//! ```

pub mod error;
pub mod traits;

pub use error::{PathSegment, ValidationError, ValidationErrors, ValidationResult, json_kind};
pub use traits::{AsAny, Validate, ValidateExt, Validator};

