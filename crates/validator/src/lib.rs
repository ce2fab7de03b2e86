//! # trellis-validator
//!
//! Composable validators over JSON values: the capability every compiled
//! schema implements, plus the structural and leaf validators it is built from.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use trellis_validator::prelude::*;
//!
//! let person = Record::new(vec![
//!     KeyDescriptor::required("name").with_validator(string().boxed()),
//!     KeyDescriptor::with_default("age", json!(0)).with_validator(integer().boxed()),
//! ]);
//!
//! assert_eq!(
//!     person.check(&json!({"name": "Ann"})).unwrap(),
//!     json!({"name": "Ann", "age": 0}),
//! );
//!
//! let err = person.check(&json!({"age": 5})).unwrap_err();
//! assert!(err.find("name").is_some());
//! ```
//!
//! ## Creating Validators
//!
//! Use the [`validator!`] macro for zero-boilerplate leaf validators,
//! or implement [`Validate`](foundation::Validate) manually for complex cases.
//! Anything implementing `Validate` can be wrapped in a shared
//! [`Validator`](foundation::Validator) handle.
//!
//! ## Built-in Validators
//!
//! - **Primitives**: [`integer`](validators::integer), [`float`](validators::float),
//!   [`string`](validators::string), [`boolean`](validators::boolean),
//!   [`null`](validators::null), [`list`](validators::list),
//!   [`mapping`](validators::mapping), [`any`](validators::any)
//! - **Literal**: [`literal`](validators::literal)
//! - **Structural**: [`Record`](combinators::Record), [`Each`](combinators::Each),
//!   [`Tuple`](combinators::Tuple), [`Combinator`](combinators::Combinator)

// ValidationError is the fundamental error type for all validators;
// it is returned unboxed from every check.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod registry;
pub mod validators;
