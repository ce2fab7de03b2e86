//! Built-in leaf validators
//!
//! - **Primitives**: one per JSON kind, with numeric coercion
//!   ([`integer`], [`float`], [`string`], ...)
//! - **Literal**: exact equality with a scalar ([`literal`])
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use trellis_validator::prelude::*;
//!
//! let port = integer().or(literal("auto"));
//! assert_eq!(port.check(&json!("2379")).unwrap(), json!(2379));
//! assert!(port.is_valid(&json!("auto")));
//! ```

pub mod literal;
pub mod primitive;

pub use literal::{Exact, exact, literal};
pub use primitive::{
    Any, Boolean, Float, Integer, List, Mapping, Null, Primitive, Str, any, boolean, float,
    integer, list, mapping, null, string,
};
