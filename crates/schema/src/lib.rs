//! # trellis-schema
//!
//! Compiles loosely-typed schema specifications into composable validators.
//!
//! A [`Specification`] is plain data: a type marker, a record shape, a
//! sequence shape, an any-of / all-of combination, a literal, or an
//! already-built validator. [`compile`] turns it into a
//! [`Validator`](trellis_validator::foundation::Validator) that checks and
//! coerces [`serde_json::Value`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use trellis_schema::{RecordSpec, SchemaAlgebra, Specification, compile};
//! use trellis_validator::foundation::Validate;
//!
//! let spec: Specification = RecordSpec::new()
//!     .field("namespace", "string")
//!     .field(("addr", json!(["127.0.0.1", 2379])), Specification::tuple(["string", "integer"]))
//!     .field(("user", ""), "null".any_of("string"))
//!     .allow_extra()
//!     .into();
//!
//! let etcd = compile(&spec).unwrap();
//! let config = etcd.check(&json!({"namespace": "local", "addr": ["10.0.0.2", "2380"]})).unwrap();
//! assert_eq!(config["addr"], json!(["10.0.0.2", 2380]));
//! assert_eq!(config["user"], json!(""));
//! ```
//!
//! ## Compile rules
//!
//! See [`Compiler`] for the dispatch order and [`CompileError`] for the
//! failures. Compiling an already-compiled validator returns it unchanged.

pub mod algebra;
pub mod compiler;
pub mod config;
pub mod error;
pub mod key;
pub mod spec;

pub use algebra::{SchemaAlgebra, combine_all, combine_any};
pub use compiler::Compiler;
pub use config::{CompileOptions, DEFAULT_MAX_DEPTH};
pub use error::{CompileError, SpecPath, SpecSegment};
pub use key::KeySpec;
pub use spec::{DeferredSpec, RecordSpec, Specification};

use std::sync::LazyLock;
use trellis_validator::combinators::KeyDescriptor;
use trellis_validator::foundation::Validator;

static DEFAULT_COMPILER: LazyLock<Compiler> = LazyLock::new(Compiler::new);

/// Compiles `spec` with the builtin primitives and default options.
pub fn compile(spec: &Specification) -> Result<Validator, CompileError> {
    DEFAULT_COMPILER.compile(spec)
}

/// Compiles a record key spec with default options.
pub fn compile_key(spec: &KeySpec) -> Result<KeyDescriptor, CompileError> {
    DEFAULT_COMPILER.compile_key(spec)
}
