//! Any-of / all-of composition of specifications
//!
//! These build [`Specification::Combinator`] data; nothing is compiled until
//! the result goes through a [`Compiler`](crate::Compiler). An operand that is
//! already a combinator of the same mode is spliced in, one level deep, so
//! `(a | b) | c` has three children.

use crate::spec::Specification;
use trellis_validator::combinators::CombineMode;

/// Builds an any-of specification from two operands.
///
/// ```
/// use trellis_schema::{Specification, combine_any};
///
/// let spec = combine_any(combine_any("null", "int"), "str");
/// let Specification::Combinator { children, .. } = spec else { unreachable!() };
/// assert_eq!(children.len(), 3);
/// ```
pub fn combine_any(a: impl Into<Specification>, b: impl Into<Specification>) -> Specification {
    combine(CombineMode::AnyOf, a.into(), b.into())
}

/// Builds an all-of specification from two operands.
pub fn combine_all(a: impl Into<Specification>, b: impl Into<Specification>) -> Specification {
    combine(CombineMode::AllOf, a.into(), b.into())
}

fn combine(mode: CombineMode, a: Specification, b: Specification) -> Specification {
    let mut children = Vec::with_capacity(2);
    for operand in [a, b] {
        match operand {
            Specification::Combinator {
                mode: inner,
                children: nested,
            } if inner == mode => children.extend(nested),
            other => children.push(other),
        }
    }
    Specification::Combinator { mode, children }
}

/// Method form of [`combine_any`] and [`combine_all`] for anything that
/// converts into a [`Specification`].
///
/// ```
/// use serde_json::json;
/// use trellis_schema::{SchemaAlgebra, compile};
/// use trellis_validator::foundation::Validate;
///
/// let maybe_port = "null".any_of("int");
/// let v = compile(&maybe_port).unwrap();
/// assert_eq!(v.check(&json!("80")).unwrap(), json!(80));
/// ```
pub trait SchemaAlgebra: Into<Specification> + Sized {
    /// Either operand may match.
    fn any_of(self, other: impl Into<Specification>) -> Specification {
        combine_any(self, other)
    }

    /// Both operands must match, left output feeding right.
    fn all_of(self, other: impl Into<Specification>) -> Specification {
        combine_all(self, other)
    }
}

impl<T: Into<Specification>> SchemaAlgebra for T {}
