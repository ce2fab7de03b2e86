//! Structural validators and combinators
//!
//! These are the validators the schema compiler assembles from shapes:
//!
//! - [`Record`] over [`KeyDescriptor`]s for mapping shapes
//! - [`Each`] and [`Tuple`] for sequence shapes
//! - [`Combinator`] for any-of / all-of shapes and for [`ValidateExt`] chains
//!
//! [`ValidateExt`]: crate::foundation::ValidateExt

pub mod combinator;
pub mod each;
pub mod key;
pub mod record;
pub mod tuple;

pub use combinator::{CombineMode, Combinator, all_of, any_of};
pub use each::{Each, each, each_fail_fast};
pub use key::{KeyDescriptor, OnMissing};
pub use record::{ExtraKeys, Record};
pub use tuple::Tuple;
