//! Macros for creating validators with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`validator!`]: creates a complete leaf validator (struct + Validate impl + factory fn)
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use trellis_validator::validator;
//! use trellis_validator::foundation::{Validate, ValidationError};
//!
//! // Predicate validator: passes the input through unchanged
//! validator! {
//!     pub NonEmpty;
//!     rule(input) { input.as_str().is_some_and(|s| !s.is_empty()) }
//!     error(input) { ValidationError::new("non_empty", "must be a non-empty string") }
//!     fn non_empty();
//! }
//!
//! // Coercing validator with fields
//! validator! {
//!     pub Scaled { factor: i64 };
//!     check(self, input) {
//!         input
//!             .as_i64()
//!             .map(|n| json!(n * self.factor))
//!             .ok_or_else(|| ValidationError::type_mismatch("integer", input))
//!     }
//!     fn scaled(factor: i64);
//! }
//!
//! assert!(non_empty().is_valid(&json!("x")));
//! assert_eq!(scaled(3).check(&json!(2)).unwrap(), json!(6));
//! ```

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a complete leaf validator: struct definition, `Validate`
/// implementation, constructor, and factory function.
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives via `#[derive(...)]`.
///
/// # Variants
///
/// **Unit predicate** (zero-sized; passes the input through when `rule` holds):
/// ```rust,ignore
/// validator! {
///     pub Null;
///     rule(input) { input.is_null() }
///     error(input) { ValidationError::type_mismatch("null", input) }
///     fn null();
/// }
/// ```
///
/// **Unit coercion** (zero-sized; `check` returns the coerced value):
/// ```rust,ignore
/// validator! {
///     pub Integer;
///     check(input) { coerce_integer(input) }
///     fn integer();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields), with either a
/// `rule`/`error` pair or a `check` body:
/// ```rust,ignore
/// validator! {
///     pub Exact { expected: Value };
///     rule(self, input) { *input == self.expected }
///     error(self, input) { ValidationError::new("exact", "mismatch") }
///     fn exact(expected: Value);
/// }
/// ```
#[macro_export]
macro_rules! validator {
    // ── Internal: struct definition with auto `new` ──────────────────────
    (@struct $(#[$meta:meta])* $vis:vis $name:ident { $($field:ident: $fty:ty),+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }
    };

    // ── Variant 1a: Unit predicate + factory fn ──────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name;
            rule($inp) $rule
            error($einp) $err
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Variant 1b: Unit predicate, no factory ───────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            #[allow(unused_variables)]
            fn check(
                &self,
                $inp: &::serde_json::Value,
            ) -> ::std::result::Result<::serde_json::Value, $crate::foundation::ValidationError> {
                if $rule {
                    Ok($inp.clone())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Variant 2a: Unit coercion + factory fn ───────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        check($inp:ident) $body:block
        fn $factory:ident();
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name;
            check($inp) $body
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Variant 2b: Unit coercion, no factory ────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        check($inp:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            fn check(
                &self,
                $inp: &::serde_json::Value,
            ) -> ::std::result::Result<::serde_json::Value, $crate::foundation::ValidationError> {
                $body
            }
        }
    };

    // ── Variant 3a: Struct predicate + auto new + factory fn ─────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator!(@struct $(#[$meta])* $vis $name { $($field: $fty),+ });

        impl $crate::foundation::Validate for $name {
            #[allow(unused_variables)]
            fn check(
                &$self_,
                $inp: &::serde_json::Value,
            ) -> ::std::result::Result<::serde_json::Value, $crate::foundation::ValidationError> {
                if $rule {
                    Ok($inp.clone())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3b: Struct coercion + auto new + factory fn ──────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        check($self_:ident, $inp:ident) $body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator!(@struct $(#[$meta])* $vis $name { $($field: $fty),+ });

        impl $crate::foundation::Validate for $name {
            fn check(
                &$self_,
                $inp: &::serde_json::Value,
            ) -> ::std::result::Result<::serde_json::Value, $crate::foundation::ValidationError> {
                $body
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::{Validate, ValidationError};
    use serde_json::json;

    crate::validator! {
        Even;
        rule(input) { input.as_i64().is_some_and(|n| n % 2 == 0) }
        error(input) { ValidationError::new("even", "must be even") }
        fn even();
    }

    crate::validator! {
        Upper;
        check(input) {
            input
                .as_str()
                .map(|s| json!(s.to_uppercase()))
                .ok_or_else(|| ValidationError::type_mismatch("string", input))
        }
        fn upper();
    }

    crate::validator! {
        AtLeast { min: i64 };
        rule(self, input) { input.as_i64().is_some_and(|n| n >= self.min) }
        error(self, input) {
            ValidationError::new("at_least", format!("must be at least {}", self.min))
                .with_param("min", self.min.to_string())
        }
        fn at_least(min: i64);
    }

    #[test]
    fn unit_predicate_passes_input_through() {
        assert_eq!(even().check(&json!(4)).unwrap(), json!(4));
        assert_eq!(even().check(&json!(3)).unwrap_err().code, "even");
    }

    #[test]
    fn unit_coercion_returns_new_value() {
        assert_eq!(upper().check(&json!("ab")).unwrap(), json!("AB"));
        assert!(!upper().is_valid(&json!(1)));
    }

    #[test]
    fn struct_predicate_uses_fields() {
        let v = at_least(10);
        assert_eq!(v.min, 10);
        assert!(v.is_valid(&json!(10)));
        let err = v.check(&json!(9)).unwrap_err();
        assert_eq!(err.param("min"), Some("10"));
    }
}
