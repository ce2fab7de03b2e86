//! Compiler configuration and presets

use serde::{Deserialize, Serialize};
use trellis_validator::combinators::ExtraKeys;

/// Default nesting limit for one specification.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options applied to every validator a [`Compiler`](crate::Compiler) builds.
///
/// ```
/// use trellis_schema::CompileOptions;
/// use trellis_validator::combinators::ExtraKeys;
///
/// let options: CompileOptions = serde_json::from_str(r#"{"extra_keys": "ignore"}"#).unwrap();
/// assert_eq!(options.extra_keys, ExtraKeys::Ignore);
/// assert_eq!(options.max_depth, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Policy for undeclared keys in records that do not set their own.
    pub extra_keys: ExtraKeys,

    /// Deepest allowed nesting of specification fragments.
    pub max_depth: usize,

    /// Stop list, tuple and record checks at the first failure.
    pub fail_fast: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            extra_keys: ExtraKeys::Reject,
            max_depth: DEFAULT_MAX_DEPTH,
            fail_fast: false,
        }
    }
}

impl CompileOptions {
    /// Rejects undeclared keys and reports every failure.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Drops undeclared keys and stops at the first failure.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            extra_keys: ExtraKeys::Ignore,
            fail_fast: true,
            ..Self::default()
        }
    }

    /// Create options from `TRELLIS_*` environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create options from any variable source, keyed like the environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        // Parse extra key policy
        if let Some(policy) = lookup("TRELLIS_EXTRA_KEYS") {
            match policy.trim().to_lowercase().as_str() {
                "reject" => options.extra_keys = ExtraKeys::Reject,
                "ignore" => options.extra_keys = ExtraKeys::Ignore,
                "keep" => options.extra_keys = ExtraKeys::Keep,
                other => tracing::warn!(value = other, "ignoring invalid TRELLIS_EXTRA_KEYS"),
            }
        }

        if let Some(depth) = lookup("TRELLIS_MAX_DEPTH") {
            match depth.trim().parse() {
                Ok(depth) => options.max_depth = depth,
                Err(_) => tracing::warn!(value = %depth, "ignoring invalid TRELLIS_MAX_DEPTH"),
            }
        }

        if let Some(flag) = lookup("TRELLIS_FAIL_FAST") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => options.fail_fast = true,
                "0" | "false" | "no" | "off" => options.fail_fast = false,
                other => tracing::warn!(value = other, "ignoring invalid TRELLIS_FAIL_FAST"),
            }
        }

        options
    }

    /// Sets the default extra key policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_extra_keys(mut self, extra_keys: ExtraKeys) -> Self {
        self.extra_keys = extra_keys;
        self
    }

    /// Sets the nesting limit.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets fail-fast checking.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn presets() {
        assert_eq!(CompileOptions::strict(), CompileOptions::default());
        let lenient = CompileOptions::lenient();
        assert_eq!(lenient.extra_keys, ExtraKeys::Ignore);
        assert!(lenient.fail_fast);
        assert_eq!(lenient.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let options = CompileOptions::from_lookup(lookup(&[
            ("TRELLIS_EXTRA_KEYS", "Keep"),
            ("TRELLIS_MAX_DEPTH", " 12 "),
            ("TRELLIS_FAIL_FAST", "yes"),
        ]));
        assert_eq!(
            options,
            CompileOptions {
                extra_keys: ExtraKeys::Keep,
                max_depth: 12,
                fail_fast: true,
            }
        );
    }

    #[test]
    fn from_lookup_keeps_defaults_on_garbage() {
        let options = CompileOptions::from_lookup(lookup(&[
            ("TRELLIS_EXTRA_KEYS", "sometimes"),
            ("TRELLIS_MAX_DEPTH", "-1"),
            ("TRELLIS_FAIL_FAST", "maybe"),
        ]));
        assert_eq!(options, CompileOptions::default());
    }

    #[test]
    fn deserializes_partial_documents() {
        let options: CompileOptions =
            serde_json::from_str(r#"{"max_depth": 3, "fail_fast": true}"#).unwrap();
        assert_eq!(options.extra_keys, ExtraKeys::Reject);
        assert_eq!(options.max_depth, 3);
        assert!(options.fail_fast);
    }

    #[test]
    fn builders_chain() {
        let options = CompileOptions::default()
            .with_extra_keys(ExtraKeys::Keep)
            .with_max_depth(8)
            .with_fail_fast(true);
        assert_eq!(options.extra_keys, ExtraKeys::Keep);
        assert_eq!(options.max_depth, 8);
        assert!(options.fail_fast);
    }
}
