//! Specification compiler
//!
//! [`Compiler::compile`] turns a [`Specification`] into a [`Validator`] by a
//! closed dispatch over the specification variants:
//!
//! 1. a built validator is returned unchanged
//! 2. a type marker known to the leaf registry becomes that leaf
//! 3. a record shape becomes a [`Record`], keys first, then values
//! 4. a one-element sequence becomes an [`Each`], any other a [`Tuple`]
//! 5. a combinator shape becomes a [`Combinator`] over its compiled children
//! 6. a scalar literal becomes an [`Exact`] match
//!
//! Anything else is [`CompileError::UnrecognizedSpecification`]. Errors abort
//! the whole call; no partial validator escapes.

use crate::config::CompileOptions;
use crate::error::{CompileError, SpecPath, SpecSegment};
use crate::key::KeySpec;
use crate::spec::{DeferredSpec, RecordSpec, Specification};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use trellis_validator::combinators::{
    CombineMode, Combinator, Each, KeyDescriptor, Record, Tuple,
};
use trellis_validator::foundation::Validator;
use trellis_validator::registry::{BuiltinRegistry, LeafRegistry};
use trellis_validator::validators::Exact;

// ============================================================================
// COMPILER
// ============================================================================

/// Compiles specifications against a leaf registry.
///
/// A compiler is immutable and can be shared across threads; each
/// [`compile`](Compiler::compile) call is independent.
///
/// ```
/// use serde_json::json;
/// use trellis_schema::{Compiler, CompileOptions, Specification};
/// use trellis_validator::foundation::Validate;
///
/// let compiler = Compiler::new().with_options(CompileOptions::lenient());
/// let spec = Specification::from_json(&json!({"port": "int"}));
/// let v = compiler.compile(&spec).unwrap();
/// assert_eq!(v.check(&json!({"port": "80", "debug": true})).unwrap(), json!({"port": 80}));
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: Arc<dyn LeafRegistry>,
    options: CompileOptions,
}

impl Compiler {
    /// Creates a compiler over the builtin primitives with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(BuiltinRegistry::new())
    }

    /// Creates a compiler over a custom leaf registry.
    pub fn with_registry(registry: impl LeafRegistry + 'static) -> Self {
        Self::with_shared_registry(Arc::new(registry))
    }

    /// Creates a compiler over a registry shared with other compilers.
    #[must_use]
    pub fn with_shared_registry(registry: Arc<dyn LeafRegistry>) -> Self {
        Self {
            registry,
            options: CompileOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Returns the leaf registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<dyn LeafRegistry> {
        &self.registry
    }

    /// Compiles `spec` into a validator.
    pub fn compile(&self, spec: &Specification) -> Result<Validator, CompileError> {
        tracing::debug!(kind = spec.kind(), "compiling specification");
        let result = Session::new(self).value(spec, &SpecPath::root(), 0);
        match &result {
            Ok(validator) => tracing::debug!(kind = spec.kind(), ?validator, "compiled specification"),
            Err(error) => tracing::debug!(kind = spec.kind(), code = error.code(), %error, "compilation failed"),
        }
        result
    }

    /// Compiles a record key spec into a descriptor with no value validator.
    pub fn compile_key(&self, spec: &KeySpec) -> Result<KeyDescriptor, CompileError> {
        let result = spec.to_descriptor(&SpecPath::root());
        if let Err(error) = &result {
            tracing::debug!(code = error.code(), %error, "key compilation failed");
        }
        result
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// COMPILE SESSION
// ============================================================================

/// State for one compile call: deferred slots already compiled, and slots
/// currently being compiled.
struct Session<'c> {
    compiler: &'c Compiler,
    compiled: HashMap<usize, Validator>,
    active: HashSet<usize>,
}

impl<'c> Session<'c> {
    fn new(compiler: &'c Compiler) -> Self {
        Self {
            compiler,
            compiled: HashMap::new(),
            active: HashSet::new(),
        }
    }

    fn value(
        &mut self,
        spec: &Specification,
        path: &SpecPath,
        depth: usize,
    ) -> Result<Validator, CompileError> {
        let max_depth = self.compiler.options.max_depth;
        if depth > max_depth {
            return Err(CompileError::DepthExceeded {
                path: path.clone(),
                max_depth,
            });
        }
        tracing::trace!(%path, kind = spec.kind(), "compiling node");

        match spec {
            Specification::Validator(validator) => Ok(validator.clone()),
            Specification::Type(marker) => self
                .compiler
                .registry
                .instantiate(marker)
                .ok_or_else(|| {
                    CompileError::unrecognized(path, format!("unknown type marker `{marker}`"))
                }),
            Specification::Record(record) => self.record(record, path, depth),
            Specification::Sequence(items) => self.sequence(items, path, depth),
            Specification::Combinator { mode, children } => {
                self.combinator(*mode, children, path, depth)
            }
            Specification::Literal(value) => literal(value, path),
            Specification::Deferred(slot) => self.deferred(slot, path, depth),
        }
    }

    fn record(
        &mut self,
        record: &RecordSpec,
        path: &SpecPath,
        depth: usize,
    ) -> Result<Validator, CompileError> {
        // Keys first, so duplicates are caught before any value compiles
        let mut seen = HashSet::with_capacity(record.len());
        let mut descriptors = Vec::with_capacity(record.len());
        for (index, (key, _)) in record.fields().iter().enumerate() {
            let key_path = match key.name() {
                Some(name) => path.child(SpecSegment::Field(name.to_owned())),
                None => path.child(SpecSegment::Index(index)),
            };
            let descriptor = key.to_descriptor(&key_path)?;
            if !seen.insert(descriptor.name().to_owned()) {
                return Err(CompileError::DuplicateFieldName {
                    path: path.clone(),
                    name: descriptor.name().to_owned(),
                });
            }
            descriptors.push(descriptor);
        }

        let mut keys = Vec::with_capacity(descriptors.len());
        for (descriptor, (_, spec)) in descriptors.into_iter().zip(record.fields()) {
            let field_path = path.child(SpecSegment::Field(descriptor.name().to_owned()));
            let validator = self.value(spec, &field_path, depth + 1)?;
            keys.push(descriptor.with_validator(validator));
        }

        let options = &self.compiler.options;
        Ok(Validator::new(
            Record::new(keys)
                .with_extra(record.extra().unwrap_or(options.extra_keys))
                .with_fail_fast(options.fail_fast),
        ))
    }

    fn sequence(
        &mut self,
        items: &[Specification],
        path: &SpecPath,
        depth: usize,
    ) -> Result<Validator, CompileError> {
        let mut validators = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            validators.push(self.value(item, &path.child(SpecSegment::Index(index)), depth + 1)?);
        }

        let fail_fast = self.compiler.options.fail_fast;
        match <[Validator; 1]>::try_from(validators) {
            Ok([element]) => Ok(Validator::new(Each::new(element).with_fail_fast(fail_fast))),
            Err(validators) => Ok(Validator::new(
                Tuple::new(validators).with_fail_fast(fail_fast),
            )),
        }
    }

    fn combinator(
        &mut self,
        mode: CombineMode,
        children: &[Specification],
        path: &SpecPath,
        depth: usize,
    ) -> Result<Validator, CompileError> {
        if children.len() < 2 {
            return Err(CompileError::unrecognized(
                path,
                format!("{mode} combinator needs at least two children, got {}", children.len()),
            ));
        }

        let mut validators = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            let child_path = path.child(SpecSegment::Alternative { mode, index });
            validators.push(self.value(child, &child_path, depth + 1)?);
        }
        Ok(Validator::new(Combinator::new(mode, validators)))
    }

    fn deferred(
        &mut self,
        slot: &DeferredSpec,
        path: &SpecPath,
        depth: usize,
    ) -> Result<Validator, CompileError> {
        let id = slot.id();
        if let Some(validator) = self.compiled.get(&id) {
            return Ok(validator.clone());
        }
        if self.active.contains(&id) {
            return Err(CompileError::CyclicSpecification { path: path.clone() });
        }
        let Some(spec) = slot.get() else {
            return Err(CompileError::unrecognized(
                path,
                "deferred specification was never defined",
            ));
        };

        // A slot is an alias, not a nesting level
        self.active.insert(id);
        let validator = self.value(spec, path, depth)?;
        self.active.remove(&id);
        self.compiled.insert(id, validator.clone());
        Ok(validator)
    }
}

fn literal(value: &Value, path: &SpecPath) -> Result<Validator, CompileError> {
    match value {
        Value::Array(_) | Value::Object(_) => Err(CompileError::unrecognized(
            path,
            format!("literal must be a scalar, got {value}"),
        )),
        scalar => Ok(Validator::new(Exact::new(scalar.clone()))),
    }
}
