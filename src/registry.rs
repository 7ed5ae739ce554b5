//! `FunctionRegistry`: name-to-callable mapping with arity metadata.
//! Shape grounded on `tiimu-dsl-evaluator`'s `FunctionRegistry`
//! (`HashMap<String, Arc<dyn Function>>`); keyed lookup swapped to
//! `rustc_hash::FxHashMap`, grounded on the teacher workspace's own
//! `rustc-hash` dependency (fast string-keyed lookup, no DoS-resistance
//! requirement in an embedded/sandboxed setting).

use crate::error::EvalError;
use crate::value::Value;
use dyn_clone::DynClone;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// A host-registered callable. Pure from the evaluator's perspective: it
/// takes a positional argument list of already-evaluated `Value`s and
/// returns a `Value` or an error. Arity is *not* validated inside the
/// callable: that is the Executor's job, performed centrally against the
/// `min_args`/`max_args` declared at registration.
pub trait NativeFunction: DynClone + Send + Sync {
    fn call(&self, args: &[Value]) -> Result<Value, EvalError>;
}

dyn_clone::clone_trait_object!(NativeFunction);

impl<F> NativeFunction for F
where
    F: Fn(&[Value]) -> Result<Value, EvalError> + Clone + Send + Sync,
{
    fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self)(args)
    }
}

/// A registry entry: `(name, callable, min_args, max_args)`. `max_args`
/// of `-1` means unbounded, a plain sentinel rather than wrapping the
/// field in an `Option`.
#[derive(Clone)]
pub struct SafeFunction {
    pub name: String,
    pub min_args: usize,
    pub max_args: i64,
    callable: Box<dyn NativeFunction>,
}

impl SafeFunction {
    pub fn new(
        name: impl Into<String>,
        min_args: usize,
        max_args: i64,
        callable: impl NativeFunction + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            min_args,
            max_args,
            callable: Box::new(callable),
        }
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        self.callable.call(args)
    }
}

impl fmt::Debug for SafeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeFunction")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish()
    }
}

/// Name-to-`SafeFunction` mapping. Names may be bare (`"abs"`) or
/// qualified (`"Math.round"`, `"Object.keys"`): the registry treats both
/// as plain string keys, and qualification is meaningful only to the
/// Executor's call dispatch. Registration order does not matter.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<SafeFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, function: SafeFunction) {
        self.functions.insert(function.name.clone(), Arc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<Arc<SafeFunction>> {
        self.functions.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}
