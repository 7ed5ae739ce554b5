//! `ExpressionContext`: the read-only bundle an evaluation runs against.
//! Grounded on `tiimu-dsl-evaluator`'s `EvalContext` (a flat, `Clone`,
//! no-interior-mutability struct holding exactly the bindings an
//! evaluation needs), extended with the `item`/`items`/`variables`
//! fields this evaluator names.

use crate::value::Value;
use rustc_hash::FxHashMap;

/// Read-only per-call bundle: the current record, its sibling collection,
/// and user-defined variable bindings. The evaluator never writes to a
/// context it is given; callback sub-evaluations instead receive
/// augmented *copies* with the callback parameter(s) bound.
#[derive(Debug, Clone, Default)]
pub struct ExpressionContext {
    pub item: Value,
    pub items: Value,
    pub variables: FxHashMap<String, Value>,
}

impl ExpressionContext {
    pub fn new(item: Value, items: Value) -> Self {
        Self {
            item,
            items,
            variables: FxHashMap::default(),
        }
    }

    pub fn with_variables(mut self, variables: FxHashMap<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Builds a child context for a single callback invocation: `variables`
    /// is cloned from the parent and the callback's own parameter names are
    /// bound over it. `item`/`items` are carried unchanged, so a callback
    /// sees the same record/collection its enclosing expression does.
    pub fn bind(&self, bindings: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut variables = self.variables.clone();
        for (name, value) in bindings {
            variables.insert(name, value);
        }
        Self {
            item: self.item.clone(),
            items: self.items.clone(),
            variables,
        }
    }
}
