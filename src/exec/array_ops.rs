//! Higher-order array operations with callback AST nodes. Structure
//! grounded on `boa_engine/src/builtins/array/mod.rs`'s `filter`/`map`/
//! `some`/`every`/`find`/`reduce` (ascending index order, fail-fast on
//! callback error, `reduce`'s empty-array-without-initial-value
//! `TypeError`). Unlike that implementation, the callback here is an AST
//! node evaluated through the executor's own dispatch, not a `JsObject`
//! callable: arrow functions are not unified with `Value`, only
//! pattern-matched at the argument position of these methods.

use crate::ast::Node;
use crate::context::ExpressionContext;
use crate::error::EvalError;
use crate::value::{to_bool, Value};

/// Evaluates a single AST node in a context, recursing back through the
/// executor's own `execute_node`. Borrowed mutably for the lifetime of one
/// higher-order call so the callback can be invoked once per element.
pub type EvalFn<'a> = dyn FnMut(&Node, &ExpressionContext) -> Result<Value, EvalError> + 'a;

/// Binds an arrow function's declared parameters to the leading `args`
/// (extra args beyond the arrow's own parameter count are simply dropped:
/// `(x) => ...` ignores the index/array JS would also hand it) and
/// evaluates its body in the resulting child context.
fn invoke_arrow(
    callback: &Node,
    args: &[Value],
    ctx: &ExpressionContext,
    eval: &mut EvalFn<'_>,
) -> Result<Value, EvalError> {
    let (params, body) = match callback {
        Node::Arrow { params, body } => (params, body.as_ref()),
        _ => return Err(EvalError::type_error("callback is not an arrow function")),
    };
    let bindings = params
        .iter()
        .cloned()
        .zip(args.iter().cloned())
        .collect::<Vec<_>>();
    let child_ctx = ctx.bind(bindings);
    eval(body, &child_ctx)
}

fn items_of<'a>(array: &'a Value) -> Result<&'a [Value], EvalError> {
    match array {
        Value::Array(items) => Ok(items.as_slice()),
        _ => Err(EvalError::type_error("expected an array")),
    }
}

/// Pluggable higher-order implementation, swapped in via
/// `Executor::set_array_operations`. Each method receives the
/// already-evaluated array, the callback's raw AST node, the caller's
/// context, and an `eval` callback that routes back through the
/// executor's node dispatch (so timeout/stack-depth bookkeeping stays
/// centralized in the executor, not duplicated here).
pub trait ArrayOperations: Send + Sync {
    fn filter(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError>;

    fn map(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError>;

    fn find(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError>;

    fn some(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError>;

    fn every(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError>;

    fn reduce(
        &self,
        array: &Value,
        callback: &Node,
        initial: Option<Value>,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError>;
}

/// The default implementation: ascending index order, fail-fast on the
/// first callback error (partial results are discarded).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultArrayOperations;

impl ArrayOperations for DefaultArrayOperations {
    fn filter(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError> {
        let items = items_of(array)?;
        let mut kept = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let args = [item.clone(), Value::Number(index as f64), array.clone()];
            if to_bool(&invoke_arrow(callback, &args, ctx, eval)?) {
                kept.push(item.clone());
            }
        }
        Ok(Value::array(kept))
    }

    fn map(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError> {
        let items = items_of(array)?;
        let mut mapped = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let args = [item.clone(), Value::Number(index as f64), array.clone()];
            mapped.push(invoke_arrow(callback, &args, ctx, eval)?);
        }
        Ok(Value::array(mapped))
    }

    fn find(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError> {
        let items = items_of(array)?;
        for (index, item) in items.iter().enumerate() {
            let args = [item.clone(), Value::Number(index as f64), array.clone()];
            if to_bool(&invoke_arrow(callback, &args, ctx, eval)?) {
                return Ok(item.clone());
            }
        }
        Ok(Value::Null)
    }

    fn some(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError> {
        let items = items_of(array)?;
        for (index, item) in items.iter().enumerate() {
            let args = [item.clone(), Value::Number(index as f64), array.clone()];
            if to_bool(&invoke_arrow(callback, &args, ctx, eval)?) {
                return Ok(Value::Boolean(true));
            }
        }
        Ok(Value::Boolean(false))
    }

    fn every(
        &self,
        array: &Value,
        callback: &Node,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError> {
        let items = items_of(array)?;
        for (index, item) in items.iter().enumerate() {
            let args = [item.clone(), Value::Number(index as f64), array.clone()];
            if !to_bool(&invoke_arrow(callback, &args, ctx, eval)?) {
                return Ok(Value::Boolean(false));
            }
        }
        Ok(Value::Boolean(true))
    }

    fn reduce(
        &self,
        array: &Value,
        callback: &Node,
        initial: Option<Value>,
        ctx: &ExpressionContext,
        eval: &mut EvalFn<'_>,
    ) -> Result<Value, EvalError> {
        let items = items_of(array)?;
        let (mut accumulator, start) = match initial {
            Some(value) => (value, 0),
            None => {
                if items.is_empty() {
                    return Err(EvalError::type_error(
                        "reduce of empty array with no initial value",
                    ));
                }
                (items[0].clone(), 1)
            }
        };
        for index in start..items.len() {
            let item = &items[index];
            let args = [
                accumulator.clone(),
                item.clone(),
                Value::Number(index as f64),
                array.clone(),
            ];
            accumulator = invoke_arrow(callback, &args, ctx, eval)?;
        }
        Ok(accumulator)
    }
}
