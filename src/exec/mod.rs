//! The AST Executor: recursive node evaluation, operator semantics, and
//! enforcement of the timeout and stack-depth limits. The overall
//! recursive dispatch-by-node-kind shape is grounded on
//! `boa/src/exec/mod.rs`'s `Interpreter::run` (`match node { Node::X(...)
//! => ... }`, recursive `self.run(...)` calls). This module adds the
//! frame/timeout/depth bookkeeping that implementation never needed (no
//! statements, no GC, no bounded-resource requirement there).

pub mod array_ops;
mod metadata;

pub use array_ops::{ArrayOperations, DefaultArrayOperations, EvalFn};

use crate::ast::{BinaryOp, Node, PropertyKey, UnaryOp};
use crate::context::ExpressionContext;
use crate::error::EvalError;
use crate::options::ExecutionOptions;
use crate::property;
use crate::registry::{FunctionRegistry, SafeFunction};
use crate::result::{EvaluationResult, ExecutionMetadata};
use crate::stats::{Stats, StatsSnapshot};
use crate::value::{
    add_values, compare_values, get_javascript_type, loose_equals, normalize_value, strict_equals,
    to_array_index, to_bool, to_number, to_string, CompareOp, Value,
};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

const QUALIFIED_NAMESPACES: [&str; 8] = [
    "Object", "Math", "JSON", "Date", "Array", "Crypto", "String", "Number",
];
const ARRAY_METHODS: [&str; 6] = ["filter", "map", "find", "some", "every", "reduce"];

/// `(node reference, depth, start timestamp, optional function name)`.
/// The node reference isn't retained (nothing reads it back out, only the
/// stack's *length* bounds recursion), so this keeps just the bookkeeping
/// that's actually observable.
#[derive(Debug)]
struct Frame {
    #[allow(dead_code)]
    depth: usize,
    #[allow(dead_code)]
    started_at: Instant,
    #[allow(dead_code)]
    function_name: Option<String>,
}

/// Per-call mutable state: the frame stack and start time, threaded by
/// `&mut` reference down the recursion rather than stored on the
/// long-lived `Executor`. Passing this by reference instead of keeping it
/// on `Executor` removes the implicit one-call-at-a-time constraint a
/// stored walker would otherwise impose: a fresh `Walker` is created by
/// every `execute`/`execute_with_options` call.
struct Walker {
    frames: Vec<Frame>,
    start: Instant,
}

impl Walker {
    fn new() -> Self {
        Self {
            frames: Vec::new(),
            start: Instant::now(),
        }
    }
}

/// The AST Executor. Holds a fixed `FunctionRegistry` and default
/// `ExecutionOptions`, created once per host component. The
/// array-operations implementation and the options are behind a
/// reader/writer lock so a host can swap them at runtime without taking
/// `&mut self`; the statistics counters are protected the same way so
/// metric reads never tear.
pub struct Executor {
    registry: FunctionRegistry,
    options: RwLock<ExecutionOptions>,
    stats: Stats,
    array_ops: RwLock<Arc<dyn ArrayOperations>>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Executor {
    pub fn new(registry: FunctionRegistry) -> Self {
        Self::with_options(registry, ExecutionOptions::default())
    }

    pub fn with_options(registry: FunctionRegistry, options: ExecutionOptions) -> Self {
        Self {
            registry,
            options: RwLock::new(options),
            stats: Stats::new(),
            array_ops: RwLock::new(Arc::new(DefaultArrayOperations)),
        }
    }

    /// Replaces the default higher-order array implementation, e.g. for
    /// testing or advanced callback semantics.
    pub fn set_array_operations(&self, ops: Arc<dyn ArrayOperations>) {
        log::debug!("replacing array operations implementation");
        *self.array_ops.write().expect("array ops lock poisoned") = ops;
    }

    pub fn set_options(&self, options: ExecutionOptions) {
        *self.options.write().expect("options lock poisoned") = options;
    }

    pub fn options(&self) -> ExecutionOptions {
        self.options.read().expect("options lock poisoned").clone()
    }

    /// Returns a snapshot of the accumulated execution counters.
    pub fn get_stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Zeroes the accumulated execution counters.
    pub fn reset_stats(&self) {
        log::debug!("resetting execution statistics");
        self.stats.reset();
    }

    /// Evaluates `node` against `context` using the Executor's default
    /// options.
    pub fn execute(&self, node: &Node, context: &ExpressionContext) -> EvaluationResult {
        let options = self.options();
        self.execute_with_options(node, context, &options)
    }

    /// Evaluates `node` against `context` with a per-call options
    /// override. Resets the frame stack and start time before walking.
    pub fn execute_with_options(
        &self,
        node: &Node,
        context: &ExpressionContext,
        options: &ExecutionOptions,
    ) -> EvaluationResult {
        let mut walker = Walker::new();
        let outcome = self.execute_node(node, context, &mut walker, options);
        let outcome = match outcome {
            Ok(value) => Ok(value),
            Err(error) => match &options.error_handler {
                Some(handler) => handler(&error, node, context),
                None => Err(error),
            },
        };
        let elapsed_us = walker.start.elapsed().as_micros();
        self.stats.record(elapsed_us, outcome.is_err());
        if options.enable_debugging {
            log::debug!("execute completed in {}us", elapsed_us);
        }
        let metadata = if options.collect_metrics {
            metadata::collect(node, context).into_metadata(elapsed_us)
        } else {
            ExecutionMetadata {
                execution_time_us: elapsed_us,
                ..Default::default()
            }
        };
        match outcome {
            Ok(value) => EvaluationResult::ok(value, metadata),
            Err(error) => EvaluationResult::err(&error, metadata),
        }
    }

    /// On entry: (a) check wall-clock timeout; (b) check stack depth;
    /// (c) push a frame; (d) dispatch on node kind; (e) pop the frame on
    /// all exit paths.
    fn execute_node(
        &self,
        node: &Node,
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Value, EvalError> {
        if walker.start.elapsed().as_millis() as u64 >= options.timeout_ms() {
            log::warn!(
                "execution aborted: exceeded {}ms timeout",
                options.timeout_ms()
            );
            return Err(EvalError::timeout(format!(
                "execution exceeded {}ms timeout",
                options.timeout_ms()
            )));
        }
        if walker.frames.len() >= options.max_stack_depth() {
            log::warn!(
                "execution aborted: exceeded max stack depth of {}",
                options.max_stack_depth()
            );
            return Err(EvalError::runtime(format!(
                "exceeded max stack depth of {}",
                options.max_stack_depth()
            )));
        }
        walker.frames.push(Frame {
            depth: walker.frames.len(),
            started_at: Instant::now(),
            function_name: None,
        });
        let result = self.dispatch(node, ctx, walker, options);
        walker.frames.pop();
        result
    }

    #[allow(clippy::too_many_lines)]
    fn dispatch(
        &self,
        node: &Node,
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Value, EvalError> {
        match node {
            Node::StringLiteral(s) => Ok(normalize_value(Value::string(s))),
            Node::NumberLiteral(n) => Ok(Value::Number(*n)),
            Node::BooleanLiteral(b) => Ok(Value::Boolean(*b)),
            Node::NullLiteral => Ok(Value::Null),
            Node::Identifier(name) => Ok(resolve_identifier(name, ctx)),
            Node::Member { object, property } => {
                let obj = self.execute_node(object, ctx, walker, options)?;
                Ok(property::access(&obj, &Value::string(property)))
            }
            Node::Index { object, property } => {
                let obj = self.execute_node(object, ctx, walker, options)?;
                let prop = self.execute_node(property, ctx, walker, options)?;
                Ok(property::access(&obj, &prop))
            }
            Node::Call { callee, arguments } => {
                self.eval_call(callee, arguments, ctx, walker, options)
            }
            Node::Binary { op, left, right } => self.eval_binary(*op, left, right, ctx, walker, options),
            Node::Unary { op, argument } => self.eval_unary(*op, argument, ctx, walker, options),
            Node::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let t = self.execute_node(test, ctx, walker, options)?;
                let branch = if to_bool(&t) { consequent } else { alternate };
                let v = self.execute_node(branch, ctx, walker, options)?;
                Ok(normalize_value(v))
            }
            Node::ArrayLiteral(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    match element {
                        Some(n) => values.push(self.execute_node(n, ctx, walker, options)?),
                        None => values.push(Value::Null),
                    }
                }
                Ok(Value::array(values))
            }
            Node::ObjectLiteral(entries) => {
                let mut map = IndexMap::new();
                for (key, value_node) in entries {
                    let key_string = match key {
                        PropertyKey::Identifier(name) => name.clone(),
                        PropertyKey::StringLiteral(s) => s.clone(),
                        PropertyKey::NumberLiteral(n) => to_string(&Value::Number(*n)),
                        PropertyKey::Computed(node) => {
                            let v = self.execute_node(node, ctx, walker, options)?;
                            to_string(&v)
                        }
                    };
                    let value = self.execute_node(value_node, ctx, walker, options)?;
                    map.insert(key_string, value);
                }
                Ok(Value::object(map))
            }
            Node::Arrow { .. } => Err(EvalError::type_error(
                "arrow function is not a value in this position",
            )),
            Node::Program(inner) => self.execute_node(inner, ctx, walker, options),
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        left: &Node,
        right: &Node,
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Value, EvalError> {
        match op {
            BinaryOp::And => {
                let l = self.execute_node(left, ctx, walker, options)?;
                if !to_bool(&l) {
                    return Ok(l);
                }
                self.execute_node(right, ctx, walker, options)
            }
            BinaryOp::Or => {
                let l = self.execute_node(left, ctx, walker, options)?;
                if to_bool(&l) {
                    return Ok(l);
                }
                self.execute_node(right, ctx, walker, options)
            }
            BinaryOp::NullishCoalesce => {
                let l = self.execute_node(left, ctx, walker, options)?;
                if !l.is_nullish() {
                    return Ok(normalize_value(l));
                }
                let r = self.execute_node(right, ctx, walker, options)?;
                Ok(normalize_value(r))
            }
            _ => {
                let l = self.execute_node(left, ctx, walker, options)?;
                let r = self.execute_node(right, ctx, walker, options)?;
                match op {
                    BinaryOp::Add => Ok(add_values(&l, &r)),
                    BinaryOp::Sub => Ok(Value::Number(to_number(&l).0 - to_number(&r).0)),
                    BinaryOp::Mul => Ok(Value::Number(to_number(&l).0 * to_number(&r).0)),
                    BinaryOp::Rem => Ok(Value::Number(to_number(&l).0 % to_number(&r).0)),
                    BinaryOp::Pow => Ok(Value::Number(to_number(&l).0.powf(to_number(&r).0))),
                    BinaryOp::Div => {
                        let divisor = to_number(&r).0;
                        if divisor == 0.0 {
                            Ok(Value::Number(f64::INFINITY))
                        } else {
                            Ok(Value::Number(to_number(&l).0 / divisor))
                        }
                    }
                    BinaryOp::Eq => Ok(Value::Boolean(loose_equals(&l, &r))),
                    BinaryOp::NotEq => Ok(Value::Boolean(!loose_equals(&l, &r))),
                    BinaryOp::StrictEq => Ok(Value::Boolean(strict_equals(&l, &r))),
                    BinaryOp::StrictNotEq => Ok(Value::Boolean(!strict_equals(&l, &r))),
                    BinaryOp::Lt => Ok(Value::Boolean(compare_values(&l, &r, CompareOp::Lt))),
                    BinaryOp::Lte => Ok(Value::Boolean(compare_values(&l, &r, CompareOp::Lte))),
                    BinaryOp::Gt => Ok(Value::Boolean(compare_values(&l, &r, CompareOp::Gt))),
                    BinaryOp::Gte => Ok(Value::Boolean(compare_values(&l, &r, CompareOp::Gte))),
                    BinaryOp::In => eval_in(&l, &r),
                    BinaryOp::And | BinaryOp::Or | BinaryOp::NullishCoalesce => unreachable!(),
                }
            }
        }
    }

    fn eval_unary(
        &self,
        op: UnaryOp,
        argument: &Node,
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Value, EvalError> {
        match op {
            UnaryOp::TypeOf => {
                let v = self.execute_node(argument, ctx, walker, options)?;
                Ok(Value::string(get_javascript_type(&v)))
            }
            UnaryOp::Void => {
                self.execute_node(argument, ctx, walker, options)?;
                Ok(Value::Null)
            }
            UnaryOp::Plus => {
                let v = self.execute_node(argument, ctx, walker, options)?;
                Ok(Value::Number(to_number(&v).0))
            }
            UnaryOp::Minus => {
                let v = self.execute_node(argument, ctx, walker, options)?;
                Ok(Value::Number(-to_number(&v).0))
            }
            UnaryOp::Not => {
                let v = self.execute_node(argument, ctx, walker, options)?;
                Ok(Value::Boolean(!to_bool(&v)))
            }
        }
    }

    fn eval_call(
        &self,
        callee: &Node,
        arguments: &[Node],
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Value, EvalError> {
        match callee {
            Node::Identifier(name) => {
                if let Some(f) = self.registry.get(name) {
                    let args = self.eval_args(arguments, ctx, walker, options)?;
                    check_arity(&f, args.len(), false)?;
                    return f.call(&args);
                }
                Err(EvalError::runtime(format!(
                    "function '{}' is not defined",
                    name
                )))
            }
            Node::Member { object, property } => {
                if let Node::Identifier(namespace) = object.as_ref() {
                    if QUALIFIED_NAMESPACES.contains(&namespace.as_str()) {
                        let qualified = format!("{}.{}", namespace, property);
                        if let Some(f) = self.registry.get(&qualified) {
                            let args = self.eval_args(arguments, ctx, walker, options)?;
                            check_arity(&f, args.len(), false)?;
                            return f.call(&args);
                        }
                    }
                }
                let obj = self.execute_node(object, ctx, walker, options)?;
                self.eval_method_call(&obj, property, arguments, ctx, walker, options)
            }
            Node::Index { object, property } => {
                let obj = self.execute_node(object, ctx, walker, options)?;
                let prop = self.execute_node(property, ctx, walker, options)?;
                let name = to_string(&prop);
                self.eval_method_call(&obj, &name, arguments, ctx, walker, options)
            }
            _ => Err(EvalError::type_error("call target is not callable")),
        }
    }

    fn eval_args(
        &self,
        arguments: &[Node],
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Vec<Value>, EvalError> {
        let mut args = Vec::with_capacity(arguments.len());
        for arg in arguments {
            args.push(self.execute_node(arg, ctx, walker, options)?);
        }
        Ok(args)
    }

    fn eval_method_call(
        &self,
        obj: &Value,
        method: &str,
        arguments: &[Node],
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Value, EvalError> {
        if ARRAY_METHODS.contains(&method) && matches!(obj, Value::Array(_)) {
            return self.call_array_method(method, obj, arguments, ctx, walker, options);
        }
        let mut args = Vec::with_capacity(arguments.len() + 1);
        args.push(obj.clone());
        for arg in arguments {
            args.push(self.execute_node(arg, ctx, walker, options)?);
        }
        let f = self
            .registry
            .get(method)
            .ok_or_else(|| EvalError::runtime(format!("method '{}' is not defined", method)))?;
        check_arity(&f, args.len(), true)?;
        f.call(&args)
    }

    fn call_array_method(
        &self,
        method: &str,
        array: &Value,
        arguments: &[Node],
        ctx: &ExpressionContext,
        walker: &mut Walker,
        options: &ExecutionOptions,
    ) -> Result<Value, EvalError> {
        if arguments.is_empty() {
            return Err(EvalError::type_error(format!(
                "{} requires a callback argument",
                method
            )));
        }
        let callback = &arguments[0];
        if !matches!(callback, Node::Arrow { .. }) {
            return Err(EvalError::type_error(format!(
                "{} requires an arrow function callback",
                method
            )));
        }
        let array_ops = self.array_ops.read().expect("array ops lock poisoned").clone();
        if method == "reduce" {
            let initial = match arguments.get(1) {
                Some(n) => Some(self.execute_node(n, ctx, walker, options)?),
                None => None,
            };
            let mut eval = |node: &Node, ctx: &ExpressionContext| self.execute_node(node, ctx, walker, options);
            return array_ops.reduce(array, callback, initial, ctx, &mut eval);
        }
        let mut eval = |node: &Node, ctx: &ExpressionContext| self.execute_node(node, ctx, walker, options);
        match method {
            "filter" => array_ops.filter(array, callback, ctx, &mut eval),
            "map" => array_ops.map(array, callback, ctx, &mut eval),
            "find" => array_ops.find(array, callback, ctx, &mut eval),
            "some" => array_ops.some(array, callback, ctx, &mut eval),
            "every" => array_ops.every(array, callback, ctx, &mut eval),
            _ => unreachable!("checked against ARRAY_METHODS above"),
        }
    }
}

/// Identifier resolution order: context-reserved names, then context
/// variables, then language constants, then `Undefined` for anything else
/// (JS "undefined" behavior, not an error).
fn resolve_identifier(name: &str, ctx: &ExpressionContext) -> Value {
    match name {
        "item" => return ctx.item.clone(),
        "items" => return ctx.items.clone(),
        _ => {}
    }
    if let Some(value) = ctx.variable(name) {
        return value.clone();
    }
    match name {
        "null" => Value::Null,
        "undefined" => Value::Undefined,
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "Infinity" => Value::Number(f64::INFINITY),
        "NaN" => Value::Number(f64::NAN),
        "Math" => math_object(),
        _ => Value::Undefined,
    }
}

fn math_object() -> Value {
    let mut map = IndexMap::new();
    map.insert("PI".to_string(), Value::Number(std::f64::consts::PI));
    map.insert("E".to_string(), Value::Number(std::f64::consts::E));
    map.insert("LN2".to_string(), Value::Number(std::f64::consts::LN_2));
    map.insert("LN10".to_string(), Value::Number(std::f64::consts::LN_10));
    map.insert("LOG2E".to_string(), Value::Number(std::f64::consts::LOG2_E));
    map.insert("LOG10E".to_string(), Value::Number(std::f64::consts::LOG10_E));
    map.insert("SQRT2".to_string(), Value::Number(std::f64::consts::SQRT_2));
    map.insert(
        "SQRT1_2".to_string(),
        Value::Number(std::f64::consts::FRAC_1_SQRT_2),
    );
    Value::object(map)
}

/// `left in right`: `ToString(left)` in the keys of a right-hand object;
/// for a right-hand array, `left` must parse as a decimal integer and be
/// a valid index.
fn eval_in(left: &Value, right: &Value) -> Result<Value, EvalError> {
    match right {
        Value::Object(map) => Ok(Value::Boolean(map.contains_key(&to_string(left)))),
        Value::Array(items) => {
            let index = to_array_index(left);
            Ok(Value::Boolean(index >= 0 && (index as usize) < items.len()))
        }
        _ => Err(EvalError::type_error(
            "in requires an object or array on the right-hand side",
        )),
    }
}

/// Arity validation: `len(args) >= effective_min` and (`max < 0` or
/// `len(args) <= max`). `is_method_call` reduces the
/// declared minimum by 1 (`obj` is implicit from the caller's
/// perspective) while `len` still counts the full argument list
/// including `obj`.
fn check_arity(f: &SafeFunction, len: usize, is_method_call: bool) -> Result<(), EvalError> {
    let effective_min = if is_method_call {
        f.min_args.saturating_sub(1)
    } else {
        f.min_args
    };
    if len < effective_min {
        return Err(EvalError::type_error(format!(
            "{}: expected at least {} argument(s), got {}",
            f.name, effective_min, len
        )));
    }
    if f.max_args >= 0 && len > f.max_args as usize {
        return Err(EvalError::type_error(format!(
            "{}: expected at most {} argument(s), got {}",
            f.name, f.max_args, len
        )));
    }
    Ok(())
}
