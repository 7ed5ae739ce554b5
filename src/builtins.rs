//! `default_registry()`: a representative, not exhaustive, starter set of
//! host functions. Grounded on `boa_engine/src/builtins/math/mod.rs`
//! (constant/method names: `abs`, `round`, `floor`, `ceil`, `max`, `min`,
//! `pow`, `sqrt`), `.../json/mod.rs` (`JSON.parse`/`JSON.stringify` as the
//! two static methods on a non-constructible namespace object), and
//! `.../array/mod.rs` / `.../string/mod.rs` for the instance-method surface
//! (`includes`, `indexOf`, `slice`, `join`, `split`, case conversion).
//! Unlike `boa`, there is no prototype chain here to hang these off of:
//! every name is a flat `FunctionRegistry` entry, and the Executor decides
//! whether a dot-call is a qualified namespace lookup or an instance
//! method by the object expression in callee position.
//!
//! A host embedding this crate is expected to build its own registry (via
//! `FunctionRegistry::register`) rather than rely solely on this one; it
//! exists so the crate is usable out of the box and so the array-method
//! and qualified-call dispatch paths have something real to exercise.

use crate::error::EvalError;
use crate::registry::{FunctionRegistry, SafeFunction};
use crate::value::{strict_equals, to_bool, to_number, to_string, Value};
use indexmap::IndexMap;

pub fn default_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    register_math(&mut registry);
    register_json(&mut registry);
    register_object(&mut registry);
    register_conversions(&mut registry);
    register_string_methods(&mut registry);
    register_array_methods(&mut registry);
    registry
}

fn register_math(registry: &mut FunctionRegistry) {
    let unary = [
        ("abs", f64::abs as fn(f64) -> f64),
        ("floor", f64::floor),
        ("ceil", f64::ceil),
        ("round", f64::round),
        ("trunc", f64::trunc),
        ("sqrt", f64::sqrt),
    ];
    for (name, op) in unary {
        for qualified in [name.to_string(), format!("Math.{}", name)] {
            let op = op;
            registry.register(SafeFunction::new(qualified, 1, 1, move |args: &[Value]| {
                Ok(Value::Number(op(to_number(&args[0]).0)))
            }));
        }
    }

    for name in ["pow", "Math.pow"] {
        registry.register(SafeFunction::new(name, 2, 2, |args: &[Value]| {
            Ok(Value::Number(to_number(&args[0]).0.powf(to_number(&args[1]).0)))
        }));
    }

    for name in ["max", "Math.max"] {
        registry.register(SafeFunction::new(name, 0, -1, |args: &[Value]| {
            let max = args
                .iter()
                .map(|v| to_number(v).0)
                .fold(f64::NEG_INFINITY, f64::max);
            Ok(Value::Number(max))
        }));
    }
    for name in ["min", "Math.min"] {
        registry.register(SafeFunction::new(name, 0, -1, |args: &[Value]| {
            let min = args
                .iter()
                .map(|v| to_number(v).0)
                .fold(f64::INFINITY, f64::min);
            Ok(Value::Number(min))
        }));
    }
}

fn register_json(registry: &mut FunctionRegistry) {
    registry.register(SafeFunction::new("JSON.stringify", 1, 1, |args: &[Value]| {
        serde_json::to_string(&args[0])
            .map(Value::string)
            .map_err(|e| EvalError::runtime(format!("JSON.stringify failed: {}", e)))
    }));
    registry.register(SafeFunction::new("JSON.parse", 1, 1, |args: &[Value]| {
        let source = to_string(&args[0]);
        let parsed: serde_json::Value = serde_json::from_str(&source)
            .map_err(|e| EvalError::syntax(format!("JSON.parse failed: {}", e)))?;
        Ok(json_to_value(&parsed))
    }));
}

fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => Value::array(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => {
            let mut out = IndexMap::new();
            for (k, v) in map {
                out.insert(k.clone(), json_to_value(v));
            }
            Value::object(out)
        }
    }
}

fn register_object(registry: &mut FunctionRegistry) {
    registry.register(SafeFunction::new("Object.keys", 1, 1, |args: &[Value]| match &args[0] {
        Value::Object(map) => Ok(Value::array(map.keys().map(Value::string).collect())),
        _ => Err(EvalError::type_error("Object.keys requires an object")),
    }));
    registry.register(SafeFunction::new("Object.values", 1, 1, |args: &[Value]| match &args[0] {
        Value::Object(map) => Ok(Value::array(map.values().cloned().collect())),
        _ => Err(EvalError::type_error("Object.values requires an object")),
    }));
    registry.register(SafeFunction::new("Object.entries", 1, 1, |args: &[Value]| match &args[0] {
        Value::Object(map) => Ok(Value::array(
            map.iter()
                .map(|(k, v)| Value::array(vec![Value::string(k), v.clone()]))
                .collect(),
        )),
        _ => Err(EvalError::type_error("Object.entries requires an object")),
    }));
    registry.register(SafeFunction::new("Array.isArray", 1, 1, |args: &[Value]| {
        Ok(Value::Boolean(matches!(args[0], Value::Array(_))))
    }));
}

fn register_conversions(registry: &mut FunctionRegistry) {
    registry.register(SafeFunction::new("isNaN", 1, 1, |args: &[Value]| {
        Ok(Value::Boolean(to_number(&args[0]).0.is_nan()))
    }));
    registry.register(SafeFunction::new("String", 1, 1, |args: &[Value]| {
        Ok(Value::string(to_string(&args[0])))
    }));
    registry.register(SafeFunction::new("Number", 1, 1, |args: &[Value]| {
        Ok(Value::Number(to_number(&args[0]).0))
    }));
    registry.register(SafeFunction::new("Boolean", 1, 1, |args: &[Value]| {
        Ok(Value::Boolean(to_bool(&args[0])))
    }));
}

fn register_string_methods(registry: &mut FunctionRegistry) {
    registry.register(SafeFunction::new("toUpperCase", 1, 1, |args: &[Value]| {
        Ok(Value::string(to_string(&args[0]).to_uppercase()))
    }));
    registry.register(SafeFunction::new("toLowerCase", 1, 1, |args: &[Value]| {
        Ok(Value::string(to_string(&args[0]).to_lowercase()))
    }));
    registry.register(SafeFunction::new("trim", 1, 1, |args: &[Value]| {
        Ok(Value::string(to_string(&args[0]).trim().to_string()))
    }));
    registry.register(SafeFunction::new("startsWith", 2, 2, |args: &[Value]| {
        Ok(Value::Boolean(
            to_string(&args[0]).starts_with(&to_string(&args[1])),
        ))
    }));
    registry.register(SafeFunction::new("endsWith", 2, 2, |args: &[Value]| {
        Ok(Value::Boolean(
            to_string(&args[0]).ends_with(&to_string(&args[1])),
        ))
    }));
    registry.register(SafeFunction::new("charAt", 2, 2, |args: &[Value]| {
        let s = to_string(&args[0]);
        let index = to_number(&args[1]).0;
        if index < 0.0 {
            return Ok(Value::string(""));
        }
        Ok(s
            .chars()
            .nth(index as usize)
            .map(|c| Value::string(c.to_string()))
            .unwrap_or_else(|| Value::string("")))
    }));
    registry.register(SafeFunction::new("split", 2, 2, |args: &[Value]| {
        let s = to_string(&args[0]);
        let sep = to_string(&args[1]);
        let parts = if sep.is_empty() {
            s.chars().map(|c| Value::string(c.to_string())).collect()
        } else {
            s.split(sep.as_str()).map(Value::string).collect()
        };
        Ok(Value::array(parts))
    }));

    // `includes`/`indexOf`/`slice` are polymorphic over string and array
    // receivers since the registry has no per-type overloading.
    registry.register(SafeFunction::new("includes", 2, 2, |args: &[Value]| {
        Ok(Value::Boolean(match &args[0] {
            Value::Array(items) => items.iter().any(|item| strict_equals(item, &args[1])),
            other => to_string(other).contains(&to_string(&args[1])),
        }))
    }));
    registry.register(SafeFunction::new("indexOf", 2, 2, |args: &[Value]| match &args[0] {
        Value::Array(items) => {
            let position = items.iter().position(|item| strict_equals(item, &args[1]));
            Ok(Value::Number(position.map_or(-1.0, |i| i as f64)))
        }
        other => {
            let haystack = to_string(other);
            let needle = to_string(&args[1]);
            match haystack.find(needle.as_str()) {
                Some(byte_index) => Ok(Value::Number(haystack[..byte_index].chars().count() as f64)),
                None => Ok(Value::Number(-1.0)),
            }
        }
    }));
    registry.register(SafeFunction::new("slice", 2, 3, |args: &[Value]| match &args[0] {
        Value::Array(items) => {
            let (start, end) = slice_bounds(items.len(), &args[1..]);
            Ok(Value::array(items[start..end].to_vec()))
        }
        other => {
            let chars: Vec<char> = to_string(other).chars().collect();
            let (start, end) = slice_bounds(chars.len(), &args[1..]);
            Ok(Value::string(chars[start..end].iter().collect::<String>()))
        }
    }));
}

/// Clamps a JS-style `slice(start[, end])` pair (either may be absent or
/// negative, meaning "from the end") to a valid `start..end` range.
fn slice_bounds(len: usize, rest: &[Value]) -> (usize, usize) {
    let resolve = |raw: f64, default: usize| -> usize {
        if raw.is_nan() {
            return default;
        }
        if raw < 0.0 {
            (len as f64 + raw).max(0.0) as usize
        } else {
            (raw as usize).min(len)
        }
    };
    let start = rest.first().map_or(0, |v| resolve(to_number(v).0, 0));
    let end = rest.get(1).map_or(len, |v| resolve(to_number(v).0, len));
    if start >= end {
        (0, 0)
    } else {
        (start, end)
    }
}

fn register_array_methods(registry: &mut FunctionRegistry) {
    registry.register(SafeFunction::new("join", 2, 2, |args: &[Value]| match &args[0] {
        Value::Array(items) => {
            let separator = to_string(&args[1]);
            Ok(Value::string(
                items.iter().map(to_string).collect::<Vec<_>>().join(&separator),
            ))
        }
        _ => Err(EvalError::type_error("join requires an array")),
    }));
    registry.register(SafeFunction::new("concat", 1, -1, |args: &[Value]| match &args[0] {
        Value::Array(items) => {
            let mut combined = items.as_ref().clone();
            for extra in &args[1..] {
                match extra {
                    Value::Array(more) => combined.extend(more.iter().cloned()),
                    other => combined.push(other.clone()),
                }
            }
            Ok(Value::array(combined))
        }
        _ => Err(EvalError::type_error("concat requires an array")),
    }));
    registry.register(SafeFunction::new("reverse", 1, 1, |args: &[Value]| match &args[0] {
        Value::Array(items) => {
            let mut reversed = items.as_ref().clone();
            reversed.reverse();
            Ok(Value::array(reversed))
        }
        _ => Err(EvalError::type_error("reverse requires an array")),
    }));
    registry.register(SafeFunction::new("sort", 1, 1, |args: &[Value]| match &args[0] {
        Value::Array(items) => {
            let mut sorted = items.as_ref().clone();
            sorted.sort_by(|a, b| to_string(a).cmp(&to_string(b)));
            Ok(Value::array(sorted))
        }
        _ => Err(EvalError::type_error("sort requires an array")),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use crate::context::ExpressionContext;
    use crate::exec::Executor;

    fn call(name: &str, args: Vec<Node>) -> Node {
        Node::Call {
            callee: Box::new(Node::Identifier(name.to_string())),
            arguments: args,
        }
    }

    #[test]
    fn math_abs_is_registered_bare_and_qualified() {
        let registry = default_registry();
        assert!(registry.has("abs"));
        assert!(registry.has("Math.abs"));
    }

    #[test]
    fn json_round_trips_through_registry() {
        let executor = Executor::new(default_registry());
        let ctx = ExpressionContext::new(Value::Null, Value::array(vec![]));
        let node = call(
            "JSON.parse",
            vec![Node::StringLiteral("[1,2,3]".to_string())],
        );
        let result = executor.execute(&node, &ctx);
        assert_eq!(
            result.value,
            Some(Value::array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0)
            ]))
        );
    }

    #[test]
    fn string_slice_supports_negative_indices() {
        let registry = default_registry();
        let f = registry.get("slice").unwrap();
        let result = f
            .call(&[Value::string("hello"), Value::Number(-3.0)])
            .unwrap();
        assert_eq!(result, Value::string("llo"));
    }

    #[test]
    fn includes_is_polymorphic_over_arrays_and_strings() {
        let registry = default_registry();
        let f = registry.get("includes").unwrap();
        let on_array = f
            .call(&[
                Value::array(vec![Value::Number(1.0), Value::Number(2.0)]),
                Value::Number(2.0),
            ])
            .unwrap();
        assert_eq!(on_array, Value::Boolean(true));
        let on_string = f
            .call(&[Value::string("hello"), Value::string("ell")])
            .unwrap();
        assert_eq!(on_string, Value::Boolean(true));
    }

    #[test]
    fn math_sqrt_is_approximately_correct() {
        use float_cmp::approx_eq;

        let registry = default_registry();
        let f = registry.get("Math.sqrt").unwrap();
        let result = f.call(&[Value::Number(2.0)]).unwrap();
        let n = match result {
            Value::Number(n) => n,
            other => panic!("expected a number, got {:?}", other),
        };
        assert!(approx_eq!(f64, n, std::f64::consts::SQRT_2, ulps = 2));
    }
}
