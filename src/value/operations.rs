//! Binary operator semantics, `CompareValues`, and the two equality
//! relations.

use super::conversions::{to_bool, to_number, to_string};
use super::Value;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
}

/// For `<`/`<=`/`>`/`>=`: lexicographic compare if both sides are strings,
/// otherwise numeric compare after `ToNumber` (NaN makes every relational
/// comparison false). For `Eq`: numeric equality after `ToNumber`, with
/// NaN != NaN.
pub fn compare_values(a: &Value, b: &Value, op: CompareOp) -> bool {
    if op != CompareOp::Eq {
        if let (Value::String(x), Value::String(y)) = (a, b) {
            return match op {
                CompareOp::Lt => x < y,
                CompareOp::Lte => x <= y,
                CompareOp::Gt => x > y,
                CompareOp::Gte => x >= y,
                CompareOp::Eq => unreachable!(),
            };
        }
    }
    let (x, _) = to_number(a);
    let (y, _) = to_number(b);
    match op {
        CompareOp::Lt => x < y,
        CompareOp::Lte => x <= y,
        CompareOp::Gt => x > y,
        CompareOp::Gte => x >= y,
        CompareOp::Eq => x == y,
    }
}

/// `+`: if either side's JS type is `"string"`, concatenate `ToString` of
/// each; otherwise numeric add after `ToNumber`. Deliberately keys off
/// `GetJavaScriptType`, not the shape of nested data: an array containing
/// a string is still type `"object"` and does not trigger concatenation.
pub fn add_values(a: &Value, b: &Value) -> Value {
    if matches!(a, Value::String(_)) || matches!(b, Value::String(_)) {
        let mut s = to_string(a);
        s.push_str(&to_string(b));
        Value::String(Rc::from(s.as_str()))
    } else {
        Value::Number(to_number(a).0 + to_number(b).0)
    }
}

pub fn is_nullish(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Undefined)
}

/// `===`: both null-ish variants equal only themselves (`null === null`,
/// `undefined === undefined`, but `null === undefined` is false);
/// primitives compare by value; arrays/objects compare by reference
/// identity, matching JS (two structurally identical arrays are never
/// `===`).
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => false,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// `==`: strict equal, OR both sides nullish (this is where `null ==
/// undefined` holds while `null === undefined` does not), OR (either side
/// a string) string compare of `ToString`, OR numeric equal via
/// `CompareValues`. Nullish values are checked first so that e.g.
/// `null == 0` correctly reports false rather than falling through to a
/// numeric comparison.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    if is_nullish(a) || is_nullish(b) {
        return is_nullish(a) && is_nullish(b);
    }
    if strict_equals(a, b) {
        return true;
    }
    if matches!(a, Value::String(_)) || matches!(b, Value::String(_)) {
        return to_string(a) == to_string(b);
    }
    compare_values(a, b, CompareOp::Eq)
}
