//! `NormalizeValue`, `ToNumber`, `ToBool`, `ToString`, `ToArrayIndex`.

use super::Value;
use std::rc::Rc;

/// Converts host string-like wrappers to native strings; leaves other
/// values untouched. A no-op in this crate's own value model (there is no
/// separate host string wrapper type), but kept as its own pass: applied
/// at the result boundary of literals and the final return of
/// conditional/nullish expressions, so normalization stays idempotent
/// and has somewhere concrete to hold.
pub fn normalize_value(value: Value) -> Value {
    value
}

/// `(value, ok)` where `ok` is `false` exactly when `value` is `NaN`.
pub fn to_number(value: &Value) -> (f64, bool) {
    let n = match value {
        Value::Null => 0.0,
        Value::Undefined => f64::NAN,
        Value::Boolean(true) => 1.0,
        Value::Boolean(false) => 0.0,
        Value::Number(n) => *n,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                fast_float::parse::<f64, _>(trimmed).unwrap_or(f64::NAN)
            }
        }
        Value::Array(items) => match items.len() {
            0 => 0.0,
            1 => to_number(&items[0]).0,
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    };
    (n, !n.is_nan())
}

/// `false` for null/undefined, `false`, `0`, `NaN`, `""`; `true` otherwise
/// (including empty arrays and empty objects, matching JS).
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null | Value::Undefined => false,
        Value::Boolean(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// JS-style `ToString`: integers render without a trailing `.0`,
/// non-finite numbers spell out `Infinity`/`-Infinity`/`NaN`, arrays join
/// `ToString` of each element with commas (nulls render as empty), and
/// objects render as the fixed string `"[object Object]"`.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Boolean(true) => "true".to_string(),
        Value::Boolean(false) => "false".to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null | Value::Undefined => String::new(),
                other => to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(n).to_string()
}

/// A non-negative integer if `v` is a non-negative integer number or a
/// decimal integer string; `-1` otherwise.
pub fn to_array_index(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if *n >= 0.0 && n.fract() == 0.0 && n.is_finite() {
                *n as i64
            } else {
                -1
            }
        }
        Value::String(s) => {
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse::<i64>().unwrap_or(-1)
            } else {
                -1
            }
        }
        _ => -1,
    }
}

pub fn rc_str(s: &str) -> Rc<str> {
    Rc::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::rc::Rc;

    #[test]
    fn to_number_matches_js_semantics() {
        assert_eq!(to_number(&Value::Null).0, 0.0);
        assert_eq!(to_number(&Value::Boolean(true)).0, 1.0);
        assert_eq!(to_number(&Value::Boolean(false)).0, 0.0);
        assert_eq!(to_number(&Value::String(rc_str(""))).0, 0.0);
        assert_eq!(to_number(&Value::String(rc_str("  42  "))).0, 42.0);
        assert!(to_number(&Value::String(rc_str("nope"))).0.is_nan());
        assert_eq!(
            to_number(&Value::Array(Rc::new(vec![]))).0,
            0.0
        );
        assert_eq!(
            to_number(&Value::Array(Rc::new(vec![Value::Number(5.0)]))).0,
            5.0
        );
        assert!(
            to_number(&Value::Array(Rc::new(vec![Value::Number(1.0), Value::Number(2.0)])))
                .0
                .is_nan()
        );
    }

    #[test]
    fn to_bool_matches_js_semantics() {
        assert!(!to_bool(&Value::Null));
        assert!(!to_bool(&Value::Undefined));
        assert!(!to_bool(&Value::Number(0.0)));
        assert!(!to_bool(&Value::Number(f64::NAN)));
        assert!(!to_bool(&Value::String(rc_str(""))));
        assert!(to_bool(&Value::Array(Rc::new(vec![]))));
        assert!(to_bool(&Value::String(rc_str("0"))));
    }

    #[test]
    fn to_string_formats_numbers_js_style() {
        assert_eq!(to_string(&Value::Number(5.0)), "5");
        assert_eq!(to_string(&Value::Number(5.5)), "5.5");
        assert_eq!(to_string(&Value::Number(f64::NAN)), "NaN");
        assert_eq!(to_string(&Value::Number(f64::INFINITY)), "Infinity");
        assert_eq!(to_string(&Value::Number(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(to_string(&Value::Null), "null");
        assert_eq!(to_string(&Value::Undefined), "undefined");
    }

    #[test]
    fn to_array_index_accepts_only_non_negative_integers() {
        assert_eq!(to_array_index(&Value::Number(3.0)), 3);
        assert_eq!(to_array_index(&Value::Number(-1.0)), -1);
        assert_eq!(to_array_index(&Value::Number(1.5)), -1);
        assert_eq!(to_array_index(&Value::String(rc_str("12"))), 12);
        assert_eq!(to_array_index(&Value::String(rc_str("-1"))), -1);
        assert_eq!(to_array_index(&Value::String(rc_str("1.5"))), -1);
    }
}
