//! Uniform dot/bracket property resolution across value shapes. No direct
//! teacher counterpart (`boa` resolves properties via its GC'd
//! object/prototype system, which this crate has no equivalent of: no
//! prototype chain, no method resolution here, methods are handled by
//! the Executor via the Function Registry instead).

use crate::value::{to_array_index, to_string, Value};

/// `object[property]` / `object.property`, after the property has already
/// been coerced to a runtime `Value` (a bracket expression's evaluated
/// operand, or a dot expression's identifier wrapped as a string). Never
/// fails: absent properties and null objects both resolve to `Value::Null`
/// (null-safe chaining).
pub fn access(object: &Value, property: &Value) -> Value {
    if matches!(object, Value::Null | Value::Undefined) {
        return Value::Null;
    }

    let index = to_array_index(property);

    match object {
        Value::Array(items) => {
            let key = to_string(property);
            if key == "length" {
                return Value::Number(items.len() as f64);
            }
            if index >= 0 {
                return items
                    .get(index as usize)
                    .cloned()
                    .unwrap_or(Value::Null);
            }
            Value::Null
        }
        Value::String(s) => {
            let key = to_string(property);
            if key == "length" {
                return Value::Number(s.chars().count() as f64);
            }
            if index >= 0 {
                return s
                    .chars()
                    .nth(index as usize)
                    .map(|c| Value::string(c.to_string()))
                    .unwrap_or(Value::Null);
            }
            Value::Null
        }
        Value::Object(map) => {
            let key = to_string(property);
            map.get(&key).cloned().unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn null_object_short_circuits() {
        assert_eq!(access(&Value::Null, &Value::string("x")), Value::Null);
        assert_eq!(access(&Value::Undefined, &Value::string("x")), Value::Null);
    }

    #[test]
    fn array_length_and_indexing() {
        let arr = Value::array(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(access(&arr, &Value::string("length")), Value::Number(2.0));
        assert_eq!(access(&arr, &Value::Number(0.0)), Value::Number(1.0));
        assert_eq!(access(&arr, &Value::Number(99.0)), Value::Null);
        assert_eq!(access(&arr, &Value::string("foo")), Value::Null);
    }

    #[test]
    fn string_length_and_indexing() {
        let s = Value::string("ab");
        assert_eq!(access(&s, &Value::string("length")), Value::Number(2.0));
        assert_eq!(access(&s, &Value::Number(1.0)), Value::string("b"));
        assert_eq!(access(&s, &Value::Number(5.0)), Value::Null);
    }

    #[test]
    fn object_property_and_explicit_length() {
        let mut map = IndexMap::new();
        map.insert("length".to_string(), Value::Number(42.0));
        map.insert("a".to_string(), Value::Number(1.0));
        let obj = Value::object(map);
        assert_eq!(access(&obj, &Value::string("length")), Value::Number(42.0));
        assert_eq!(access(&obj, &Value::string("a")), Value::Number(1.0));
        assert_eq!(access(&obj, &Value::string("missing")), Value::Null);
    }

    #[test]
    fn object_without_length_key_reports_null() {
        let obj = Value::object(IndexMap::new());
        assert_eq!(access(&obj, &Value::string("length")), Value::Null);
    }

    #[test]
    fn scalar_other_kinds_report_null() {
        assert_eq!(access(&Value::Number(1.0), &Value::string("length")), Value::Null);
        assert_eq!(access(&Value::Boolean(true), &Value::string("x")), Value::Null);
    }
}
