//! `GetJavaScriptType`: the JS-visible type name predicate.

use super::Value;

/// `"undefined" | "boolean" | "number" | "string" | "object" | "function"`.
/// `null` and arrays both report `"object"`, matching JS.
pub fn get_javascript_type(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "object",
        Value::Boolean(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "object",
        Value::Object(_) => "object",
    }
}
