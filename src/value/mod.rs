//! The dynamically typed value cell every expression evaluates to, and
//! the pure coercion/comparison contracts used to convert between value
//! kinds.

pub mod conversions;
pub mod operations;
mod r#type;


pub use conversions::{normalize_value, to_array_index, to_bool, to_number, to_string};
pub use operations::{add_values, compare_values, is_nullish, loose_equals, strict_equals, CompareOp};
pub use r#type::get_javascript_type;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

/// One of: null, undefined, boolean, number (IEEE-754 double), string,
/// ordered sequence of `Value` (array), mapping from string to `Value`
/// (object). `Null` and `Undefined` are kept as distinct variants and
/// agree on every operation where JavaScript treats them as
/// interchangeable (`ToBool`, `ToNumber`, null-safe chaining, `??`, loose
/// `==`); they differ only on `ToString`, `typeof`, and strict `===`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Array(Rc<Vec<Value>>),
    Object(Rc<IndexMap<String, Value>>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(items))
    }

    pub fn object(entries: IndexMap<String, Value>) -> Self {
        Value::Object(Rc::new(entries))
    }

    /// The JS-visible type name.
    pub fn type_name(&self) -> &'static str {
        get_javascript_type(self)
    }

    pub fn is_nullish(&self) -> bool {
        is_nullish(self)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string(self))
    }
}

/// Both `Null` and `Undefined` normalize to JSON `null`: the two variants
/// are unified at this serialization boundary, not inside the value
/// model itself.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null | Value::Undefined => serializer.serialize_none(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut ser_map = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    ser_map.serialize_entry(k, v)?;
                }
                ser_map.end()
            }
        }
    }
}
