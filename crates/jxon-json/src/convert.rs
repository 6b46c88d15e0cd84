use num_bigint::BigInt;
use serde_json::json;

use jxon_value::value::{Array, Value};
use jxon_value::Object;

use crate::error::JsonError;

/// Converts a JXON value to a JSON value. XML elements, schemas, and modules
/// have no JSON counterpart and are rejected.
pub fn value_to_json(value: &Value) -> Result<serde_json::Value, JsonError> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(json!(*b)),
        Value::Integer(i) => {
            if let Ok(n) = i64::try_from(i) {
                Ok(json!(n))
            } else if let Ok(n) = u64::try_from(i) {
                Ok(json!(n))
            } else {
                Err(JsonError::IntegerOutOfRange)
            }
        }
        Value::Float(f) => {
            if f.is_finite() {
                Ok(json!(*f))
            } else {
                Err(JsonError::NonFiniteFloat)
            }
        }
        Value::String(s) => Ok(json!(s)),
        Value::Array(Array(items)) => {
            let converted: Result<Vec<_>, _> = items.iter().map(value_to_json).collect();
            Ok(serde_json::Value::Array(converted?))
        }
        Value::Object(map) => {
            let mut object = serde_json::Map::new();
            for (key, member) in map.iter() {
                object.insert(key.clone(), value_to_json(member)?);
            }
            Ok(serde_json::Value::Object(object))
        }
        Value::Xml(_) | Value::Schema(_) | Value::Module(_) => {
            Err(JsonError::Unsupported(value.kind()))
        }
    }
}

/// Converts a JSON value to a JXON value. Always succeeds: JXON is a strict
/// superset of JSON on the value subset.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(BigInt::from(i))
            } else if let Some(u) = n.as_u64() {
                Value::Integer(BigInt::from(u))
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => {
            Value::Array(items.iter().map(json_to_value).collect::<Array>())
        }
        serde_json::Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(key, member)| (key.clone(), json_to_value(member)))
                .collect::<Object>(),
        ),
    }
}
