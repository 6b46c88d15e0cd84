//! JSON interop for JXON values.
//!
//! JXON is a strict superset of JSON on the value subset, so every JSON value
//! converts losslessly into a [`jxon_value::Value`]; the reverse direction
//! rejects the extensions (XML elements, schemas, modules) and numbers JSON
//! cannot carry.

mod convert;
mod error;

pub use convert::{json_to_value, value_to_json};
pub use error::JsonError;
