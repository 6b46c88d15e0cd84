//! JXON is a data-interchange language that generalizes JSON along three
//! axes: embedded XML element values, a companion schema language (JXSD),
//! and a module system with imports, exports, variable bindings, and type
//! annotations.
//!
//! This crate re-exports the whole toolkit behind one API:
//!
//! ```
//! use jxon::{Config, emit_value, infer_schema, parse_value, validate};
//!
//! let value = parse_value("{\"xs\": [1, 2], \"tag\": <b>hi</b>}").unwrap();
//! let schema = infer_schema(&value).unwrap().unwrap();
//! assert!(validate(&schema, &value));
//!
//! let compact = emit_value(&value, &Config::compact()).unwrap();
//! assert_eq!(parse_value(&compact).unwrap(), value);
//! ```

use thiserror::Error;

pub use jxon_value::module::{AlreadySetError, ResolveError};
pub use jxon_value::value::{Array, Value, ValueKind};
pub use jxon_value::{EnumMember, JxonType, Module, Object, SimpleKind, XmlElement};

pub use jxon_parser::{
    Dialect, ParseError, ParserError, parse_combined, parse_combined_file, parse_module,
    parse_module_file, parse_schema, parse_schema_file, parse_value, parse_value_file,
};

pub use jxon_fmt::{Config, EncodeError, emit_schema, emit_value};

pub use jxon_schema::{
    SchemaError, has_consistent_schema, infer_schema, validate, validate_filling,
};

pub use jxon_json::{JsonError, json_to_value, value_to_json};

/// Any error this crate can produce, for callers that mix operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParserError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Json(#[from] JsonError),
}

/// Structural equality over values: scalars by value, arrays and objects
/// recursively, XML by tag, attributes (order-insensitive), text, tail, and
/// children in order. The same relation as `==`, named for symmetry with the
/// emitter API.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    a == b
}
