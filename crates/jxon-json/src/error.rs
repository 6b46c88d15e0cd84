use thiserror::Error;

use jxon_value::ValueKind;

/// Errors converting a JXON value into JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JsonError {
    #[error("Integer value is out of range for a JSON number")]
    IntegerOutOfRange,

    #[error("Non-finite floating point value is not supported in JSON")]
    NonFiniteFloat,

    #[error("{0} values cannot be represented in JSON")]
    Unsupported(ValueKind),
}
