use thiserror::Error;

use jxon_value::ValueKind;

/// Failure to render a value or schema as text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("Non-finite float {0} cannot be encoded")]
    NonFiniteFloat(f64),

    /// An undetermined slot (`List(None)` emits as `[]`, but a record field
    /// with no schema has no JXSD surface syntax).
    #[error("Cannot encode an undetermined schema")]
    UndeterminedSchema,

    #[error("{0} cannot be encoded into JXON")]
    Unencodable(ValueKind),
}
