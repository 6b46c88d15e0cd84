//! Deterministic pretty-printer for JXON values and JXSD schemas.
//!
//! The compact form (`indent: None`) is a minimal single line; the pretty
//! form places container items on their own lines at `indent` spaces per
//! level. `sort_keys` orders object/record fields and enum members at emit
//! time without mutating the value.

mod config;
mod error;
mod printer;

pub use config::Config;
pub use error::EncodeError;

use jxon_value::{JxonType, Value};

use printer::Printer;

/// Renders a value in JXON surface syntax.
pub fn emit_value(value: &Value, config: &Config) -> Result<String, EncodeError> {
    let mut printer = Printer::new(config);
    printer.write_value(value, 0)?;
    Ok(printer.finish())
}

/// Renders a schema in JXSD surface syntax.
pub fn emit_schema(schema: &JxonType, config: &Config) -> Result<String, EncodeError> {
    let mut printer = Printer::new(config);
    printer.write_schema(schema, 0)?;
    Ok(printer.finish())
}
