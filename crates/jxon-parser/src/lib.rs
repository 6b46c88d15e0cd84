//! Recursive-descent parsers for the JXON data language, the JXSD schema
//! language, and legacy JSON/XML sources.
//!
//! The three dialects share one grammar; they differ only in which leading
//! tokens are accepted as values, whether type annotations are allowed, and
//! how imports are routed by file extension (see [`Dialect`]). Parsing a
//! source yields a [`Module`]; plain values are the module's default export.

mod chars;
mod cursor;
mod error;
mod jxsd;
mod loader;
mod parser;
mod value;
mod xml;

pub use error::{ParseError, ParserError};
pub use parser::Dialect;

use std::fs;
use std::path::{Path, PathBuf};

use jxon_value::{JxonType, Module, Value};

use parser::Parser;

/// Parses a single top-level value with the JXON dialect. A source without a
/// default export yields `Null`.
pub fn parse_value(source: &str) -> Result<Value, ParserError> {
    Parser::new(Dialect::Jxon, source, None).parse()
}

/// Parses a source with the full module grammar and extension-routed imports.
/// `base_dir` anchors `./` import paths.
pub fn parse_module(source: &str, base_dir: Option<&Path>) -> Result<Module, ParserError> {
    Parser::new(Dialect::Combined, source, base_dir.map(Path::to_path_buf)).parse_as_module()
}

/// Parses a JXSD source into a schema descriptor.
pub fn parse_schema(source: &str) -> Result<JxonType, ParserError> {
    let module = Parser::new(Dialect::Jxsd, source, None).parse_as_module()?;
    match module.into_default_export() {
        Some(Value::Schema(ty)) => Ok(ty),
        _ => Err(ParserError::MissingSchema),
    }
}

/// Parses with the JXON grammar plus cross-extension import dispatch
/// (`.jxon` native, `.jxsd`/`.xml`/`.json` routed).
pub fn parse_combined(source: &str, base_dir: &Path) -> Result<Value, ParserError> {
    Parser::new(Dialect::Combined, source, Some(base_dir.to_path_buf())).parse()
}

fn read_source(path: &Path) -> Result<(String, Option<PathBuf>), ParserError> {
    let source = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((source, path.parent().map(Path::to_path_buf)))
}

/// [`parse_value`] over a file. Files live in the extension-routed world, so
/// imports resolve, anchored at the file's directory.
pub fn parse_value_file(path: impl AsRef<Path>) -> Result<Value, ParserError> {
    let (source, base_dir) = read_source(path.as_ref())?;
    Parser::new(Dialect::Combined, &source, base_dir).parse()
}

/// [`parse_module`] over a file.
pub fn parse_module_file(path: impl AsRef<Path>) -> Result<Module, ParserError> {
    let (source, base_dir) = read_source(path.as_ref())?;
    Parser::new(Dialect::Combined, &source, base_dir).parse_as_module()
}

/// [`parse_schema`] over a file.
pub fn parse_schema_file(path: impl AsRef<Path>) -> Result<JxonType, ParserError> {
    let (source, base_dir) = read_source(path.as_ref())?;
    let module = Parser::new(Dialect::Jxsd, &source, base_dir).parse_as_module()?;
    match module.into_default_export() {
        Some(Value::Schema(ty)) => Ok(ty),
        _ => Err(ParserError::MissingSchema),
    }
}

/// [`parse_combined`] over a file.
pub fn parse_combined_file(path: impl AsRef<Path>) -> Result<Value, ParserError> {
    let (source, base_dir) = read_source(path.as_ref())?;
    Parser::new(Dialect::Combined, &source, base_dir).parse()
}
