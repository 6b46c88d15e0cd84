use std::path::PathBuf;

use thiserror::Error;

use jxon_value::module::ResolveError;

/// A positioned syntax diagnostic.
///
/// Renders as
///
/// ```text
/// (line 2, col 7) Expected ':'
/// {"a" 1}
///       ^
/// ```
///
/// with 1-based coordinates and a caret under the offending column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub col: usize,
    pub message: String,
    pub source_line: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "(line {}, col {}) {}", self.line, self.col, self.message)?;
        writeln!(f, "{}", self.source_line)?;
        write!(f, "{}^", " ".repeat(self.col.saturating_sub(1)))
    }
}

impl std::error::Error for ParseError {}

/// Any failure while parsing JXON, JXSD, or a module graph.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Syntax violation, with position and caret.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Unbound name or dotted traversal through a non-module.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A submodule source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The import graph revisited a module that is still being loaded.
    #[error("Circular import: {}", .0.display())]
    CircularImport(PathBuf),

    /// A JXSD source whose default export is not a schema.
    #[error("Source did not produce a schema")]
    MissingSchema,
}
