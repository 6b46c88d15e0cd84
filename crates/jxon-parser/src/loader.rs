//! Depth-first submodule loading with per-extension dialect routing and
//! cycle detection over canonicalized paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use jxon_value::Module;

use crate::error::ParserError;
use crate::parser::Parser;

/// `os.path`-style extension including the leading dot, or empty.
fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

impl Parser {
    /// Reads, parses, and returns the module behind an import path. Paths
    /// starting with `./` resolve against the importing file's directory;
    /// anything else is taken literally.
    pub(crate) fn load_submodule(&mut self, filepath: &str) -> Result<Module, ParserError> {
        let extension = extension_of(filepath);
        let Some(dialect) = self.dialect.subparser(&extension) else {
            return Err(self
                .cursor
                .error(format!("Unknown file extension: {extension}"))
                .into());
        };

        let path = if let Some(rest) = filepath.strip_prefix("./") {
            match &self.base_dir {
                Some(dir) => dir.join(rest),
                None => {
                    return Err(self
                        .cursor
                        .error(format!(
                            "Cannot resolve relative import {filepath} without a base directory"
                        ))
                        .into());
                }
            }
        } else {
            PathBuf::from(filepath)
        };

        let canonical = path.canonicalize().map_err(|source| ParserError::Io {
            path: path.clone(),
            source,
        })?;
        if self.loading.borrow().contains(&canonical) {
            return Err(ParserError::CircularImport(canonical));
        }

        let source = fs::read_to_string(&path).map_err(|source| ParserError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), ?dialect, "loading submodule");

        self.loading.borrow_mut().push(canonical);
        let subparser = Parser::with_loading(
            dialect,
            &source,
            path.parent().map(Path::to_path_buf),
            Rc::clone(&self.loading),
        );
        let submodule = subparser.parse_as_module()?;
        self.loading.borrow_mut().pop();
        Ok(submodule)
    }
}
