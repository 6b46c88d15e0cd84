use indexmap::IndexMap;
use thiserror::Error;

use crate::schema::{JxonType, SimpleKind};
use crate::value::Value;

/// A parsed module: an optional default export plus named exports.
///
/// Fresh modules are seeded with the five simple-type keyword bindings, so
/// `Integer`, `Float`, `String`, `Boolean`, and `XML` resolve everywhere.
/// When a module carries no explicit `export` statements, all of its
/// bindings (including those seeds) remain visible to importers.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    default_export: Option<Box<Value>>,
    exports: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Variable name already set: '{0}'")]
pub struct AlreadySetError(pub String);

/// Failure of a dotted `a.b.c` lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Name not found: {0}")]
    NotFound(String),
    #[error("Not a module: {0}")]
    NotAModule(String),
}

impl Module {
    pub fn new() -> Self {
        let mut exports = IndexMap::new();
        for kind in SimpleKind::ALL {
            exports.insert(
                kind.keyword().to_string(),
                Value::Schema(JxonType::Simple(kind)),
            );
        }
        Self {
            default_export: None,
            exports,
        }
    }

    /// Binds `name`, rejecting rebinds of any existing name (reserved
    /// keywords included).
    pub fn set(&mut self, name: String, value: Value) -> Result<(), AlreadySetError> {
        match self.exports.entry(name) {
            indexmap::map::Entry::Occupied(e) => Err(AlreadySetError(e.key().clone())),
            indexmap::map::Entry::Vacant(e) => {
                e.insert(value);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.exports.get(name)
    }

    pub fn default_export(&self) -> Option<&Value> {
        self.default_export.as_deref()
    }

    pub fn into_default_export(self) -> Option<Value> {
        self.default_export.map(|v| *v)
    }

    pub fn set_default_export(&mut self, value: Value) {
        self.default_export = Some(Box::new(value));
    }

    pub fn exports(&self) -> &IndexMap<String, Value> {
        &self.exports
    }

    /// Replaces the visible exports with an explicit export list.
    pub fn replace_exports(&mut self, exports: IndexMap<String, Value>) {
        self.exports = exports;
    }

    /// Resolves a dotted chain `a.b.c` against this module's bindings.
    /// Every segment but the last must name a nested module.
    pub fn resolve_chain(&self, chain: &[String]) -> Result<&Value, ResolveError> {
        let mut module = self;
        for (i, label) in chain.iter().enumerate() {
            let value = module
                .exports
                .get(label)
                .ok_or_else(|| ResolveError::NotFound(label.clone()))?;
            if i + 1 == chain.len() {
                return Ok(value);
            }
            match value {
                Value::Module(sub) => module = sub,
                _ => return Err(ResolveError::NotAModule(label.clone())),
            }
        }
        Err(ResolveError::NotFound(String::new()))
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_module_is_seeded_with_simple_types() {
        let module = Module::new();
        assert_eq!(module.exports().len(), 5);
        assert_eq!(
            module.get("XML"),
            Some(&Value::Schema(JxonType::Simple(SimpleKind::Xml)))
        );
    }

    #[test]
    fn rebinding_a_seed_is_rejected() {
        let mut module = Module::new();
        let err = module.set("Integer".to_string(), Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "Variable name already set: 'Integer'");
    }

    #[test]
    fn dotted_resolution_walks_nested_modules() {
        let mut inner = Module::new();
        inner.set("answer".to_string(), Value::from(42)).unwrap();
        let mut outer = Module::new();
        outer
            .set("sub".to_string(), Value::Module(inner))
            .unwrap();

        let chain = ["sub".to_string(), "answer".to_string()];
        assert_eq!(outer.resolve_chain(&chain), Ok(&Value::from(42)));

        let missing = ["sub".to_string(), "missing".to_string()];
        assert_eq!(
            outer.resolve_chain(&missing),
            Err(ResolveError::NotFound("missing".to_string()))
        );

        let not_module = ["sub".to_string(), "answer".to_string(), "x".to_string()];
        assert_eq!(
            outer.resolve_chain(&not_module),
            Err(ResolveError::NotAModule("answer".to_string()))
        );
    }
}
