//! The grammar shared by every dialect: whitespace and comments, strings,
//! labels, numbers' digit runs, and the module layer (imports, variable
//! bindings, default export, exports, dotted resolution).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use indexmap::IndexMap;

use jxon_value::{Module, Object, Value};

use crate::chars::{is_inline_space, is_label_char, is_label_start};
use crate::cursor::Cursor;
use crate::error::ParserError;

/// Selects which leading tokens are accepted as values and how imports are
/// routed across file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// JXON data documents.
    Jxon,
    /// JXSD schema documents.
    Jxsd,
    /// JXON with cross-extension import dispatch (`.jxon` native).
    Combined,
}

impl Dialect {
    /// Type annotations (`label: T = v`) are a JXON feature.
    pub(crate) fn permits_type_annotation(self) -> bool {
        !matches!(self, Dialect::Jxsd)
    }

    pub(crate) fn native_extension(self) -> Option<&'static str> {
        match self {
            Dialect::Jxon => None,
            Dialect::Jxsd => Some(".jxsd"),
            Dialect::Combined => Some(".jxon"),
        }
    }

    /// The dialect handling an imported file, or `None` for an extension this
    /// dialect cannot import.
    pub(crate) fn subparser(self, extension: &str) -> Option<Dialect> {
        if Some(extension) == self.native_extension() {
            return Some(self);
        }
        match self {
            Dialect::Combined => match extension {
                ".jxsd" => Some(Dialect::Jxsd),
                ".xml" | ".json" => Some(Dialect::Jxon),
                _ => None,
            },
            Dialect::Jxon | Dialect::Jxsd => None,
        }
    }
}

/// A single-use parser over one source text.
///
/// Not reentrant; independent instances over disjoint sources may run
/// concurrently. Submodules are loaded depth-first, sharing the in-progress
/// import set for cycle detection.
pub(crate) struct Parser {
    pub(crate) cursor: Cursor,
    pub(crate) dialect: Dialect,
    pub(crate) module: Module,
    pub(crate) base_dir: Option<PathBuf>,
    pub(crate) loading: Rc<RefCell<Vec<PathBuf>>>,
}

impl Parser {
    pub fn new(dialect: Dialect, source: &str, base_dir: Option<PathBuf>) -> Self {
        Self::with_loading(dialect, source, base_dir, Rc::new(RefCell::new(Vec::new())))
    }

    pub fn with_loading(
        dialect: Dialect,
        source: &str,
        base_dir: Option<PathBuf>,
        loading: Rc<RefCell<Vec<PathBuf>>>,
    ) -> Self {
        Self {
            cursor: Cursor::new(source),
            dialect,
            module: Module::new(),
            base_dir,
            loading,
        }
    }

    /// Parses a full module and returns its default export, or `Null` when
    /// the source has none.
    pub fn parse(self) -> Result<Value, ParserError> {
        let module = self.parse_as_module()?;
        Ok(module.into_default_export().unwrap_or(Value::Null))
    }

    /// `module := ws imports bindings (element?) exports?` followed by EOF.
    pub fn parse_as_module(mut self) -> Result<Module, ParserError> {
        self.pass_whitespace()?;
        self.read_imports()?;
        self.read_variables()?;
        if !self.cursor.eof() && !self.cursor.peek_keyword("export") {
            let value = self.grab_element()?;
            self.module.set_default_export(value);
        }
        if !self.cursor.eof() {
            self.read_exports()?;
        }
        if !self.cursor.eof() {
            return Err(self.cursor.error("Unexpected trailing content").into());
        }
        Ok(self.module)
    }

    // ---- whitespace and comments -------------------------------------

    /// Skips spaces, tabs, carriage returns, line ends, and `//`/`/* */`
    /// comments. Comments count as whitespace in every dialect.
    pub(crate) fn pass_whitespace(&mut self) -> Result<(), ParserError> {
        loop {
            if self.cursor.peek_is("//") {
                self.pass_line_comment()?;
            } else if self.cursor.peek_is("/*") {
                self.pass_block_comment()?;
            } else if self.cursor.eof() {
                return Ok(());
            } else if self.cursor.at_eol() || is_inline_space(self.cursor.peek()) {
                self.cursor.advance();
            } else {
                return Ok(());
            }
        }
    }

    /// Requires at least a line end or one inline space, then trims.
    pub(crate) fn expect_whitespace(&mut self) -> Result<(), ParserError> {
        if !self.cursor.at_eol() && !is_inline_space(self.cursor.peek()) {
            return Err(self.cursor.error("Expected whitespace").into());
        }
        self.pass_whitespace()
    }

    fn pass_line_comment(&mut self) -> Result<(), ParserError> {
        self.cursor.expect("//")?;
        while !self.cursor.at_eol() {
            self.cursor.advance();
        }
        Ok(())
    }

    fn pass_block_comment(&mut self) -> Result<(), ParserError> {
        self.cursor.expect("/*")?;
        while !self.cursor.peek_is("*/") {
            if self.cursor.eof() {
                return Err(self.cursor.error("EOF while parsing JXON").into());
            }
            self.cursor.advance();
        }
        self.cursor.advance_by(2);
        Ok(())
    }

    // ---- imports -----------------------------------------------------

    /// `import <clause> from "<path>";` repeated. Clauses bind the
    /// submodule's default export, the whole submodule (`* as Name`), or a
    /// selection of its named exports (`{ a, b }`), in any combination.
    fn read_imports(&mut self) -> Result<(), ParserError> {
        while self.cursor.peek_keyword("import") {
            self.cursor.advance_by(6);
            self.cursor.expect(" ")?;
            self.pass_whitespace()?;

            let mut default_label: Option<String> = None;
            let mut module_label: Option<String> = None;
            let mut named: Option<Vec<String>> = None;

            if is_label_start(self.cursor.peek()) {
                default_label = Some(self.grab_label());
                self.pass_whitespace()?;
            }

            if default_label.is_none() || self.cursor.peek() == ',' {
                if self.cursor.peek() == ',' {
                    self.cursor.advance();
                    self.pass_whitespace()?;
                }
                if self.cursor.peek() == '*' {
                    self.cursor.advance();
                    self.expect_whitespace()?;
                    self.cursor.expect("as")?;
                    self.expect_whitespace()?;
                    let label = self.grab_label();
                    if label.is_empty() {
                        return Err(self
                            .cursor
                            .error("Must specify a name to give module")
                            .into());
                    }
                    module_label = Some(label);
                } else {
                    self.cursor.expect("{")?;
                    self.pass_whitespace()?;
                    named = Some(self.grab_labels()?);
                    self.pass_whitespace()?;
                    self.cursor.expect("}")?;
                }
                self.pass_whitespace()?;
            }

            self.cursor.expect("from")?;
            self.expect_whitespace()?;

            let filepath = self.grab_string(false)?;
            let submodule = self.load_submodule(&filepath)?;

            if let Some(label) = default_label {
                let Some(value) = submodule.default_export() else {
                    return Err(self
                        .cursor
                        .error(format!("Module {filepath} has no default export"))
                        .into());
                };
                let value = value.clone();
                self.set_binding(label, value)?;
            }
            if let Some(label) = module_label {
                self.set_binding(label, Value::Module(submodule.clone()))?;
            }
            if let Some(names) = named {
                for name in names {
                    let Some(value) = submodule.get(&name) else {
                        return Err(self
                            .cursor
                            .error(format!("Module {filepath} has no export called {name}"))
                            .into());
                    };
                    let value = value.clone();
                    self.set_binding(name, value)?;
                }
            }

            self.cursor.expect(";")?;
            self.expect_whitespace()?;
        }
        Ok(())
    }

    /// Binds a name in the current module, positioning rebind errors at the
    /// cursor.
    fn set_binding(&mut self, name: String, value: Value) -> Result<(), ParserError> {
        self.module
            .set(name, value)
            .map_err(|e| self.cursor.error(e.to_string()).into())
    }

    // ---- variable bindings -------------------------------------------

    /// `label (":" type)? "=" element` repeated. Ends at `export`, at the
    /// first character that cannot start a label, or at a label that is not
    /// followed by `:` or `=` (that label starts the default-export
    /// expression instead, so the cursor backtracks to it).
    fn read_variables(&mut self) -> Result<(), ParserError> {
        while !self.cursor.eof() && is_label_start(self.cursor.peek()) {
            let start = self.cursor.breakpoint();
            let label = self.grab_label();
            if label == "export" {
                self.cursor.jump(start);
                return Ok(());
            }
            self.pass_whitespace()?;
            if !matches!(self.cursor.peek(), ':' | '=') {
                self.cursor.jump(start);
                return Ok(());
            }

            let annotation = if self.cursor.peek() == ':' {
                let colon = self.cursor.breakpoint();
                if !self.dialect.permits_type_annotation() {
                    return Err(self
                        .cursor
                        .error("Cannot provide type annotations in JXSD")
                        .into());
                }
                self.cursor.advance();
                self.pass_whitespace()?;
                let annotated = self.resolve_variable()?;
                self.pass_whitespace()?;
                let Value::Schema(ty) = annotated else {
                    return Err(self
                        .cursor
                        .error_at(colon, "Type annotation must name a type")
                        .into());
                };
                Some((ty, colon))
            } else {
                None
            };

            self.cursor.expect("=")?;
            let value = self.grab_element()?;
            if let Some((ty, colon)) = annotation
                && !jxon_schema::validate(&ty, &value)
            {
                return Err(self
                    .cursor
                    .error_at(colon, "Type does not match annotation")
                    .into());
            }
            self.set_binding(label, value)?;
        }
        Ok(())
    }

    // ---- exports -----------------------------------------------------

    /// `export default <var>;`, `export Name;`, `export { a, b };` repeated.
    /// Explicit exports replace the module's visible bindings.
    fn read_exports(&mut self) -> Result<(), ParserError> {
        let mut exports: IndexMap<String, Value> = IndexMap::new();
        let mut default_export: Option<Value> = None;

        while self.cursor.peek_keyword("export") {
            self.cursor.advance_by(6);
            self.expect_whitespace()?;

            if self.cursor.peek_keyword("default") {
                self.cursor.advance_by(7);
                self.expect_whitespace()?;
                default_export = Some(self.grab_element()?);
            } else if is_label_start(self.cursor.peek()) {
                let label = self.grab_label();
                let value = self
                    .module
                    .resolve_chain(std::slice::from_ref(&label))?
                    .clone();
                exports.insert(label, value);
            } else {
                self.cursor.expect("{")?;
                self.pass_whitespace()?;
                for label in self.grab_labels()? {
                    let value = self
                        .module
                        .resolve_chain(std::slice::from_ref(&label))?
                        .clone();
                    exports.insert(label, value);
                }
                self.cursor.expect("}")?;
            }

            self.pass_whitespace()?;
            self.cursor.expect(";")?;
            self.pass_whitespace()?;
        }

        if let Some(value) = default_export {
            self.module.set_default_export(value);
        }
        if !exports.is_empty() {
            self.module.replace_exports(exports);
        }
        Ok(())
    }

    // ---- variable resolution -----------------------------------------

    /// A dotted chain `a.b.c`, or the inline import `import("<path>")`.
    pub(crate) fn resolve_variable(&mut self) -> Result<Value, ParserError> {
        let label = self.grab_label();
        if label == "import" {
            return self.grab_inline_import();
        }
        let mut chain = vec![label];
        while self.cursor.peek() == '.' {
            self.cursor.advance();
            chain.push(self.grab_label());
        }
        Ok(self.module.resolve_chain(&chain)?.clone())
    }

    fn grab_inline_import(&mut self) -> Result<Value, ParserError> {
        self.cursor.expect("(")?;
        let filepath = self.grab_string(false)?;
        self.cursor.expect(")")?;
        let submodule = self.load_submodule(&filepath)?;
        match submodule.into_default_export() {
            Some(value) => Ok(value),
            None => Err(self
                .cursor
                .error(format!("Module {filepath} has no default export"))
                .into()),
        }
    }

    // ---- elements and containers -------------------------------------

    /// `element := ws value ws`
    pub(crate) fn grab_element(&mut self) -> Result<Value, ParserError> {
        self.pass_whitespace()?;
        let value = self.grab_value()?;
        self.pass_whitespace()?;
        Ok(value)
    }

    /// A comma-separated element list, at least one element long.
    pub(crate) fn grab_elements(&mut self) -> Result<Vec<Value>, ParserError> {
        let mut elements = vec![self.grab_element()?];
        while self.cursor.peek() == ',' {
            self.cursor.advance();
            elements.push(self.grab_element()?);
        }
        Ok(elements)
    }

    fn grab_value(&mut self) -> Result<Value, ParserError> {
        match self.dialect {
            Dialect::Jxon | Dialect::Combined => self.grab_jxon_value(),
            Dialect::Jxsd => self.grab_jxsd_value(),
        }
    }

    /// `{ "key": element, ... }` with unique keys and no trailing comma.
    pub(crate) fn grab_object(&mut self) -> Result<Object, ParserError> {
        self.cursor.expect("{")?;
        self.pass_whitespace()?;

        let mut members = Object::new();
        if self.cursor.peek() == '}' {
            self.cursor.advance();
            return Ok(members);
        }
        loop {
            self.pass_whitespace()?;
            let key = self.grab_string(false)?;
            self.pass_whitespace()?;
            self.cursor.expect(":")?;
            let value = self.grab_element()?;
            if members.contains_key(&key) {
                return Err(self.cursor.error(format!("Repeat key: '{key}'")).into());
            }
            members.insert(key, value);
            if self.cursor.peek() == ',' {
                self.cursor.advance();
            } else {
                break;
            }
        }
        self.cursor.expect("}")?;
        Ok(members)
    }

    // ---- strings -----------------------------------------------------

    /// A quoted string. In value position (`allow_line_breaks`) a line break
    /// folds to a single space unless the collected text already ends in
    /// whitespace; in key, attribute, and path position line breaks are
    /// forbidden.
    pub(crate) fn grab_string(&mut self, allow_line_breaks: bool) -> Result<String, ParserError> {
        self.cursor.expect("\"")?;
        let s = self.grab_characters(allow_line_breaks)?;
        self.cursor.expect("\"")?;
        Ok(s)
    }

    fn grab_characters(&mut self, allow_line_breaks: bool) -> Result<String, ParserError> {
        let mut s = String::new();
        loop {
            if self.cursor.eof() {
                return Err(self.cursor.error("EOF while parsing JXON").into());
            }
            if self.cursor.at_eol() {
                if !allow_line_breaks {
                    return Err(self.cursor.error("Line break not allowed here").into());
                }
                self.pass_whitespace()?;
                if !s.is_empty() && !s.ends_with([' ', '\t', '\r']) {
                    s.push(' ');
                }
                continue;
            }
            match self.cursor.peek() {
                '"' => return Ok(s),
                '\\' => {
                    self.cursor.advance();
                    s.push(self.grab_escape()?);
                }
                c => {
                    s.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    fn grab_escape(&mut self) -> Result<char, ParserError> {
        let decoded = match self.cursor.peek() {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                return Err(self.cursor.error("\\u escapes are not supported").into());
            }
            _ => return Err(self.cursor.error("Invalid escape sequence").into()),
        };
        self.cursor.advance();
        Ok(decoded)
    }

    // ---- labels ------------------------------------------------------

    /// `[A-Za-z0-9_]*`; callers guard the leading character.
    pub(crate) fn grab_label(&mut self) -> String {
        let mut s = String::new();
        while is_label_char(self.cursor.peek()) {
            s.push(self.cursor.peek());
            self.cursor.advance();
        }
        s
    }

    /// A comma-separated, non-empty label list.
    fn grab_labels(&mut self) -> Result<Vec<String>, ParserError> {
        let mut labels = Vec::new();
        loop {
            let label = self.grab_label();
            if label.is_empty() {
                return Err(self.cursor.error("Expected label").into());
            }
            labels.push(label);
            self.pass_whitespace()?;
            if self.cursor.peek() == ',' {
                self.cursor.advance();
                self.pass_whitespace()?;
            } else {
                break;
            }
        }
        Ok(labels)
    }
}
