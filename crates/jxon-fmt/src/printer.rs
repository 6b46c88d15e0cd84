//! The emitting walk. One printer handles both surfaces: JXON values and
//! JXSD schema descriptors.

use std::cmp::Ordering;
use std::fmt::Write as _;

use jxon_value::value::{Array, Value};
use jxon_value::{EnumMember, JxonType, Object, XmlElement};

use crate::config::Config;
use crate::error::EncodeError;

pub(crate) struct Printer<'a> {
    out: String,
    config: &'a Config,
}

impl<'a> Printer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            out: String::new(),
            config,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn pretty(&self) -> bool {
        self.config.indent.is_some()
    }

    fn newline(&mut self) {
        if self.pretty() {
            self.out.push('\n');
        }
    }

    fn indent(&mut self, level: usize) {
        if let Some(width) = self.config.indent {
            for _ in 0..level * width {
                self.out.push(' ');
            }
        }
    }

    /// `,` + newline when pretty, `,` + space when compact.
    fn separator(&mut self) {
        self.out.push(',');
        if self.pretty() {
            self.out.push('\n');
        } else {
            self.out.push(' ');
        }
    }

    fn trim_trailing_whitespace(&mut self) {
        while self.out.ends_with([' ', '\t', '\r', '\n']) {
            self.out.pop();
        }
    }

    // ---- values ------------------------------------------------------

    pub fn write_value(&mut self, value: &Value, level: usize) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Integer(i) => {
                let _ = write!(self.out, "{i}");
            }
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(EncodeError::NonFiniteFloat(*f));
                }
                let text = format!("{f}");
                self.out.push_str(&text);
                // Keep floats re-parseable as floats.
                if !text.contains('.') {
                    self.out.push_str(".0");
                }
            }
            Value::String(s) => self.write_string(s),
            Value::Array(Array(items)) => self.write_array(items, level)?,
            Value::Object(map) => self.write_object(map, level)?,
            Value::Xml(element) => self.write_xml(element, level)?,
            Value::Schema(_) | Value::Module(_) => {
                return Err(EncodeError::Unencodable(value.kind()));
            }
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        push_escaped(&mut self.out, s);
        self.out.push('"');
    }

    fn write_array(&mut self, items: &[Value], level: usize) -> Result<(), EncodeError> {
        if items.is_empty() {
            self.out.push_str("[]");
            return Ok(());
        }
        self.out.push('[');
        self.newline();
        let last = items.len() - 1;
        for (i, item) in items.iter().enumerate() {
            self.indent(level + 1);
            self.write_value(item, level + 1)?;
            if i != last {
                self.separator();
            }
        }
        self.newline();
        self.indent(level);
        self.out.push(']');
        Ok(())
    }

    fn write_object(&mut self, map: &Object, level: usize) -> Result<(), EncodeError> {
        if map.is_empty() {
            self.out.push_str("{}");
            return Ok(());
        }
        self.out.push('{');
        self.newline();
        let mut members: Vec<(&String, &Value)> = map.iter().collect();
        if self.config.sort_keys {
            members.sort_by_key(|(key, _)| *key);
        }
        let last = members.len() - 1;
        for (i, (key, value)) in members.into_iter().enumerate() {
            self.indent(level + 1);
            self.write_string(key);
            self.out.push_str(": ");
            self.write_value(value, level + 1)?;
            if i != last {
                self.separator();
            }
        }
        self.newline();
        self.indent(level);
        self.out.push('}');
        Ok(())
    }

    fn write_xml(&mut self, element: &XmlElement, level: usize) -> Result<(), EncodeError> {
        self.out.push('<');
        self.out.push_str(&element.tag);
        for (key, value) in &element.attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            push_attr_escaped(&mut self.out, value);
            self.out.push('"');
        }

        let text = element.text.as_deref().unwrap_or("");
        if element.is_empty() {
            self.out.push_str("/>");
        } else {
            self.out.push('>');
            if !text.is_empty() {
                self.newline();
                self.indent(level + 1);
                push_text_escaped(&mut self.out, text);
            }
            if !element.children.is_empty() {
                if self.pretty() && (text.is_empty() || text.ends_with([' ', '\t', '\r', '\n'])) {
                    self.trim_trailing_whitespace();
                    self.newline();
                    self.indent(level + 1);
                }
                for (i, child) in element.children.iter().enumerate() {
                    // A line break after a tail would fold back into it on
                    // reparse; glue the next sibling instead.
                    let follows_tail = i != 0
                        && !element.children[i - 1]
                            .tail
                            .as_deref()
                            .unwrap_or("")
                            .is_empty();
                    if i != 0 && !follows_tail {
                        self.newline();
                        self.indent(level + 1);
                    }
                    self.write_xml(child, level + 1)?;
                }
            }
            self.newline();
            self.indent(level);
            self.out.push_str("</");
            self.out.push_str(&element.tag);
            self.out.push('>');
        }

        if let Some(tail) = element.tail.as_deref().filter(|t| !t.is_empty()) {
            if self.pretty() && tail.starts_with([' ', '\t', '\r', '\n']) {
                self.newline();
                self.indent(level);
                push_text_escaped(&mut self.out, tail.trim_start());
            } else {
                push_text_escaped(&mut self.out, tail);
            }
            if self.pretty() {
                self.trim_trailing_whitespace();
            }
        }
        Ok(())
    }

    // ---- schemas -----------------------------------------------------

    pub fn write_schema(&mut self, schema: &JxonType, level: usize) -> Result<(), EncodeError> {
        match schema {
            JxonType::Simple(kind) => self.out.push_str(kind.keyword()),
            JxonType::List(None) => self.out.push_str("[]"),
            JxonType::List(Some(element)) => {
                self.out.push('[');
                self.write_schema(element, level)?;
                self.out.push(']');
            }
            JxonType::Record(fields) => {
                if fields.is_empty() {
                    self.out.push_str("{}");
                    return Ok(());
                }
                self.out.push('{');
                self.newline();
                let mut members: Vec<(&String, &Option<JxonType>)> = fields.iter().collect();
                if self.config.sort_keys {
                    members.sort_by_key(|(key, _)| *key);
                }
                let last = members.len() - 1;
                for (i, (key, field)) in members.into_iter().enumerate() {
                    let Some(field) = field else {
                        return Err(EncodeError::UndeterminedSchema);
                    };
                    self.indent(level + 1);
                    self.write_string(key);
                    self.out.push_str(": ");
                    self.write_schema(field, level + 1)?;
                    if i != last {
                        self.separator();
                    }
                }
                self.newline();
                self.indent(level);
                self.out.push('}');
            }
            JxonType::Enum(members) => {
                let mut members: Vec<&EnumMember> = members.iter().collect();
                if self.config.sort_keys {
                    members.sort_by(|a, b| compare_members(a, b));
                }
                self.out.push_str("Enum(");
                self.newline();
                let last = members.len().saturating_sub(1);
                for (i, member) in members.into_iter().enumerate() {
                    self.indent(level + 1);
                    self.write_value(&member.to_value(), level + 1)?;
                    if i != last {
                        self.separator();
                    }
                }
                self.newline();
                self.indent(level);
                self.out.push(')');
            }
        }
        Ok(())
    }
}

/// Members of one enum share a kind; cross-kind comparison never happens.
fn compare_members(a: &EnumMember, b: &EnumMember) -> Ordering {
    match (a, b) {
        (EnumMember::Integer(x), EnumMember::Integer(y)) => x.cmp(y),
        (EnumMember::Float(x), EnumMember::Float(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (EnumMember::String(x), EnumMember::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// JSON-style string escaping; `/` is left alone.
fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}

/// XML text content escaping through the predefined entities.
fn push_text_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn push_attr_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
