//! The JXSD schema grammar: record types, list-of, `Enum(...)`, and type
//! variables.

use indexmap::IndexMap;

use jxon_value::{EnumMember, JxonType, Value};

use crate::chars::is_label_start;
use crate::error::ParserError;
use crate::parser::{Dialect, Parser};

impl Parser {
    pub(crate) fn grab_jxsd_value(&mut self) -> Result<Value, ParserError> {
        match self.cursor.peek() {
            '{' => self.grab_record(),
            '[' => self.grab_list(),
            _ if self.cursor.peek_keyword("Enum") => self.grab_enum(),
            c if is_label_start(c) => self.resolve_variable(),
            _ => Err(self.cursor.error("Unknown expression type").into()),
        }
    }

    /// `{ "key": Type, ... }` — object syntax whose members are schemas.
    fn grab_record(&mut self) -> Result<Value, ParserError> {
        let members = self.grab_object()?;
        let mut fields = IndexMap::new();
        for (key, value) in members {
            let Value::Schema(ty) = value else {
                return Err(self.cursor.error("Invalid object member type").into());
            };
            fields.insert(key, Some(ty));
        }
        Ok(Value::Schema(JxonType::Record(fields)))
    }

    /// `[ Type ]`, or `[]` for the open list type.
    fn grab_list(&mut self) -> Result<Value, ParserError> {
        self.cursor.expect("[")?;
        self.pass_whitespace()?;
        if self.cursor.peek() == ']' {
            self.cursor.advance();
            return Ok(Value::Schema(JxonType::List(None)));
        }
        let element = self.grab_element()?;
        let Value::Schema(ty) = element else {
            return Err(self.cursor.error("Array subtype must be a JXON type").into());
        };
        self.cursor.expect("]")?;
        Ok(Value::Schema(JxonType::List(Some(Box::new(ty)))))
    }

    /// `Enum( v1, v2, … )`. The member list is parsed with the JXON value
    /// grammar on the shared cursor; members must be scalars of one kind.
    fn grab_enum(&mut self) -> Result<Value, ParserError> {
        self.cursor.expect("Enum")?;
        self.cursor.expect("(")?;

        let saved = self.dialect;
        self.dialect = Dialect::Jxon;
        let elements = self.grab_elements();
        self.dialect = saved;
        let elements = elements?;

        let mut members = Vec::with_capacity(elements.len());
        for element in &elements {
            let Some(member) = EnumMember::from_value(element) else {
                return Err(self
                    .cursor
                    .error("Enum members can only be primitive types")
                    .into());
            };
            members.push(member);
        }
        self.cursor.expect(")")?;

        let ty = JxonType::new_enum(members).map_err(|e| self.cursor.error(e.to_string()))?;
        Ok(Value::Schema(ty))
    }
}
