//! The JXON value grammar: scalars, arrays, objects, XML subtrees, literals,
//! and variable references.

use num_bigint::BigInt;

use jxon_value::value::{Array, Value};

use crate::chars::is_label_start;
use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// Dispatches on the first non-whitespace character.
    pub(crate) fn grab_jxon_value(&mut self) -> Result<Value, ParserError> {
        match self.cursor.peek() {
            '{' => Ok(Value::Object(self.grab_object()?)),
            '[' => self.grab_array(),
            '"' => Ok(Value::String(self.grab_string(true)?)),
            '<' => Ok(Value::Xml(self.grab_xml(false)?)),
            c if c == '-' || c.is_ascii_digit() => self.grab_number(),
            _ => {
                if self.cursor.peek_keyword("true") {
                    self.cursor.advance_by(4);
                    Ok(Value::Bool(true))
                } else if self.cursor.peek_keyword("false") {
                    self.cursor.advance_by(5);
                    Ok(Value::Bool(false))
                } else if self.cursor.peek_keyword("null") {
                    self.cursor.advance_by(4);
                    Ok(Value::Null)
                } else if is_label_start(self.cursor.peek()) {
                    self.resolve_variable()
                } else {
                    Err(self.cursor.error("Unknown expression type").into())
                }
            }
        }
    }

    /// `[ element (',' element)* ]`, no trailing comma.
    fn grab_array(&mut self) -> Result<Value, ParserError> {
        self.cursor.expect("[")?;
        self.pass_whitespace()?;
        if self.cursor.peek() == ']' {
            self.cursor.advance();
            return Ok(Value::Array(Array(Vec::new())));
        }
        let elements = self.grab_elements()?;
        self.cursor.expect("]")?;
        Ok(Value::Array(Array(elements)))
    }

    /// A `.` or exponent makes the number a float; otherwise it is an exact
    /// integer. The exponent sign is mandatory. A bare leading zero ends the
    /// integer part (`0123` truncates to `0`).
    fn grab_number(&mut self) -> Result<Value, ParserError> {
        let mut text = String::new();
        if self.cursor.peek() == '-' {
            text.push('-');
            self.cursor.advance();
        }
        text.push_str(&self.grab_digits(false)?);

        let mut is_float = false;
        if self.cursor.peek() == '.' {
            is_float = true;
            text.push('.');
            self.cursor.advance();
            text.push_str(&self.grab_digits(true)?);
        }
        if matches!(self.cursor.peek(), 'e' | 'E') {
            is_float = true;
            text.push('e');
            self.cursor.advance();
            match self.cursor.peek() {
                c @ ('+' | '-') => {
                    text.push(c);
                    self.cursor.advance();
                }
                _ => {
                    return Err(self
                        .cursor
                        .error("Exponent must be followed by sign")
                        .into());
                }
            }
            text.push_str(&self.grab_digits(true)?);
        }

        if is_float {
            let f: f64 = text
                .parse()
                .map_err(|_| self.cursor.error(format!("Invalid number: {text}")))?;
            Ok(Value::Float(f))
        } else {
            let i: BigInt = text
                .parse()
                .map_err(|_| self.cursor.error(format!("Invalid number: {text}")))?;
            Ok(Value::Integer(i))
        }
    }

    fn grab_digits(&mut self, allow_leading_zero: bool) -> Result<String, ParserError> {
        if !allow_leading_zero && self.cursor.peek() == '0' {
            self.cursor.advance();
            return Ok("0".to_string());
        }
        let mut s = String::new();
        while self.cursor.peek().is_ascii_digit() {
            s.push(self.cursor.peek());
            self.cursor.advance();
        }
        if s.is_empty() {
            return Err(self.cursor.error("Expected digit").into());
        }
        Ok(s)
    }
}
