//! The XML sub-grammar: elements, attributes with the five predefined
//! entities, text/tail content, and `<!-- -->` comments.

use jxon_value::XmlElement;

use crate::chars::{is_xml_name_char, is_xml_name_start};
use crate::error::ParserError;
use crate::parser::Parser;

/// Right-trims optional text, dropping it entirely when nothing remains.
fn trim_end_opt(text: Option<String>) -> Option<String> {
    let trimmed = text?.trim_end().to_string();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

impl Parser {
    /// `<Name attrs…>…</Name>` or `<Name attrs… />`. With `allow_tail`, text
    /// after the close tag attaches to the element; the top-level entry point
    /// is tail-less.
    pub(crate) fn grab_xml(&mut self, allow_tail: bool) -> Result<XmlElement, ParserError> {
        self.cursor.expect("<")?;
        let tag = self.grab_xml_name()?;
        self.pass_whitespace()?;

        let mut element = XmlElement::new(tag);
        while !matches!(self.cursor.peek(), '/' | '>') {
            let (key, value) = self.grab_xml_attribute()?;
            if element.attrs.contains_key(&key) {
                return Err(self.cursor.error("Repeated attribute name").into());
            }
            element.attrs.insert(key, value);
            self.pass_whitespace()?;
        }

        if self.cursor.peek() == '/' {
            self.cursor.advance();
            self.cursor.expect(">")?;
        } else {
            self.cursor.expect(">")?;
            self.pass_whitespace()?;
            element.text = Some(self.grab_xml_text()?);

            let mut children: Vec<XmlElement> = Vec::new();
            while !self.cursor.peek_is("</") {
                if self.cursor.peek_is("<!") {
                    self.pass_xml_comment()?;
                    continue;
                }
                children.push(self.grab_xml(true)?);
            }
            if let Some(last) = children.last_mut() {
                last.tail = trim_end_opt(last.tail.take());
                element.children = children;
            } else {
                element.text = trim_end_opt(element.text.take());
            }

            self.cursor.expect("</")?;
            let close = self.grab_xml_name()?;
            if close != element.tag {
                return Err(self
                    .cursor
                    .error(format!("Mismatched XML tag, expecting a <{}>", element.tag))
                    .into());
            }
            self.pass_whitespace()?;
            self.cursor.expect(">")?;
        }

        if allow_tail {
            element.tail = Some(self.grab_xml_text()?);
        }
        if element.text.as_deref() == Some("") {
            element.text = None;
        }
        // Whitespace-only tails are layout, not content.
        if element
            .tail
            .as_deref()
            .is_some_and(|tail| tail.trim().is_empty())
        {
            element.tail = None;
        }
        Ok(element)
    }

    /// Names start with a letter, `:`, or `_` and continue with letters,
    /// digits, `:`, `_`, `.`, `-`.
    fn grab_xml_name(&mut self) -> Result<String, ParserError> {
        if !is_xml_name_start(self.cursor.peek()) {
            return Err(self.cursor.error("Invalid start to XML name").into());
        }
        let mut name = String::new();
        while is_xml_name_char(self.cursor.peek()) {
            name.push(self.cursor.peek());
            self.cursor.advance();
        }
        Ok(name)
    }

    /// `Name = "value"`, entity references decoded, literal `<` rejected.
    /// A line break inside the value becomes a single space.
    fn grab_xml_attribute(&mut self) -> Result<(String, String), ParserError> {
        let key = self.grab_xml_name()?;
        self.pass_whitespace()?;
        self.cursor.expect("=")?;
        self.pass_whitespace()?;
        self.cursor.expect("\"")?;

        let mut value = String::new();
        loop {
            if self.cursor.eof() {
                return Err(self.cursor.error("EOF while parsing JXON").into());
            }
            if self.cursor.at_eol() {
                self.cursor.advance();
                value.push(' ');
                continue;
            }
            if self.cursor.peek() == '"' {
                break;
            }
            value.push(self.grab_xml_char()?);
        }
        self.cursor.expect("\"")?;
        Ok((key, value))
    }

    /// One content character, decoding `&…;` references.
    fn grab_xml_char(&mut self) -> Result<char, ParserError> {
        match self.cursor.peek() {
            '<' => Err(self
                .cursor
                .error("'<' cannot occur in XML attribute")
                .into()),
            '&' => self.grab_xml_reference(),
            c => {
                self.cursor.advance();
                Ok(c)
            }
        }
    }

    fn grab_xml_reference(&mut self) -> Result<char, ParserError> {
        self.cursor.expect("&")?;
        if self.cursor.peek() == '#' {
            return Err(self
                .cursor
                .error("Character references are not supported")
                .into());
        }
        let entity = self.grab_xml_name()?;
        let decoded = match entity.as_str() {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "apos" => '\'',
            "quot" => '"',
            _ => return Err(self.cursor.error("Invalid entity").into()),
        };
        self.cursor.expect(";")?;
        Ok(decoded)
    }

    /// Text up to the next `<`. Line breaks become single spaces.
    fn grab_xml_text(&mut self) -> Result<String, ParserError> {
        let mut text = String::new();
        loop {
            if self.cursor.eof() {
                return Err(self.cursor.error("EOF while parsing JXON").into());
            }
            if self.cursor.at_eol() {
                self.pass_whitespace()?;
                text.push(' ');
            } else if self.cursor.peek() == '<' {
                return Ok(text);
            } else {
                text.push(self.grab_xml_char()?);
            }
        }
    }

    fn pass_xml_comment(&mut self) -> Result<(), ParserError> {
        self.cursor.expect("<!--")?;
        self.pass_whitespace()?;
        while !self.cursor.peek_is("-->") {
            if self.cursor.eof() {
                return Err(self.cursor.error("EOF while parsing JXON").into());
            }
            self.cursor.advance();
        }
        self.cursor.advance_by(3);
        self.pass_whitespace()?;
        Ok(())
    }
}
