//! Character classes for labels and XML names.

/// `[A-Za-z_]`, the start of a label.
pub(crate) fn is_label_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// `[A-Za-z0-9_]`, the continuation of a label.
pub(crate) fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn is_xml_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ':' | '_')
}

pub(crate) fn is_xml_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '.' | '-')
}

/// Whitespace within a line; line ends are handled by the cursor.
pub(crate) fn is_inline_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}
