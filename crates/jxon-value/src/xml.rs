use indexmap::IndexMap;

/// An XML element embedded in a JXON document.
///
/// `text` is the text between the open tag and the first child (or the close
/// tag); `tail` is the text between this element's close tag and the next
/// sibling within its parent. Both are `None` when empty. Attribute order is
/// preserved for emission but ignored by equality.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
    pub tail: Option<String>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            text: None,
            children: Vec::new(),
            tail: None,
        }
    }

    /// True when the element renders as `<tag .../>`.
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty) && self.children.is_empty()
    }
}
