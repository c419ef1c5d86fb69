//! Owned XML element tree
//!
//! roxmltree is read-only, so slicing works on this small mutable tree
//! instead. Whitespace text is kept as ordinary text nodes so untouched parts
//! of a document serialize back as they were read.

/// Node inside an element
#[derive(Clone, Debug, PartialEq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// True for an element with the given tag name
    pub fn is_element_named(&self, tag: &str) -> bool {
        matches!(self, XmlNode::Element(e) if e.name == tag)
    }

    /// True for text made only of whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, XmlNode::Text(t) if t.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text child, e.g. `<beats>3</beats>`
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.children.push(XmlNode::Text(text.into()));
        element
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// Child elements with a given tag name
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == tag)
    }

    /// First child element with a given tag name
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == tag)
    }

    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.name == tag)
    }

    pub fn has_child(&self, tag: &str) -> bool {
        self.child(tag).is_some()
    }

    /// Concatenated direct text content, trimmed
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|n| match n {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Text content of the first child with a given tag
    pub fn child_text(&self, tag: &str) -> Option<String> {
        self.child(tag).and_then(Element::text)
    }

    /// Index into `children` of the first element with a given tag name
    pub fn position_of(&self, tag: &str) -> Option<usize> {
        self.children.iter().position(|n| n.is_element_named(tag))
    }

    /// Index into `children` of the `n`th child element with a given tag name
    pub fn position_of_nth(&self, tag: &str, n: usize) -> Option<usize> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_element_named(tag))
            .nth(n)
            .map(|(i, _)| i)
    }

    /// Remove the node at `index` together with the whitespace text right
    /// before it. Returns the removed node.
    pub fn remove_at(&mut self, index: usize) -> XmlNode {
        let node = self.children.remove(index);
        if index > 0 && self.children[index - 1].is_whitespace() {
            self.children.remove(index - 1);
        }
        node
    }

    /// Remove every child element with a given tag name; returns how many went
    pub fn remove_children_named(&mut self, tag: &str) -> usize {
        let mut removed = 0;
        while let Some(index) = self.position_of(tag) {
            self.remove_at(index);
            removed += 1;
        }
        removed
    }

    /// Insert an element as the first child element, indented like the
    /// element that follows it
    pub fn prepend_element(&mut self, element: Element) {
        let first = self.children.iter().position(|n| n.as_element().is_some());
        match first {
            Some(index) => {
                let indent = index
                    .checked_sub(1)
                    .map(|i| self.children[i].clone())
                    .filter(XmlNode::is_whitespace);
                self.children.insert(index, XmlNode::Element(element));
                if let Some(indent) = indent {
                    self.children.insert(index + 1, indent);
                }
            }
            None => self.children.insert(0, XmlNode::Element(element)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure() -> Element {
        let mut m = Element::new("measure").with_attribute("number", "1");
        m.children.push(XmlNode::Text("\n  ".into()));
        m.children.push(XmlNode::Element(Element::with_text("note", "x")));
        m.children.push(XmlNode::Text("\n  ".into()));
        m.children.push(XmlNode::Element(Element::with_text("note", "y")));
        m.children.push(XmlNode::Text("\n".into()));
        m
    }

    #[test]
    fn test_remove_takes_leading_whitespace() {
        let mut m = measure();
        let index = m.position_of_nth("note", 1).unwrap();
        m.remove_at(index);
        assert_eq!(m.children.len(), 3);
        assert_eq!(m.children_named("note").count(), 1);
        assert_eq!(m.child_text("note").as_deref(), Some("x"));
    }

    #[test]
    fn test_prepend_copies_indent() {
        let mut m = measure();
        m.prepend_element(Element::new("attributes"));
        assert!(m.children[1].is_element_named("attributes"));
        assert!(m.children[2].is_whitespace());
        assert!(m.children[3].is_element_named("note"));
    }

    #[test]
    fn test_attribute_lookup() {
        let m = measure();
        assert_eq!(m.attribute("number"), Some("1"));
        assert_eq!(m.attribute("width"), None);
    }
}
