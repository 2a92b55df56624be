//! XML document tree

/// A parsed XML document holding (somewhere) one SVG element.
#[derive(Debug, Clone)]
pub struct Document {
    /// XML declaration (e.g., `<?xml version="1.0" encoding="UTF-8"?>`)
    pub xml_declaration: Option<XmlDeclaration>,
    /// DOCTYPE declaration
    pub doctype: Option<String>,
    /// Comments and processing instructions before the root element
    pub prolog: Vec<Node>,
    /// The document element
    pub root: Element,
    /// Comments and processing instructions after the root element
    pub epilog: Vec<Node>,
}

/// XML declaration attributes.
#[derive(Debug, Clone)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

/// An XML element.
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name with optional prefix (e.g., "svg", "svg:rect")
    pub name: QName,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Child nodes
    pub children: Vec<Node>,
}

/// A qualified name (possibly with namespace prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            local: local.into(),
        }
    }

    /// Parse a qualified name from a string like "prefix:local" or just "local".
    pub fn parse(s: &str) -> Self {
        if let Some((prefix, local)) = s.split_once(':') {
            Self::with_prefix(prefix, local)
        } else {
            Self::new(s)
        }
    }

    /// True for an unprefixed name equal to `name`.
    pub fn is(&self, name: &str) -> bool {
        self.prefix.is_none() && self.local == name
    }

    /// Get the full name as a string.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute on an element.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            value: value.into(),
        }
    }
}

/// A node in the tree.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
    /// A processing instruction (e.g., `<?xml-stylesheet ... ?>`)
    ProcessingInstruction { target: String, content: Option<String> },
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Get the value of an unprefixed attribute.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(name))
            .map(|a| a.value.as_str())
    }

    /// Set an unprefixed attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name.is(&name)) {
            attr.value = value.into();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Remove an unprefixed attribute.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|a| !a.name.is(name));
    }

    /// Check if this element has the given qualified name.
    pub fn is(&self, name: &str) -> bool {
        self.name.full_name() == name
    }

    /// Iterate over child elements only (skip text, comments, etc.).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Iterate over child elements mutably.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// True when some child is text (or CDATA) with non-whitespace content.
    pub fn has_text_content(&self) -> bool {
        self.children.iter().any(|n| match n {
            Node::Text(t) => !t.trim().is_empty(),
            Node::CData(_) => true,
            _ => false,
        })
    }
}

impl Document {
    /// Recursively visit all elements in the document.
    pub fn for_each_element(&self, mut f: impl FnMut(&Element)) {
        fn visit(elem: &Element, f: &mut impl FnMut(&Element)) {
            f(elem);
            for child in elem.child_elements() {
                visit(child, f);
            }
        }
        visit(&self.root, &mut f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_lookup_ignores_prefixed_names() {
        let mut elem = Element::new("rect");
        elem.attributes.push(Attribute {
            name: QName::parse("foo:style"),
            value: "fill:red".into(),
        });
        assert_eq!(elem.get_attr("style"), None);

        elem.set_attr("style", "fill:blue");
        assert_eq!(elem.get_attr("style"), Some("fill:blue"));
        assert_eq!(elem.attributes.len(), 2);

        elem.remove_attr("style");
        assert_eq!(elem.get_attr("style"), None);
        assert_eq!(elem.attributes.len(), 1);
    }

    #[test]
    fn test_set_attr_keeps_position() {
        let mut elem = Element::new("g");
        elem.set_attr("id", "a");
        elem.set_attr("style", "fill:red");
        elem.set_attr("x", "1");
        elem.set_attr("style", "fill:blue");
        let names: Vec<_> = elem.attributes.iter().map(|a| a.name.full_name()).collect();
        assert_eq!(names, ["id", "style", "x"]);
    }

    #[test]
    fn test_qualified_name_match() {
        assert!(Element::new("svg").is("svg"));
        let prefixed = Element {
            name: QName::parse("svg:svg"),
            attributes: Vec::new(),
            children: Vec::new(),
        };
        assert!(!prefixed.is("svg"));
        assert!(prefixed.is("svg:svg"));
    }
}
