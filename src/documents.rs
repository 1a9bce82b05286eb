//! XML document handling
//!
//! A small in-memory element tree built from `quick-xml` events. This is the
//! XML collaborator for the parse pipeline: it answers child and descendant
//! queries and exposes the namespace declarations needed for prefix
//! resolution, nothing more.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// XML element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Namespace prefix as written, empty for unprefixed elements
    pub prefix: String,
    /// Local element name
    pub name: String,
    /// Attributes, keyed by attribute name as written
    pub attributes: HashMap<String, String>,
    /// Namespace declarations on this element as `(prefix, uri)` pairs,
    /// with an empty prefix for the default namespace
    pub namespace_decls: Vec<(String, String)>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements, in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            attributes: HashMap::new(),
            namespace_decls: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Check whether this element carries the given prefix and local name
    pub fn is_named(&self, prefix: &str, name: &str) -> bool {
        self.prefix == prefix && self.name == name
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Child elements matching the given prefix and local name, in document
    /// order
    pub fn children_named(&self, prefix: &str, name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|child| child.is_named(prefix, name))
            .collect()
    }

    /// First child element matching the given prefix and local name
    pub fn first_child(&self, prefix: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.is_named(prefix, name))
    }

    /// All descendant elements in document order
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            out.push(child);
            child.collect_descendants(out);
        }
    }
}

/// XML document representation
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e)?;
                    stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(current);
                        } else {
                            // This is the root element
                            root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    } else {
                        // Empty root element
                        root = Some(element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::Xml(format!("failed to unescape text: {}", err)))?;
                        if !text.trim().is_empty() {
                            current.text = Some(text.trim().to_string());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Ignore other events (comments, processing instructions, etc.)
            }
            buf.clear();
        }

        match root {
            Some(root) => Ok(Self { root }),
            None => Err(Error::Xml("document has no root element".to_string())),
        }
    }

    /// Parse element from a BytesStart event
    fn parse_element(start: &BytesStart) -> Result<Element> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("invalid element name: {}", e)))?;

        let (prefix, local) = split_name(name);
        let mut element = Element::new(prefix, local);

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("failed to parse attribute: {}", e)))?;

            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("invalid attribute name: {}", e)))?;

            let value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("failed to unescape attribute value: {}", e)))?
                .to_string();

            // Namespace declarations are kept apart from regular attributes
            if key == "xmlns" {
                element.namespace_decls.push((String::new(), value));
            } else if let Some(declared) = key.strip_prefix("xmlns:") {
                element.namespace_decls.push((declared.to_string(), value));
            } else {
                element.attributes.insert(key.to_string(), value);
            }
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Namespace declarations in scope at the document element
    pub fn root_namespace_declarations(&self) -> &[(String, String)] {
        &self.root.namespace_decls
    }

    /// Find the prefix bound to a namespace URI, searching declarations in
    /// document order. The first binding wins when several prefixes share a
    /// URI, which keeps resolution deterministic.
    pub fn declared_prefix_for(&self, uri: &str) -> Option<&str> {
        std::iter::once(&self.root)
            .chain(self.root.descendants())
            .find_map(|element| {
                element
                    .namespace_decls
                    .iter()
                    .find(|(_, declared)| declared.as_str() == uri)
                    .map(|(prefix, _)| prefix.as_str())
            })
    }
}

/// Split a prefixed XML name into `(prefix, local)`, with an empty prefix
/// for unprefixed names
fn split_name(name: &str) -> (&str, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", name),
    }
}
