//! Minimal XML element model for generated IDE metadata.
//!
//! Only what the generators need: elements with ordered attributes, child
//! elements and text. Serialization indents by two spaces and keeps
//! text-only elements on one line. Parsing goes through `quick-xml`;
//! comments, processing instructions and whitespace between elements are
//! dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::DomainError;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// A node inside an [`XmlElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    declaration: bool,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            declaration: false,
        }
    }

    /// Parse a whole document. `document` names it in errors.
    pub fn parse(document: &str, source: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidDocument {
            document: document.to_string(),
            reason,
        };

        let mut reader = Reader::from_str(source);
        let mut declaration = false;
        let mut open: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event().map_err(|e| invalid(e.to_string()))? {
                Event::Decl(_) => declaration = true,
                Event::Start(start) => open.push(element_from(&start).map_err(&invalid)?),
                Event::Empty(start) => {
                    let element = element_from(&start).map_err(&invalid)?;
                    attach(&mut open, &mut root, element).map_err(&invalid)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| invalid("closing tag without an open element".into()))?;
                    attach(&mut open, &mut root, element).map_err(&invalid)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| invalid(e.to_string()))?;
                    push_text(&mut open, text.into_owned()).map_err(&invalid)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    push_text(&mut open, text).map_err(&invalid)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(invalid(format!("element <{}> is never closed", unclosed.name)));
        }
        let mut root = root.ok_or_else(|| invalid("no root element".into()))?;
        root.declaration = declaration;
        Ok(root)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute in place, or append it if absent.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Child elements in document order, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Serialize with two-space indentation and a trailing newline.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        if self.declaration {
            out.push_str(DECLARATION);
        }
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value, true));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }

        let text_only = self
            .children
            .iter()
            .all(|node| matches!(node, XmlNode::Text(_)));

        if text_only {
            out.push('>');
            for node in &self.children {
                if let XmlNode::Text(text) = node {
                    out.push_str(&escape(text, false));
                }
            }
        } else {
            out.push_str(">\n");
            for node in &self.children {
                match node {
                    XmlNode::Element(child) => child.write_into(out, depth + 1),
                    XmlNode::Text(text) => {
                        out.push_str(&"  ".repeat(depth + 1));
                        out.push_str(&escape(text, false));
                        out.push('\n');
                    }
                }
            }
            out.push_str(&indent);
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, String> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| e.to_string())?
        .to_string();
    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = std::str::from_utf8(attribute.key.as_ref()).map_err(|e| e.to_string())?;
        let value = attribute.unescape_value().map_err(|e| e.to_string())?;
        element.attributes.push((key.to_string(), value.into_owned()));
    }
    Ok(element)
}

fn attach(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), String> {
    match open.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(format!("second root element <{}>", element.name)),
    }
    Ok(())
}

fn push_text(open: &mut [XmlElement], text: String) -> Result<(), String> {
    if text.trim().is_empty() {
        return Ok(());
    }
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Text(text));
            Ok(())
        }
        None => Err("text outside the root element".into()),
    }
}

/// Escape text or attribute content.
pub fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
