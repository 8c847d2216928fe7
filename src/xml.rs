//! XML element tree
//!
//! A minimal in-memory element model read with `quick_xml::NsReader`. The
//! surrounding client normally owns document parsing; this module exists so
//! that attributes can be read from a string and so tests can build elements
//! directly.

use crate::error::{AttributeError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// A node inside an element: either a child element or a run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its resolved namespace, attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Qualified tag name, including any prefix
    name: String,
    /// Namespace URI the tag resolves to
    namespace: Option<String>,
    /// Attributes in document order, keyed by qualified name
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Parse a document and return its root element
    ///
    /// Text is kept verbatim apart from entity unescaping; CDATA sections
    /// are kept as text.
    pub fn parse_str(xml: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            let (ns, event) = reader.read_resolved_event()?;
            let namespace = match ns {
                ResolveResult::Bound(ns) => Some(std::str::from_utf8(ns.as_ref())?.to_string()),
                _ => None,
            };

            match event {
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(AttributeError::MultipleRoots(
                            std::str::from_utf8(start.name().as_ref())?.to_string(),
                        ));
                    }
                    stack.push(Self::from_start(&start, namespace)?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start, namespace)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element)?;
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    match stack.last_mut() {
                        Some(parent) => parent.push_text(text),
                        None if text.trim().is_empty() => {}
                        None => return Err(AttributeError::TextOutsideRoot(text)),
                    }
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    let text = std::str::from_utf8(&bytes)?.to_string();
                    match stack.last_mut() {
                        Some(parent) => parent.push_text(text),
                        None => return Err(AttributeError::TextOutsideRoot(text)),
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(AttributeError::UnclosedElement(open.name));
        }
        root.ok_or(AttributeError::MissingRoot)
    }

    fn from_start(start: &BytesStart<'_>, namespace: Option<String>) -> Result<Self> {
        let mut element = Self {
            name: std::str::from_utf8(start.name().as_ref())?.to_string(),
            namespace,
            ..Default::default()
        };
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    /// Adjacent text runs (text split by entities or CDATA) are merged
    fn push_text(&mut self, text: String) {
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(XmlNode::Text(text));
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without its prefix
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Value of an attribute by qualified name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Text directly inside this element, ignoring child elements
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// All descendant text in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// A document has exactly one root; a second top-level element is an error
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_some() => return Err(AttributeError::MultipleRoots(element.name)),
        None => *root = Some(element),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let element = XmlElement::parse_str("<bozo type='number'>blah, blah</bozo>").unwrap();
        assert_eq!(element.name(), "bozo");
        assert_eq!(element.local_name(), "bozo");
        assert_eq!(element.prefix(), None);
        assert_eq!(element.namespace(), None);
        assert_eq!(element.attribute("type"), Some("number"));
        assert_eq!(element.attribute("access"), None);
        assert_eq!(element.text(), "blah, blah");
    }

    #[test]
    fn test_parse_resolves_namespace() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:g="http://base.google.com/ns/1.0">
  <title>Camera</title>
  <g:price type="floatUnit">12.5 usd</g:price>
</entry>"#;
        let entry = XmlElement::parse_str(xml).unwrap();
        assert_eq!(entry.namespace(), Some("http://www.w3.org/2005/Atom"));

        let children: Vec<_> = entry.child_elements().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].namespace(), Some("http://www.w3.org/2005/Atom"));
        assert_eq!(children[1].name(), "g:price");
        assert_eq!(children[1].local_name(), "price");
        assert_eq!(children[1].prefix(), Some("g"));
        assert_eq!(children[1].namespace(), Some("http://base.google.com/ns/1.0"));
        assert_eq!(children[1].text(), "12.5 usd");
    }

    #[test]
    fn test_text_is_unescaped_and_merged() {
        let element =
            XmlElement::parse_str("<a>fish &amp; chips <![CDATA[<b>]]> done</a>").unwrap();
        assert_eq!(element.text(), "fish & chips <b> done");
        assert_eq!(element.children().len(), 1);
    }

    #[test]
    fn test_text_keeps_whitespace() {
        let element = XmlElement::parse_str("<a>  padded  </a>").unwrap();
        assert_eq!(element.text(), "  padded  ");
    }

    #[test]
    fn test_text_and_text_content() {
        let element =
            XmlElement::parse_str("<shipping>US<country>US</country><price>5 usd</price></shipping>")
                .unwrap();
        assert_eq!(element.text(), "US");
        assert_eq!(element.text_content(), "USUS5 usd");
        assert_eq!(element.child_elements().count(), 2);
    }

    #[test]
    fn test_empty_element() {
        let element = XmlElement::parse_str("<flag access='private'/>").unwrap();
        assert_eq!(element.text(), "");
        assert_eq!(element.attribute("access"), Some("private"));
    }

    #[test]
    fn test_missing_root() {
        let err = XmlElement::parse_str("<?xml version='1.0'?>").unwrap_err();
        assert!(matches!(err, AttributeError::MissingRoot));
    }

    #[test]
    fn test_malformed_xml_fails() {
        assert!(XmlElement::parse_str("<a><b></a>").is_err());
        assert!(XmlElement::parse_str("<a>open").is_err());
    }

    #[test]
    fn test_second_root_is_rejected() {
        let err = XmlElement::parse_str("<a>1</a><b>2</b>").unwrap_err();
        assert!(matches!(err, AttributeError::MultipleRoots(ref name) if name == "b"));

        let err = XmlElement::parse_str("<a/><b/>").unwrap_err();
        assert!(matches!(err, AttributeError::MultipleRoots(ref name) if name == "b"));
    }

    #[test]
    fn test_text_outside_root_is_rejected() {
        let err = XmlElement::parse_str("junk<a>1</a>").unwrap_err();
        assert!(matches!(err, AttributeError::TextOutsideRoot(ref text) if text == "junk"));

        assert!(XmlElement::parse_str("<a>1</a>trailing").is_err());
        assert!(XmlElement::parse_str("<a>1</a><![CDATA[x]]>").is_err());
    }

    #[test]
    fn test_whitespace_around_root_is_allowed() {
        let element =
            XmlElement::parse_str("<?xml version='1.0'?>\n  <a>1</a>\n").unwrap();
        assert_eq!(element.name(), "a");
        assert_eq!(element.text(), "1");
    }

    #[test]
    fn test_builder() {
        let element = XmlElement::new("item_type")
            .with_attribute("type", "text")
            .with_text("Product")
            .with_child(XmlElement::new("note").with_text("x"));
        assert_eq!(element.attribute("type"), Some("text"));
        assert_eq!(element.text(), "Product");
        assert_eq!(element.text_content(), "Productx");
        assert_eq!(element.attributes().count(), 1);
    }
}
