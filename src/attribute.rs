//! Google Base attribute value and its XML mapping
//!
//! One attribute is one XML element:
//!
//! ```xml
//! <item_type type="text" access="private">Product</item_type>
//! ```
//!
//! The tag gives the name (underscores become spaces), the `type` attribute
//! goes through [`AttributeType::for_name`], `access="private"` sets the
//! private flag and the element text is the content. Nothing else on the
//! element is consulted.

use crate::config::XmlOptions;
use crate::error::Result;
use crate::types::AttributeType;
use crate::xml::{XmlElement, XmlNode};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::io::Write;

const TYPE_ATTRIBUTE: &str = "type";
const ACCESS_ATTRIBUTE: &str = "access";
const PRIVATE_ACCESS: &str = "private";

/// Convert an element tag to an attribute name
pub fn tag_to_name(tag: &str) -> String {
    tag.replace('_', " ")
}

/// Convert an attribute name to an element tag
pub fn name_to_tag(name: &str) -> String {
    name.replace(' ', "_")
}

/// Own text of an element; whitespace-only runs between children are layout
fn element_content(element: &XmlElement) -> String {
    if element.child_elements().next().is_none() {
        return element.text();
    }
    element
        .children()
        .iter()
        .filter_map(|node| match node {
            XmlNode::Text(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// A typed Google Base attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    attribute_type: Option<AttributeType>,
    content: String,
    #[serde(default)]
    is_private: bool,
    /// Child elements of group attributes (shipping, tax), as (name, content)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sub_elements: Vec<(String, String)>,
}

impl Attribute {
    /// Create a public attribute. `None` leaves it untyped.
    pub fn new(
        name: impl Into<String>,
        attribute_type: Option<AttributeType>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            content: content.into(),
            is_private: false,
            sub_elements: Vec::new(),
        }
    }

    pub fn with_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    pub fn with_sub_element(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.sub_elements.push((name.into(), content.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_type(&self) -> Option<&AttributeType> {
        self.attribute_type.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn set_private(&mut self, is_private: bool) {
        self.is_private = is_private;
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn sub_elements(&self) -> &[(String, String)] {
        &self.sub_elements
    }

    /// Content of the first sub-element with this name
    pub fn sub_element(&self, name: &str) -> Option<&str> {
        self.sub_elements
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    // ========================================================================
    // PARSING
    // ========================================================================

    /// Build an attribute from one element
    ///
    /// Leaf elements keep their text verbatim. For group elements only the
    /// text runs that are not pure whitespace count as content, so
    /// indentation between sub-elements is dropped.
    ///
    /// Never fails: a missing `type` leaves the attribute untyped, an unknown
    /// one becomes an `Other` type, and any `access` value other than
    /// `private` means public.
    pub fn parse(element: &XmlElement) -> Self {
        let attribute = Self {
            name: tag_to_name(element.local_name()),
            attribute_type: element.attribute(TYPE_ATTRIBUTE).map(AttributeType::for_name),
            content: element_content(element),
            is_private: element.attribute(ACCESS_ATTRIBUTE) == Some(PRIVATE_ACCESS),
            sub_elements: element
                .child_elements()
                .map(|child| (tag_to_name(child.local_name()), child.text_content()))
                .collect(),
        };
        tracing::trace!(
            name = %attribute.name,
            attribute_type = ?attribute.attribute_type.as_ref().map(AttributeType::name),
            is_private = attribute.is_private,
            "parsed attribute"
        );
        attribute
    }

    /// Parse a single-element XML document
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Ok(Self::parse(&XmlElement::parse_str(xml)?))
    }

    // ========================================================================
    // SERIALIZATION
    // ========================================================================

    /// Write the attribute as one element with a bare tag
    pub fn save<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        self.save_with(writer, &XmlOptions::default())
    }

    /// Write the attribute as one element using the given options
    pub fn save_with<W: Write>(&self, writer: &mut Writer<W>, options: &XmlOptions) -> Result<()> {
        let tag = options.qualify(&name_to_tag(&self.name));
        let mut start = BytesStart::new(tag.as_str());
        if let Some((key, uri)) = options.namespace_declaration() {
            start.push_attribute((key.as_str(), uri));
        }
        if let Some(attribute_type) = &self.attribute_type {
            start.push_attribute((TYPE_ATTRIBUTE, attribute_type.name()));
        }
        if self.is_private {
            start.push_attribute((ACCESS_ATTRIBUTE, PRIVATE_ACCESS));
        }

        writer.write_event(Event::Start(start))?;
        if !self.content.is_empty() {
            writer.write_event(Event::Text(BytesText::new(&self.content)))?;
        }
        for (name, content) in &self.sub_elements {
            let child_tag = options.qualify(&name_to_tag(name));
            writer.write_event(Event::Start(BytesStart::new(child_tag.as_str())))?;
            if !content.is_empty() {
                writer.write_event(Event::Text(BytesText::new(content)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(child_tag.as_str())))?;
        }
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        Ok(())
    }

    /// Serialize to a standalone XML string
    pub fn to_xml_string(&self, options: &XmlOptions) -> Result<String> {
        let mut writer = options.writer(Vec::new());
        self.save_with(&mut writer, options)?;
        let bytes = writer.into_inner();
        Ok(std::str::from_utf8(&bytes)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GBASE_NAMESPACE;
    use crate::types::AttributeKind;

    fn parse(xml: &str) -> Attribute {
        Attribute::from_xml_str(xml).unwrap()
    }

    fn assert_reread_is_same(attribute: &Attribute) {
        let mut writer = Writer::new(Vec::new());
        attribute.save(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();

        let parsed = parse(&xml);
        assert_eq!(attribute.name(), parsed.name(), "name");
        assert_eq!(attribute.attribute_type(), parsed.attribute_type(), "type");
        assert_eq!(attribute.content(), parsed.content(), "content");
        assert_eq!(attribute.is_private(), parsed.is_private(), "private");
        assert_eq!(attribute, &parsed);
    }

    #[test]
    fn test_parse() {
        let attribute = parse("<bozo type='number'>blah, blah</bozo>");
        assert_eq!(attribute.name(), "bozo");
        assert_eq!(attribute.attribute_type(), Some(&AttributeType::NUMBER));
        assert_eq!(attribute.content(), "blah, blah");
        assert!(!attribute.is_private());
    }

    #[test]
    fn test_parse_public_attribute() {
        let attribute = parse("<bozo type='clown'>blah, blah</bozo>");
        assert!(!attribute.is_private());
        assert_eq!(
            attribute.attribute_type().map(AttributeType::kind),
            Some(AttributeKind::Other)
        );
    }

    #[test]
    fn test_parse_private_attribute() {
        let attribute = parse("<bozo access='private' type='clown'>blah, blah</bozo>");
        assert!(attribute.is_private());
    }

    #[test]
    fn test_parse_other_access_values_are_public() {
        assert!(!parse("<bozo access='public'>x</bozo>").is_private());
        assert!(!parse("<bozo access='Private'>x</bozo>").is_private());
        assert!(!parse("<bozo access=''>x</bozo>").is_private());
    }

    #[test]
    fn test_parse_attribute_with_space() {
        let attribute = parse("<item_type type='text'>blah, blah</item_type>");
        assert_eq!(attribute.name(), "item type");
        assert_eq!(attribute.attribute_type(), Some(&AttributeType::TEXT));
    }

    #[test]
    fn test_parse_attribute_with_no_type() {
        let attribute = parse("<item_type>blah, blah</item_type>");
        assert_eq!(attribute.name(), "item type");
        assert_eq!(attribute.attribute_type(), None);
    }

    #[test]
    fn test_parse_ignores_other_attributes() {
        let attribute = parse("<bozo lang='en' unit='kg' type='int'>3</bozo>");
        assert_eq!(attribute, Attribute::new("bozo", Some(AttributeType::INT), "3"));
    }

    #[test]
    fn test_parse_uses_local_name() {
        let attribute = parse(&format!(
            "<g:item_type xmlns:g='{}'>Product</g:item_type>",
            GBASE_NAMESPACE
        ));
        assert_eq!(attribute.name(), "item type");
    }

    #[test]
    fn test_parse_sub_elements() {
        let attribute = parse(
            "<shipping type='shipping'><country>US</country><service>UPS</service><price>5 usd</price></shipping>",
        );
        assert_eq!(attribute.content(), "");
        assert_eq!(attribute.sub_element("country"), Some("US"));
        assert_eq!(attribute.sub_element("price"), Some("5 usd"));
        assert_eq!(attribute.sub_element("region"), None);
    }

    #[test]
    fn test_parse_indented_group_attribute() {
        let attribute = parse(
            "<shipping type='shipping'>\n  <country>US</country>\n  <service>UPS</service>\n  <price>5 usd</price>\n</shipping>",
        );
        assert_eq!(attribute.content(), "");
        assert_eq!(attribute.sub_elements().len(), 3);
        assert_eq!(attribute.sub_element("service"), Some("UPS"));
    }

    #[test]
    fn test_parse_leaf_keeps_whitespace() {
        let attribute = parse("<note type='text'>\n  spaced  \n</note>");
        assert_eq!(attribute.content(), "\n  spaced  \n");
        assert_eq!(parse("<note>   </note>").content(), "   ");
    }

    #[test]
    fn test_parse_group_keeps_non_blank_text() {
        let attribute = parse("<tax>\n  standard\n  <country>US</country>\n</tax>");
        assert_eq!(attribute.content(), "\n  standard\n  ");
        assert_eq!(attribute.sub_element("country"), Some("US"));
    }

    #[test]
    fn test_generate() {
        assert_reread_is_same(&Attribute::new(
            "bozo",
            Some(AttributeType::for_name("clown")),
            "oops !",
        ));
    }

    #[test]
    fn test_generate_with_space() {
        assert_reread_is_same(&Attribute::new("item type", None, "Product"));
    }

    #[test]
    fn test_generate_private() {
        let mut attribute = Attribute::new("bozo", Some(AttributeType::INT), "oops !");
        attribute.set_private(true);
        assert_reread_is_same(&attribute);
    }

    #[test]
    fn test_generate_escapes_markup() {
        assert_reread_is_same(&Attribute::new(
            "description",
            Some(AttributeType::TEXT),
            "<b>fish & chips</b> \"fresh\"",
        ));
    }

    #[test]
    fn test_generate_empty_content() {
        assert_reread_is_same(&Attribute::new("label", Some(AttributeType::TEXT), ""));
    }

    #[test]
    fn test_generate_sub_elements() {
        assert_reread_is_same(
            &Attribute::new("tax", Some(AttributeType::TAX), "")
                .with_sub_element("country", "US")
                .with_sub_element("tax ship", "true"),
        );
    }

    #[test]
    fn test_save_output() {
        let attribute = Attribute::new("item type", Some(AttributeType::TEXT), "Product")
            .with_private(true);
        let xml = attribute.to_xml_string(&XmlOptions::default()).unwrap();
        assert_eq!(
            xml,
            r#"<item_type type="text" access="private">Product</item_type>"#
        );
    }

    #[test]
    fn test_save_untyped_omits_type() {
        let xml = Attribute::new("item type", None, "Product")
            .to_xml_string(&XmlOptions::default())
            .unwrap();
        assert_eq!(xml, "<item_type>Product</item_type>");
    }

    #[test]
    fn test_save_with_google_base_options() {
        let attribute = Attribute::new("price", Some(AttributeType::FLOAT_UNIT), "12.5 usd");
        let xml = attribute.to_xml_string(&XmlOptions::google_base()).unwrap();
        assert_eq!(
            xml,
            format!(
                r#"<g:price xmlns:g="{}" type="floatUnit">12.5 usd</g:price>"#,
                GBASE_NAMESPACE
            )
        );

        let element = XmlElement::parse_str(&xml).unwrap();
        assert_eq!(element.namespace(), Some(GBASE_NAMESPACE));
        assert_eq!(Attribute::parse(&element), attribute);
    }

    #[test]
    fn test_name_tag_conversion() {
        assert_eq!(tag_to_name("item_type"), "item type");
        assert_eq!(name_to_tag("item type"), "item_type");
        assert_eq!(tag_to_name("a__b"), "a  b");
        assert_eq!(name_to_tag(&tag_to_name("a__b")), "a__b");
    }

    #[test]
    fn test_serde_round_trip() {
        let attribute = Attribute::new("bozo", Some(AttributeType::INT), "3").with_private(true);
        let json = serde_json::to_value(&attribute).unwrap();
        assert_eq!(json["type"], "int");
        assert_eq!(json["is_private"], true);
        assert!(json.get("sub_elements").is_none());

        let back: Attribute = serde_json::from_value(json).unwrap();
        assert_eq!(back, attribute);
    }

    #[test]
    fn test_serde_defaults() {
        let attribute: Attribute =
            serde_json::from_str(r#"{"name":"item type","content":"Product"}"#).unwrap();
        assert_eq!(attribute, Attribute::new("item type", None, "Product"));
    }
}
