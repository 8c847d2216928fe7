//! Attribute collection for one feed entry

use crate::attribute::Attribute;
use crate::config::{XmlOptions, GBASE_NAMESPACE};
use crate::error::Result;
use crate::types::AttributeType;
use crate::xml::XmlElement;
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Ordered Google Base attributes of an entry
///
/// Names may repeat (an item can carry several `label` attributes), so this
/// is a list rather than a map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeCollection {
    attributes: Vec<Attribute>,
}

impl AttributeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every child of `entry` bound to the Google Base namespace
    pub fn parse(entry: &XmlElement) -> Self {
        let attributes: Vec<Attribute> = entry
            .child_elements()
            .filter(|child| child.namespace() == Some(GBASE_NAMESPACE))
            .map(Attribute::parse)
            .collect();
        tracing::debug!(
            entry = entry.name(),
            count = attributes.len(),
            "parsed Google Base attributes"
        );
        Self { attributes }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn add(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// First attribute with this name
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes.iter().filter(move |a| a.name() == name)
    }

    /// First attribute with this name whose type is `attribute_type` or one
    /// of its subtypes. Untyped attributes never match.
    pub fn get_typed(&self, name: &str, attribute_type: &AttributeType) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name() == name && has_subtype_of(a, attribute_type))
    }

    pub fn get_all_typed<'a>(
        &'a self,
        name: &'a str,
        attribute_type: &'a AttributeType,
    ) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.get_all(name)
            .filter(move |a| has_subtype_of(a, attribute_type))
    }

    /// Remove every attribute with this name, returning how many went
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name() != name);
        before - self.attributes.len()
    }

    /// Write every attribute as a sibling element
    pub fn save<W: Write>(&self, writer: &mut Writer<W>, options: &XmlOptions) -> Result<()> {
        for attribute in &self.attributes {
            attribute.save_with(writer, options)?;
        }
        Ok(())
    }
}

fn has_subtype_of(attribute: &Attribute, attribute_type: &AttributeType) -> bool {
    attribute
        .attribute_type()
        .is_some_and(|t| attribute_type.is_supertype_of(t))
}

impl FromIterator<Attribute> for AttributeCollection {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl Extend<Attribute> for AttributeCollection {
    fn extend<I: IntoIterator<Item = Attribute>>(&mut self, iter: I) {
        self.attributes.extend(iter);
    }
}

impl IntoIterator for AttributeCollection {
    type Item = Attribute;
    type IntoIter = std::vec::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeCollection {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
