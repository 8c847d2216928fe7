//! Write options for attribute serialization

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Google Base namespace URI
pub const GBASE_NAMESPACE: &str = "http://base.google.com/ns/1.0";

/// Conventional prefix bound to [`GBASE_NAMESPACE`]
pub const GBASE_PREFIX: &str = "g";

/// How attribute elements are written
///
/// ```yaml
/// prefix: g
/// declare_namespace: true
/// indent: 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    /// Prefix put in front of every attribute tag (`g` gives `<g:price>`)
    pub prefix: Option<String>,
    /// Emit `xmlns:<prefix>` for the Google Base namespace on each attribute
    /// element. Ignored without a prefix.
    pub declare_namespace: bool,
    /// Indentation width used by [`XmlOptions::writer`]; `None` writes compact XML
    pub indent: Option<usize>,
}

impl XmlOptions {
    /// `g:`-prefixed elements that declare the Google Base namespace themselves
    pub fn google_base() -> Self {
        Self {
            prefix: Some(GBASE_PREFIX.to_string()),
            declare_namespace: true,
            indent: None,
        }
    }

    /// Load options from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Qualified tag for a local element name
    pub(crate) fn qualify(&self, local: &str) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
            _ => local.to_string(),
        }
    }

    /// `xmlns` declaration to put on an element, if any
    pub(crate) fn namespace_declaration(&self) -> Option<(String, &'static str)> {
        match &self.prefix {
            Some(prefix) if self.declare_namespace && !prefix.is_empty() => {
                Some((format!("xmlns:{}", prefix), GBASE_NAMESPACE))
            }
            _ => None,
        }
    }

    /// Create a writer honouring the indent setting
    pub fn writer<W: std::io::Write>(&self, inner: W) -> quick_xml::Writer<W> {
        match self.indent {
            Some(width) => quick_xml::Writer::new_with_indent(inner, b' ', width),
            None => quick_xml::Writer::new(inner),
        }
    }
}
