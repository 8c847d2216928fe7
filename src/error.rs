//! Error types for attribute parsing, conversion and serialization

use quick_xml::events::attributes::AttrError;

/// Errors raised by the attribute layer
///
/// Parsing an [`Attribute`](crate::Attribute) out of an element never fails;
/// these variants cover the XML collaborator, typed conversions of attribute
/// content and option loading.
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] AttrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("Element <{0}> follows the root element")]
    MultipleRoots(String),

    #[error("Text outside the root element: {0:?}")]
    TextOutsideRoot(String),

    #[error("Invalid {expected} value for attribute '{name}': {value:?}")]
    InvalidValue {
        name: String,
        expected: String,
        value: String,
    },

    #[error("Attribute '{name}' is missing sub-element '{element}'")]
    MissingSubElement { name: String, element: String },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl AttributeError {
    pub(crate) fn invalid_value(
        name: impl Into<String>,
        expected: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AttributeError>;
