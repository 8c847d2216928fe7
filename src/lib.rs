//! Google Base Attributes - typed attribute layer for product feeds
//!
//! Google Base feed entries carry their product data as elements in the
//! `http://base.google.com/ns/1.0` namespace:
//!
//! ```xml
//! <g:price type="floatUnit">249.99 usd</g:price>
//! <g:item_type type="text">Products</g:item_type>
//! <g:customer_id access="private">c-42</g:customer_id>
//! ```
//!
//! This crate maps each such element to an [`Attribute`] (name, type,
//! content, private flag) and back.
//!
//! ## Contents
//!
//! - [`types`]: the attribute type registry and its subtype lattice
//! - [`attribute`]: one attribute and its XML parse/save
//! - [`values`]: typed views of attribute content (numbers, dates, units...)
//! - [`collection`]: the attributes of one feed entry
//! - [`xml`]: the in-memory XML element tree attributes are read from
//! - [`config`]: write options
//!
//! Transport, authentication and feed queries belong to the surrounding
//! client; nothing here performs I/O beyond the writer it is handed.
//!
//! ## Example
//!
//! ```
//! use gbase_attributes::{Attribute, AttributeType};
//!
//! let attribute = Attribute::from_xml_str("<item_type type='text'>Products</item_type>")?;
//! assert_eq!(attribute.name(), "item type");
//! assert_eq!(attribute.attribute_type(), Some(&AttributeType::TEXT));
//! # Ok::<(), gbase_attributes::AttributeError>(())
//! ```

pub mod attribute;
pub mod collection;
pub mod config;
pub mod error;
pub mod types;
pub mod values;
pub mod xml;

pub use attribute::{name_to_tag, tag_to_name, Attribute};
pub use collection::AttributeCollection;
pub use config::{XmlOptions, GBASE_NAMESPACE, GBASE_PREFIX};
pub use error::{AttributeError, Result};
pub use types::{AttributeKind, AttributeType, STANDARD_TYPES};
pub use values::{DateTimeRange, NumberUnit, Shipping, Tax};
pub use xml::{XmlElement, XmlNode};
