//! Attribute Type Registry
//!
//! Google Base attributes carry a `type` drawn from a fixed taxonomy of
//! standard types. Any other name is accepted and becomes an [`AttributeKind::Other`]
//! type identified by its name alone.
//!
//! The standard types live in a static table ([`STANDARD_TYPES`]) and form a
//! subtype lattice:
//!
//! ```text
//! number        -> int, float
//! numberUnit    -> intUnit, floatUnit
//! dateTimeRange -> dateTime -> date
//! ```
//!
//! [`AttributeType::is_supertype_of`] is the reflexive, transitive closure of
//! these edges.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::convert::Infallible;
use std::str::FromStr;

// ============================================================================
// ATTRIBUTE KIND
// ============================================================================

/// Symbolic identity of an attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKind {
    Text,
    Boolean,
    Int,
    Float,
    Number,
    IntUnit,
    FloatUnit,
    NumberUnit,
    Date,
    DateTime,
    DateTimeRange,
    Url,
    Location,
    Reference,
    Shipping,
    Tax,
    /// Any type name outside the standard taxonomy
    Other,
}

impl AttributeKind {
    /// Every standard kind, in registry order. `Other` is not included.
    pub const STANDARD: [AttributeKind; 16] = [
        Self::Text,
        Self::Boolean,
        Self::Int,
        Self::Float,
        Self::Number,
        Self::IntUnit,
        Self::FloatUnit,
        Self::NumberUnit,
        Self::Date,
        Self::DateTime,
        Self::DateTimeRange,
        Self::Url,
        Self::Location,
        Self::Reference,
        Self::Shipping,
        Self::Tax,
    ];

    /// Wire name of the kind, as it appears in the `type` XML attribute
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Float => "float",
            Self::Number => "number",
            Self::IntUnit => "intUnit",
            Self::FloatUnit => "floatUnit",
            Self::NumberUnit => "numberUnit",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::DateTimeRange => "dateTimeRange",
            Self::Url => "url",
            Self::Location => "location",
            Self::Reference => "reference",
            Self::Shipping => "shipping",
            Self::Tax => "tax",
            Self::Other => "other",
        }
    }

    /// Look up a standard kind by its exact (case-sensitive) wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::STANDARD.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Direct subtypes in the lattice
    fn direct_subtypes(self) -> &'static [AttributeKind] {
        match self {
            Self::Number => &[Self::Int, Self::Float],
            Self::NumberUnit => &[Self::IntUnit, Self::FloatUnit],
            Self::DateTimeRange => &[Self::DateTime],
            Self::DateTime => &[Self::Date],
            _ => &[],
        }
    }

    /// Reflexive, transitive subtype check between kinds
    ///
    /// `Other` only relates to itself here; callers comparing two `Other`
    /// types must also compare names.
    pub fn is_supertype_of(self, other: AttributeKind) -> bool {
        self == other
            || self
                .direct_subtypes()
                .iter()
                .any(|sub| sub.is_supertype_of(other))
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ATTRIBUTE TYPE
// ============================================================================

/// Type of a Google Base attribute
///
/// Standard types are obtained through the associated constants, through
/// [`STANDARD_TYPES`] or through [`AttributeType::for_name`]. Equality is
/// structural over kind and name, so two `Other` types with the same name
/// are equal while never being equal to a standard type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeType {
    kind: AttributeKind,
    name: Cow<'static, str>,
}

/// The canonical instance of every standard type, in registry order
pub static STANDARD_TYPES: [AttributeType; 16] = [
    AttributeType::TEXT,
    AttributeType::BOOLEAN,
    AttributeType::INT,
    AttributeType::FLOAT,
    AttributeType::NUMBER,
    AttributeType::INT_UNIT,
    AttributeType::FLOAT_UNIT,
    AttributeType::NUMBER_UNIT,
    AttributeType::DATE,
    AttributeType::DATE_TIME,
    AttributeType::DATE_TIME_RANGE,
    AttributeType::URL,
    AttributeType::LOCATION,
    AttributeType::REFERENCE,
    AttributeType::SHIPPING,
    AttributeType::TAX,
];

impl AttributeType {
    pub const TEXT: Self = Self::standard_of(AttributeKind::Text);
    pub const BOOLEAN: Self = Self::standard_of(AttributeKind::Boolean);
    pub const INT: Self = Self::standard_of(AttributeKind::Int);
    pub const FLOAT: Self = Self::standard_of(AttributeKind::Float);
    pub const NUMBER: Self = Self::standard_of(AttributeKind::Number);
    pub const INT_UNIT: Self = Self::standard_of(AttributeKind::IntUnit);
    pub const FLOAT_UNIT: Self = Self::standard_of(AttributeKind::FloatUnit);
    pub const NUMBER_UNIT: Self = Self::standard_of(AttributeKind::NumberUnit);
    pub const DATE: Self = Self::standard_of(AttributeKind::Date);
    pub const DATE_TIME: Self = Self::standard_of(AttributeKind::DateTime);
    pub const DATE_TIME_RANGE: Self = Self::standard_of(AttributeKind::DateTimeRange);
    pub const URL: Self = Self::standard_of(AttributeKind::Url);
    pub const LOCATION: Self = Self::standard_of(AttributeKind::Location);
    pub const REFERENCE: Self = Self::standard_of(AttributeKind::Reference);
    pub const SHIPPING: Self = Self::standard_of(AttributeKind::Shipping);
    pub const TAX: Self = Self::standard_of(AttributeKind::Tax);

    const fn standard_of(kind: AttributeKind) -> Self {
        Self {
            kind,
            name: Cow::Borrowed(kind.as_str()),
        }
    }

    /// Get the type for a name
    ///
    /// Standard names return the canonical instance (borrowing its static
    /// name). Anything else becomes a new `Other` type carrying the name
    /// verbatim; no trimming or case folding is applied.
    ///
    /// The result is an owned value, so compare it by equality. Use
    /// [`AttributeType::standard`] to get the `&'static` table entry itself.
    pub fn for_name(name: &str) -> Self {
        match Self::standard(name) {
            Some(standard) => standard.clone(),
            None => {
                tracing::debug!(type_name = name, "non-standard attribute type");
                Self {
                    kind: AttributeKind::Other,
                    name: Cow::Owned(name.to_string()),
                }
            }
        }
    }

    /// Reference to the canonical entry in [`STANDARD_TYPES`] for a name
    pub fn standard(name: &str) -> Option<&'static AttributeType> {
        STANDARD_TYPES.iter().find(|t| t.name == name)
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_standard(&self) -> bool {
        self.kind != AttributeKind::Other
    }

    /// True if `other` is this type or one of its (transitive) subtypes
    pub fn is_supertype_of(&self, other: &AttributeType) -> bool {
        if self == other {
            return true;
        }
        if !self.is_standard() || !other.is_standard() {
            return false;
        }
        self.kind.is_supertype_of(other.kind)
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for AttributeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::for_name(s))
    }
}

impl Serialize for AttributeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::for_name(&name))
    }
}
