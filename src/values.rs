//! Typed Attribute Values
//!
//! Conversions between attribute content strings and the value shapes of the
//! standard types. Content formats follow the Google Base feed conventions:
//!
//! - `boolean`: `true` / `false`
//! - `date`: `2006-12-31`
//! - `dateTime`: RFC 3339, written in UTC (`2006-12-31T23:59:59Z`)
//! - `dateTimeRange`: `start end`, or a single value when start == end
//! - `intUnit` / `floatUnit` / `numberUnit`: `<number> <unit>`, e.g. `12.5 usd`
//! - `shipping` / `tax`: group attributes carried in sub-elements

use crate::attribute::Attribute;
use crate::error::{AttributeError, Result};
use crate::types::AttributeType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ============================================================================
// VALUE TYPES
// ============================================================================

/// A number with a unit (`intUnit`, `floatUnit`, `numberUnit`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberUnit {
    pub value: f64,
    pub unit: String,
}

impl NumberUnit {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Parse `<number> <unit>`; the unit may itself contain spaces
    pub fn parse(s: &str) -> Option<Self> {
        let (value, unit) = s.trim().split_once(char::is_whitespace)?;
        let unit = unit.trim();
        if unit.is_empty() {
            return None;
        }
        Some(Self::new(value.parse().ok()?, unit))
    }
}

impl std::fmt::Display for NumberUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// A closed range of instants; a single instant has `start == end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateTimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Parse `start end` or a single date / date-time
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let start = parse_date_time(parts.next()?)?;
        let end = match parts.next() {
            Some(end) => parse_date_time(end)?,
            None => start,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self { start, end })
    }
}

impl std::fmt::Display for DateTimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_instant() {
            f.write_str(&format_date_time(&self.start))
        } else {
            write!(
                f,
                "{} {}",
                format_date_time(&self.start),
                format_date_time(&self.end)
            )
        }
    }
}

/// Shipping group attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipping {
    pub country: String,
    pub service: String,
    pub price: NumberUnit,
}

/// Tax group attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    pub country: String,
    pub region: Option<String>,
    /// Percentage
    pub rate: f64,
    /// Whether shipping is taxed too
    pub tax_ship: bool,
}

// ============================================================================
// FORMATTING HELPERS
// ============================================================================

/// Parse an RFC 3339 date-time, a zone-less date-time (taken as UTC) or a
/// bare date (midnight UTC)
pub fn parse_date_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, NAIVE_DATE_TIME_FORMAT) {
        return Some(naive.and_utc());
    }
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

pub fn format_date_time(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_boolean(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// ============================================================================
// ATTRIBUTE CONVERSIONS
// ============================================================================

impl Attribute {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Some(AttributeType::TEXT), value)
    }

    pub fn url(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Some(AttributeType::URL), value)
    }

    pub fn location(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Some(AttributeType::LOCATION), value)
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, Some(AttributeType::INT), value.to_string())
    }

    pub fn float(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, Some(AttributeType::FLOAT), value.to_string())
    }

    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, Some(AttributeType::NUMBER), value.to_string())
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, Some(AttributeType::BOOLEAN), value.to_string())
    }

    pub fn date(name: impl Into<String>, value: NaiveDate) -> Self {
        Self::new(
            name,
            Some(AttributeType::DATE),
            value.format(DATE_FORMAT).to_string(),
        )
    }

    pub fn date_time(name: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(name, Some(AttributeType::DATE_TIME), format_date_time(&value))
    }

    pub fn date_time_range(name: impl Into<String>, value: DateTimeRange) -> Self {
        Self::new(name, Some(AttributeType::DATE_TIME_RANGE), value.to_string())
    }

    pub fn int_unit(name: impl Into<String>, value: NumberUnit) -> Self {
        Self::new(name, Some(AttributeType::INT_UNIT), value.to_string())
    }

    pub fn float_unit(name: impl Into<String>, value: NumberUnit) -> Self {
        Self::new(name, Some(AttributeType::FLOAT_UNIT), value.to_string())
    }

    pub fn number_unit(name: impl Into<String>, value: NumberUnit) -> Self {
        Self::new(name, Some(AttributeType::NUMBER_UNIT), value.to_string())
    }

    pub fn shipping(name: impl Into<String>, value: &Shipping) -> Self {
        Self::new(name, Some(AttributeType::SHIPPING), "")
            .with_sub_element("country", value.country.as_str())
            .with_sub_element("service", value.service.as_str())
            .with_sub_element("price", value.price.to_string())
    }

    pub fn tax(name: impl Into<String>, value: &Tax) -> Self {
        let mut attribute = Self::new(name, Some(AttributeType::TAX), "")
            .with_sub_element("country", value.country.as_str());
        if let Some(region) = &value.region {
            attribute = attribute.with_sub_element("region", region.as_str());
        }
        attribute
            .with_sub_element("rate", value.rate.to_string())
            .with_sub_element("tax ship", value.tax_ship.to_string())
    }

    fn convert<T>(
        &self,
        expected: &AttributeType,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T> {
        parse(self.content()).ok_or_else(|| {
            AttributeError::invalid_value(self.name(), expected.name(), self.content())
        })
    }

    fn required_sub_element(&self, element: &str) -> Result<&str> {
        self.sub_element(element)
            .ok_or_else(|| AttributeError::MissingSubElement {
                name: self.name().to_string(),
                element: element.to_string(),
            })
    }

    pub fn as_text(&self) -> &str {
        self.content()
    }

    pub fn as_int(&self) -> Result<i64> {
        self.convert(&AttributeType::INT, |s| s.trim().parse().ok())
    }

    pub fn as_float(&self) -> Result<f64> {
        self.convert(&AttributeType::FLOAT, |s| s.trim().parse().ok())
    }

    /// Numeric value of an `int`, `float` or `number` attribute
    pub fn as_number(&self) -> Result<f64> {
        self.convert(&AttributeType::NUMBER, |s| s.trim().parse().ok())
    }

    pub fn as_boolean(&self) -> Result<bool> {
        self.convert(&AttributeType::BOOLEAN, parse_boolean)
    }

    pub fn as_date(&self) -> Result<NaiveDate> {
        self.convert(&AttributeType::DATE, |s| {
            NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
        })
    }

    /// Accepts dates too, as `date` is a subtype of `dateTime`
    pub fn as_date_time(&self) -> Result<DateTime<Utc>> {
        self.convert(&AttributeType::DATE_TIME, parse_date_time)
    }

    pub fn as_date_time_range(&self) -> Result<DateTimeRange> {
        self.convert(&AttributeType::DATE_TIME_RANGE, DateTimeRange::parse)
    }

    pub fn as_number_unit(&self) -> Result<NumberUnit> {
        self.convert(&AttributeType::NUMBER_UNIT, NumberUnit::parse)
    }

    pub fn as_shipping(&self) -> Result<Shipping> {
        let price = self.required_sub_element("price")?;
        Ok(Shipping {
            country: self.required_sub_element("country")?.to_string(),
            service: self.required_sub_element("service")?.to_string(),
            price: NumberUnit::parse(price).ok_or_else(|| {
                AttributeError::invalid_value(self.name(), AttributeType::FLOAT_UNIT.name(), price)
            })?,
        })
    }

    pub fn as_tax(&self) -> Result<Tax> {
        let rate = self.required_sub_element("rate")?;
        let tax_ship = match self.sub_element("tax ship") {
            Some(value) => parse_boolean(value).ok_or_else(|| {
                AttributeError::invalid_value(self.name(), AttributeType::BOOLEAN.name(), value)
            })?,
            None => false,
        };
        Ok(Tax {
            country: self.required_sub_element("country")?.to_string(),
            region: self.sub_element("region").map(str::to_string),
            rate: rate.trim().parse().map_err(|_| {
                AttributeError::invalid_value(self.name(), AttributeType::FLOAT.name(), rate)
            })?,
            tax_ship,
        })
    }
}
