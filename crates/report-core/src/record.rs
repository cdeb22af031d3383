//! Flat display records.
//!
//! A [`Record`] is the shape in which query results cross the system boundary:
//! an ordered list of named [`FieldValue`]s that serialises to a flat JSON
//! object. [`ToRecord`] converts the core data types into records.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{BalanceSnapshot, CompanyRecord, RevenuePoint};

/// Output format for dates in records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single field value in a [`Record`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value, possibly NaN.
    Float(f64),
    /// Text value.
    Text(String),
}

impl FieldValue {
    /// Returns true for values that count as missing for display purposes:
    /// `Null`, NaN, and blank or whitespace-only text.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(v) => v.is_nan(),
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(_) | Self::Int(_) => false,
        }
    }

    /// Returns the text if this is a `Text` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a `Float` value, or an `Int` that
    /// converts to `f64` without loss.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => exact_f64(*v),
            _ => None,
        }
    }
}

/// `None` outside the range of integers an `f64` represents exactly (±2^53).
fn exact_f64(v: i64) -> Option<f64> {
    const EXACT: i64 = 1 << 53;
    if (-EXACT..=EXACT).contains(&v) {
        Some(v as f64)
    } else {
        None
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Text(d.format(DATE_FORMAT).to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// An ordered mapping of field names to values.
///
/// Field order is insertion order; inserting an existing name replaces the value
/// in place. Serialises as a flat JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Sets a field, replacing any existing value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder form of [`Record::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over `(name, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Conversion into a display [`Record`].
pub trait ToRecord {
    /// Builds the record for this value.
    fn to_record(&self) -> Record;
}

impl ToRecord for CompanyRecord {
    fn to_record(&self) -> Record {
        Record::new()
            .with("tax_id", self.tax_id.as_str())
            .with("name", self.name.as_str())
            .with("kved", self.industry_code.as_str())
            .with("opf_code", self.legal_form_code.as_str())
            .with("katottg", self.territory_code.as_str())
            .with("region_code", self.region_code.as_str())
            .with("local_code", self.local_code.as_str())
    }
}

impl ToRecord for BalanceSnapshot {
    fn to_record(&self) -> Record {
        Record::new()
            .with("assets", self.assets)
            .with("equity", self.equity)
            .with("liabilities", self.liabilities)
            .with("date", self.date)
    }
}

impl ToRecord for RevenuePoint {
    fn to_record(&self) -> Record {
        Record::new().with("date", self.date).with("value", self.value)
    }
}
