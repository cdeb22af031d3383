//! Presentation sanitizer.
//!
//! Collapses every kind of "missing" value in a [`Record`] (null, NaN, blank
//! text) into one human-readable placeholder before the record is displayed.

use crate::record::{FieldValue, Record};

/// Placeholder used when none is configured.
pub const DEFAULT_PLACEHOLDER: &str = "Немає даних";

/// Replaces missing values in display records with a fixed placeholder.
///
/// Zero, `false` and negative numbers are real data and pass through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sanitizer {
    placeholder: String,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Creates a sanitizer with [`DEFAULT_PLACEHOLDER`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_placeholder(DEFAULT_PLACEHOLDER)
    }

    /// Creates a sanitizer with a custom placeholder.
    #[must_use]
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Returns the placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Returns a sanitised copy of `record`; the input is left untouched.
    #[must_use]
    pub fn sanitize(&self, record: &Record) -> Record {
        record
            .iter()
            .map(|(name, value)| (name.to_string(), self.sanitize_value(value)))
            .collect()
    }

    /// Sanitises a single value.
    #[must_use]
    pub fn sanitize_value(&self, value: &FieldValue) -> FieldValue {
        if value.is_missing() {
            FieldValue::Text(self.placeholder.clone())
        } else {
            value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ToRecord;
    use crate::types::CompanyRecord;

    #[test]
    fn test_blank_name_becomes_placeholder() {
        let company = CompanyRecord::new("00236903", "   ");
        let clean = Sanitizer::new().sanitize(&company.to_record());
        assert_eq!(
            clean.get("name"),
            Some(&FieldValue::Text(DEFAULT_PLACEHOLDER.to_string()))
        );
        assert_eq!(clean.get("tax_id"), Some(&FieldValue::from("00236903")));
    }

    #[test]
    fn test_zero_passes_through() {
        let rec = Record::new()
            .with("value", 0.0)
            .with("count", 0_i64)
            .with("flag", false)
            .with("loss", -12.5);
        let clean = Sanitizer::new().sanitize(&rec);
        assert_eq!(clean, rec);
    }

    #[test]
    fn test_all_missing_kinds_collapse_to_same_placeholder() {
        let rec = Record::new()
            .with("null", FieldValue::Null)
            .with("nan", f64::NAN)
            .with("empty", "")
            .with("ws", " \t\n");
        let sanitizer = Sanitizer::with_placeholder("N/A");
        let clean = sanitizer.sanitize(&rec);
        for (_, value) in clean.iter() {
            assert_eq!(value, &FieldValue::from("N/A"));
        }
    }

    #[test]
    fn test_idempotent() {
        let rec = Record::new()
            .with("a", FieldValue::Null)
            .with("b", "text")
            .with("c", f64::NAN)
            .with("d", 3.5);
        let sanitizer = Sanitizer::new();
        let once = sanitizer.sanitize(&rec);
        let twice = sanitizer.sanitize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_not_mutated() {
        let rec = Record::new().with("a", "");
        let _ = Sanitizer::new().sanitize(&rec);
        assert_eq!(rec.get("a"), Some(&FieldValue::from("")));
    }

    #[test]
    fn test_blank_placeholder_is_still_idempotent() {
        let sanitizer = Sanitizer::with_placeholder("");
        let rec = Record::new().with("a", FieldValue::Null);
        let once = sanitizer.sanitize(&rec);
        assert_eq!(sanitizer.sanitize(&once), once);
    }
}
