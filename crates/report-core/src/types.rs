//! Core data types for company financial reports.
//!
//! This module defines the fundamental data structures:
//!
//! - [`TaxId`] - Company tax identifier (EDRPOU)
//! - [`LineCode`] - Financial statement line item code
//! - [`CompanyRecord`] - Registry row for one entity
//! - [`FinancialRecord`] - One line item for one company and reporting date
//! - [`BalanceSnapshot`] - Assets, equity and derived liabilities on one date
//! - [`RevenuePoint`] - One point of a revenue series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A company tax identifier (EDRPOU).
///
/// Identifiers are trimmed of surrounding whitespace on creation. Nothing else is
/// normalised: case is kept and leading zeros are significant, so `"00236903"`
/// and `"236903"` are different companies.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    /// Creates a new tax id from a string, trimming surrounding whitespace.
    #[must_use]
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_string())
    }

    /// Returns the tax id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaxId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for TaxId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaxId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> Self {
        id.0
    }
}

/// Financial statement line item code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineCode(pub i32);

impl LineCode {
    /// Total assets (balance sheet line 1300).
    pub const TOTAL_ASSETS: Self = Self(1300);
    /// Total equity (balance sheet line 1495).
    pub const TOTAL_EQUITY: Self = Self(1495);
    /// Net revenue (income statement line 2000).
    pub const REVENUE: Self = Self(2000);

    /// Returns the numeric code.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for LineCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// One registered entity from the company registry.
///
/// Serialised field names follow the registry's column names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Tax identifier, the registry key.
    pub tax_id: TaxId,
    /// Registered name.
    pub name: String,
    /// Principal activity code (KVED).
    #[serde(rename = "kved")]
    pub industry_code: String,
    /// Legal form code (OPF).
    #[serde(rename = "opf_code")]
    pub legal_form_code: String,
    /// Territorial unit code (KATOTTG).
    #[serde(rename = "katottg")]
    pub territory_code: String,
    /// Region code.
    pub region_code: String,
    /// Local code.
    pub local_code: String,
}

impl CompanyRecord {
    /// Creates a company record with the given tax id and name; the other
    /// attributes are blank.
    #[must_use]
    pub fn new(tax_id: impl Into<TaxId>, name: impl Into<String>) -> Self {
        Self {
            tax_id: tax_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the KVED industry code.
    #[must_use]
    pub fn with_industry_code(mut self, code: impl Into<String>) -> Self {
        self.industry_code = code.into();
        self
    }

    /// Sets the legal form code.
    #[must_use]
    pub fn with_legal_form_code(mut self, code: impl Into<String>) -> Self {
        self.legal_form_code = code.into();
        self
    }

    /// Sets the KATOTTG territory code.
    #[must_use]
    pub fn with_territory_code(mut self, code: impl Into<String>) -> Self {
        self.territory_code = code.into();
        self
    }

    /// Sets the region and local codes.
    #[must_use]
    pub fn with_location(mut self, region: impl Into<String>, local: impl Into<String>) -> Self {
        self.region_code = region.into();
        self.local_code = local.into();
        self
    }
}

/// One financial statement line item for a company on a reporting date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Company the line item belongs to.
    pub tax_id: TaxId,
    /// Reporting date.
    #[serde(rename = "my_date")]
    pub report_date: NaiveDate,
    /// Statement line code.
    #[serde(rename = "code")]
    pub line_code: LineCode,
    /// Reported amount; `None` when the source cell was blank.
    pub value: Option<f64>,
    /// Auxiliary document sub-classifier.
    #[serde(rename = "c_doc_sub")]
    pub sub_classifier: String,
}

impl FinancialRecord {
    /// Creates a new line item with a value and a blank sub-classifier.
    #[must_use]
    pub fn new(
        tax_id: impl Into<TaxId>,
        report_date: NaiveDate,
        line_code: LineCode,
        value: f64,
    ) -> Self {
        Self {
            tax_id: tax_id.into(),
            report_date,
            line_code,
            value: Some(value),
            sub_classifier: String::new(),
        }
    }

    /// Sets the document sub-classifier.
    #[must_use]
    pub fn with_sub_classifier(mut self, sub: impl Into<String>) -> Self {
        self.sub_classifier = sub.into();
        self
    }
}

/// Balance sheet totals for one company on one exact reporting date.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Total assets (line 1300).
    pub assets: Option<f64>,
    /// Total equity (line 1495).
    pub equity: Option<f64>,
    /// `assets - equity`, present only when both operands are.
    pub liabilities: Option<f64>,
    /// The requested date.
    pub date: NaiveDate,
}

impl BalanceSnapshot {
    /// Creates a snapshot, deriving liabilities from assets and equity.
    #[must_use]
    pub fn new(assets: Option<f64>, equity: Option<f64>, date: NaiveDate) -> Self {
        let liabilities = match (assets, equity) {
            (Some(a), Some(e)) => Some(a - e),
            _ => None,
        };
        Self {
            assets,
            equity,
            liabilities,
            date,
        }
    }

    /// Creates a snapshot with every amount absent.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            assets: None,
            equity: None,
            liabilities: None,
            date,
        }
    }

    /// Returns true if neither assets nor equity were found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assets.is_none() && self.equity.is_none()
    }
}

/// One point of a revenue series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Reporting date.
    pub date: NaiveDate,
    /// Revenue amount; `None` when the source cell was blank.
    pub value: Option<f64>,
}
