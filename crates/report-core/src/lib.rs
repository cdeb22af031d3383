#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/bank-report/bank-report/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for company financial reports.
//!
//! This crate provides the foundational abstractions shared by the loaders and
//! the query service:
//!
//! - [`CompanyRecord`](types::CompanyRecord) - Company registry row
//! - [`FinancialRecord`](types::FinancialRecord) - Financial statement line item
//! - [`BalanceSnapshot`](types::BalanceSnapshot) - Derived balance sheet totals
//! - [`ReportError`](error::ReportError) - Load-time error taxonomy
//! - [`Sanitizer`](sanitize::Sanitizer) - Missing-value normalisation for display

/// Error types for report operations.
pub mod error;
/// Flat display records.
pub mod record;
/// Presentation sanitizer.
pub mod sanitize;
/// Core data types (TaxId, CompanyRecord, FinancialRecord, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ReportError, Result};
pub use record::{DATE_FORMAT, FieldValue, Record, ToRecord};
pub use sanitize::{DEFAULT_PLACEHOLDER, Sanitizer};
pub use types::{BalanceSnapshot, CompanyRecord, FinancialRecord, LineCode, RevenuePoint, TaxId};
