#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/bank-report/bank-report/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! CSV loaders for the company registry and financial line items.
//!
//! Both loaders read the whole source eagerly and either return a complete,
//! immutable table or an error:
//!
//! - [`CompanyTable`] - registry rows, indexed by tax id
//! - [`FinancialTable`] - line items sorted by `(tax_id, report_date)`

/// Financial line-item table.
pub mod financials;
/// Company registry table.
pub mod registry;

mod source;

pub use financials::{FINANCIAL_COLUMNS, FinancialTable};
pub use registry::{CompanyTable, REGISTRY_COLUMNS};
