#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/bank-report/bank-report/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company registry and financial statement lookups by tax identifier.
//!
//! This crate re-exports the core types, the CSV loaders and the query service,
//! and provides a [`ReportService`] that loads both sources once and prepares
//! sanitised records for display.
//!
//! # Features
//!
//! - `frames` - polars DataFrame views of line items and revenue series
//! - `cli` - the `bank-report` command-line binary
//!
//! # Example
//!
//! ```rust,ignore
//! use bank_report::{DatasetPaths, ReportService, parse_report_date};
//!
//! fn main() -> bank_report::Result<()> {
//!     let service = ReportService::load(&DatasetPaths::new("firms.csv", "fin_values.csv"))?;
//!
//!     let date = parse_report_date("2021-12-31")?;
//!     let snapshot = service.query().balance_snapshot("00236903", date);
//!     println!("{:?}", snapshot);
//!
//!     for date in service.query().available_report_dates("00236903") {
//!         println!("{date}");
//!     }
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use report_core::*;

// Loaders
pub use report_csv::{CompanyTable, FINANCIAL_COLUMNS, FinancialTable, REGISTRY_COLUMNS};

// Queries
pub use report_query::FinancialQueryService;
#[cfg(feature = "frames")]
pub use report_query::{financial_frame, revenue_frame};

mod config;
mod service;
pub use config::{
    COMPANIES_ENV, DEFAULT_COMPANIES_PATH, DEFAULT_FINANCIALS_PATH, DatasetPaths, FINANCIALS_ENV,
};
pub use service::{ReportService, parse_report_date};
