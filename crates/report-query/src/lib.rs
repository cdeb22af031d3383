#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/bank-report/bank-report/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Query layer for company financial reports.
//!
//! - [`FinancialQueryService`] - company lookup, balance snapshots, revenue
//!   series and available reporting dates
//! - `frame` - polars DataFrame views of the line items (`frames` feature)

/// Polars DataFrame views.
#[cfg(feature = "frames")]
pub mod frame;
/// Financial query service.
pub mod service;

#[cfg(feature = "frames")]
pub use frame::{financial_frame, revenue_frame};
pub use service::FinancialQueryService;
