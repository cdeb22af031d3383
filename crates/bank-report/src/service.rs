//! Report service: loaded tables plus display preparation.

use chrono::NaiveDate;
use report_core::{Record, ReportError, Result, Sanitizer, ToRecord};
use report_csv::{CompanyTable, FinancialTable};
use report_query::FinancialQueryService;
use tracing::{debug, info, instrument};

use crate::config::DatasetPaths;

/// Parses a caller-supplied reporting date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns [`ReportError::InvalidParameter`] if the text is not a valid date.
pub fn parse_report_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), report_core::DATE_FORMAT).map_err(|e| {
        ReportError::InvalidParameter(format!("Invalid date {raw:?}, expected YYYY-MM-DD: {e}"))
    })
}

/// Loaded report data with a sanitizer for display output.
///
/// Built once at startup and shared read-only (wrap it in an `Arc` to hand it
/// to several consumers).
///
/// # Example
///
/// ```rust,ignore
/// use bank_report::{DatasetPaths, ReportService};
///
/// let service = ReportService::load(&DatasetPaths::default())?;
/// if let Some(company) = service.prepared_company("00236903") {
///     println!("{company:?}");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportService {
    query: FinancialQueryService,
    sanitizer: Sanitizer,
}

impl ReportService {
    /// Loads both source tables.
    ///
    /// # Errors
    /// Any load error aborts construction; there is no partially loaded service.
    #[instrument(skip_all)]
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        let companies = CompanyTable::load(&paths.companies)?;
        let financials = FinancialTable::load(&paths.financials)?;
        info!(
            companies = companies.len(),
            financial_records = financials.len(),
            "Report data loaded"
        );
        Ok(Self::from_tables(companies, financials))
    }

    /// Creates a service over tables that are already loaded.
    #[must_use]
    pub fn from_tables(companies: CompanyTable, financials: FinancialTable) -> Self {
        Self {
            query: FinancialQueryService::new(companies, financials),
            sanitizer: Sanitizer::default(),
        }
    }

    /// Replaces the sanitizer used for prepared records.
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Returns the underlying query service.
    #[must_use]
    pub const fn query(&self) -> &FinancialQueryService {
        &self.query
    }

    /// Returns the sanitizer.
    #[must_use]
    pub const fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Returns the company's registry attributes ready for display, or `None`
    /// if the company is unknown.
    #[must_use]
    pub fn prepared_company(&self, tax_id: &str) -> Option<Record> {
        let company = self.query.company(tax_id)?;
        debug!(tax_id = %company.tax_id, "Preparing company record");
        Some(self.sanitizer.sanitize(&company.to_record()))
    }

    /// Returns the balance snapshot ready for display, or `None` if the
    /// company is unknown.
    #[must_use]
    pub fn prepared_balance(&self, tax_id: &str, date: NaiveDate) -> Option<Record> {
        self.query
            .checked_balance_snapshot(tax_id, date)
            .map(|snapshot| self.sanitizer.sanitize(&snapshot.to_record()))
    }

    /// Returns the revenue series ready for display, or `None` if there is no
    /// revenue data.
    #[must_use]
    pub fn prepared_revenue(&self, tax_id: &str) -> Option<Vec<Record>> {
        let series = self.query.revenue_series(tax_id)?;
        Some(
            series
                .iter()
                .map(|point| self.sanitizer.sanitize(&point.to_record()))
                .collect(),
        )
    }
}
