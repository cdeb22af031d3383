//! Financial query service.

use chrono::NaiveDate;
use report_core::{BalanceSnapshot, CompanyRecord, FinancialRecord, LineCode, RevenuePoint, TaxId};
use report_csv::{CompanyTable, FinancialTable};
use tracing::debug;

/// Read-only queries over the company registry and financial line items.
///
/// Every tax id argument is trimmed and then compared by exact string equality:
/// no case folding and no numeric comparison.
///
/// # Example
///
/// ```rust,ignore
/// use report_query::FinancialQueryService;
/// use report_csv::{CompanyTable, FinancialTable};
///
/// let service = FinancialQueryService::new(
///     CompanyTable::load("data/firms.csv")?,
///     FinancialTable::load("data/fin_values.csv")?,
/// );
/// let date = chrono::NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
/// let snapshot = service.balance_snapshot("00236903", date);
/// println!("liabilities: {:?}", snapshot.liabilities);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FinancialQueryService {
    companies: CompanyTable,
    financials: FinancialTable,
}

impl FinancialQueryService {
    /// Creates a service over two loaded tables.
    #[must_use]
    pub fn new(companies: CompanyTable, financials: FinancialTable) -> Self {
        Self {
            companies,
            financials,
        }
    }

    /// Returns the company registry.
    #[must_use]
    pub const fn companies(&self) -> &CompanyTable {
        &self.companies
    }

    /// Returns the financial line items.
    #[must_use]
    pub const fn financials(&self) -> &FinancialTable {
        &self.financials
    }

    /// Returns true if the registry holds at least one row for `tax_id`.
    #[must_use]
    pub fn company_exists(&self, tax_id: &str) -> bool {
        self.companies.contains(&TaxId::new(tax_id))
    }

    /// Returns the first registry row for `tax_id`.
    #[must_use]
    pub fn company(&self, tax_id: &str) -> Option<&CompanyRecord> {
        self.companies.get(&TaxId::new(tax_id))
    }

    /// Returns every line item for `tax_id` with the given code, in table order.
    #[must_use]
    pub fn line_items(&self, tax_id: &str, line_code: LineCode) -> Vec<&FinancialRecord> {
        self.financials
            .for_company(&TaxId::new(tax_id))
            .iter()
            .filter(|r| r.line_code == line_code)
            .collect()
    }

    /// Reconstructs the balance sheet totals for `tax_id` on exactly `date`.
    ///
    /// Assets (1300) and equity (1495) are taken from the first matching row;
    /// there is no fallback to a nearby date. Liabilities are derived only when
    /// both are present. The company's existence is not checked, so an unknown
    /// company yields an all-absent snapshot; see
    /// [`checked_balance_snapshot`](Self::checked_balance_snapshot).
    #[must_use]
    pub fn balance_snapshot(&self, tax_id: &str, date: NaiveDate) -> BalanceSnapshot {
        let rows = self.financials.for_company(&TaxId::new(tax_id));
        let value_at = |code: LineCode| {
            rows.iter()
                .find(|r| r.line_code == code && r.report_date == date)
                .and_then(|r| r.value)
        };

        let snapshot = BalanceSnapshot::new(
            value_at(LineCode::TOTAL_ASSETS),
            value_at(LineCode::TOTAL_EQUITY),
            date,
        );
        if snapshot.is_empty() {
            debug!(tax_id, %date, "No balance data for date");
        }
        snapshot
    }

    /// Like [`balance_snapshot`](Self::balance_snapshot), but returns `None`
    /// when the company is not in the registry.
    #[must_use]
    pub fn checked_balance_snapshot(
        &self,
        tax_id: &str,
        date: NaiveDate,
    ) -> Option<BalanceSnapshot> {
        self.company_exists(tax_id)
            .then(|| self.balance_snapshot(tax_id, date))
    }

    /// Returns the revenue (2000) history for `tax_id`, ascending by date.
    ///
    /// Returns `None` when the company has no revenue rows at all, so callers
    /// can tell "no revenue data" apart from an empty result.
    #[must_use]
    pub fn revenue_series(&self, tax_id: &str) -> Option<Vec<RevenuePoint>> {
        let series: Vec<RevenuePoint> = self
            .line_items(tax_id, LineCode::REVENUE)
            .into_iter()
            .map(|r| RevenuePoint {
                date: r.report_date,
                value: r.value,
            })
            .collect();

        if series.is_empty() {
            debug!(tax_id, "No revenue data");
            None
        } else {
            Some(series)
        }
    }

    /// Returns the distinct reporting dates with any line item for `tax_id`,
    /// most recent first. Empty when the company has no records.
    #[must_use]
    pub fn available_report_dates(&self, tax_id: &str) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .financials
            .for_company(&TaxId::new(tax_id))
            .iter()
            .map(|r| r.report_date)
            .collect();
        // Rows are already ascending by date within a company.
        dates.dedup();
        dates.reverse();
        dates
    }
}
