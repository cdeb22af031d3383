//! Polars DataFrame views of financial line items.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DataType};
use report_core::{ReportError, Result, RevenuePoint};
use report_csv::FinancialTable;

use crate::service::FinancialQueryService;

/// Polars stores dates as days since the Unix epoch.
fn epoch_days(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as i32
}

fn date_column(name: &str, dates: impl Iterator<Item = NaiveDate>) -> Result<Column> {
    let days: Vec<i32> = dates.map(epoch_days).collect();
    Column::new(name.into(), days)
        .cast(&DataType::Date)
        .map_err(|e| ReportError::Frame(e.to_string()))
}

/// Builds a DataFrame of every line item in table order.
///
/// Columns: `tax_id`, `date` (Date), `code` (i32), `value` (nullable f64),
/// `c_doc_sub`.
///
/// # Errors
/// Returns [`ReportError::Frame`] if polars rejects the columns.
pub fn financial_frame(table: &FinancialTable) -> Result<DataFrame> {
    let records = table.records();
    let tax_ids: Vec<&str> = records.iter().map(|r| r.tax_id.as_str()).collect();
    let codes: Vec<i32> = records.iter().map(|r| r.line_code.value()).collect();
    let values: Vec<Option<f64>> = records.iter().map(|r| r.value).collect();
    let subs: Vec<&str> = records.iter().map(|r| r.sub_classifier.as_str()).collect();

    DataFrame::new(vec![
        Column::new("tax_id".into(), tax_ids),
        date_column("date", records.iter().map(|r| r.report_date))?,
        Column::new("code".into(), codes),
        Column::new("value".into(), values),
        Column::new("c_doc_sub".into(), subs),
    ])
    .map_err(|e| ReportError::Frame(e.to_string()))
}

/// Builds a two-column (`date`, `value`) DataFrame from a revenue series.
///
/// # Errors
/// Returns [`ReportError::Frame`] if polars rejects the columns.
pub fn revenue_frame(points: &[RevenuePoint]) -> Result<DataFrame> {
    let values: Vec<Option<f64>> = points.iter().map(|p| p.value).collect();
    DataFrame::new(vec![
        date_column("date", points.iter().map(|p| p.date))?,
        Column::new("value".into(), values),
    ])
    .map_err(|e| ReportError::Frame(e.to_string()))
}

impl FinancialQueryService {
    /// Returns the revenue series for `tax_id` as a DataFrame, or `None` when
    /// the company has no revenue data.
    ///
    /// # Errors
    /// Returns [`ReportError::Frame`] if polars rejects the columns.
    pub fn revenue_frame(&self, tax_id: &str) -> Result<Option<DataFrame>> {
        self.revenue_series(tax_id)
            .map(|series| revenue_frame(&series))
            .transpose()
    }

    /// Returns every loaded line item as a DataFrame.
    ///
    /// # Errors
    /// Returns [`ReportError::Frame`] if polars rejects the columns.
    pub fn financials_frame(&self) -> Result<DataFrame> {
        financial_frame(self.financials())
    }
}
