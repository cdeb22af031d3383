//! Financial line-item table.

use std::collections::HashSet;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::Reader;
use report_core::{FinancialRecord, LineCode, ReportError, Result, TaxId};
use tracing::{info, instrument, warn};

use crate::source::{cell, column_positions, csv_error, open_path, reader_from, source_name};

/// Columns the financial source must provide.
pub const FINANCIAL_COLUMNS: [&str; 5] = ["tax_id", "my_date", "code", "value", "c_doc_sub"];

const DATE_FORMATS: [&str; 1] = ["%Y-%m-%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// In-memory financial line items, stably sorted by `(tax_id, report_date)`.
///
/// Because rows for one company are contiguous, per-company lookups are a
/// binary search followed by a scan of that company's rows only.
#[derive(Debug, Clone, Default)]
pub struct FinancialTable {
    records: Vec<FinancialRecord>,
}

impl FinancialTable {
    /// Loads line items from a CSV file.
    ///
    /// # Errors
    /// Fails if the file is missing, a required column is absent, the CSV is
    /// malformed, or any date, code or value cannot be parsed. No partial table
    /// is returned.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading financial records");
        let reader = open_path(path)?;
        Self::read(reader, &source_name(path))
    }

    /// Loads line items from any byte source holding CSV text.
    ///
    /// # Errors
    /// Same as [`FinancialTable::load`], minus the missing-file case.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        Self::read(reader_from(rdr), "financials")
    }

    /// Builds a table from records already in memory, sorting them.
    #[must_use]
    pub fn from_records(mut records: Vec<FinancialRecord>) -> Self {
        // Stable: equal keys keep source order.
        records.sort_by(|a, b| {
            a.tax_id
                .cmp(&b.tax_id)
                .then_with(|| a.report_date.cmp(&b.report_date))
        });

        let duplicates = duplicate_count(&records);
        if duplicates > 0 {
            warn!(
                duplicates,
                "Duplicate (tax_id, date, code) rows in financial records, first occurrence wins"
            );
        }

        Self { records }
    }

    fn read<R: Read>(mut reader: Reader<R>, source_name: &str) -> Result<Self> {
        let [tax_id, my_date, code, value, c_doc_sub] =
            column_positions(&mut reader, FINANCIAL_COLUMNS, source_name)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row.map_err(csv_error)?;
            let line = idx + 1;
            records.push(FinancialRecord {
                tax_id: TaxId::new(cell(&row, tax_id)),
                report_date: parse_date(cell(&row, my_date), line)?,
                line_code: parse_code(cell(&row, code), line)?,
                value: parse_value(cell(&row, value), line)?,
                sub_classifier: cell(&row, c_doc_sub).to_string(),
            });
        }

        let table = Self::from_records(records);
        info!(
            source = source_name,
            records = table.len(),
            "Successfully loaded financial records"
        );
        Ok(table)
    }

    /// Returns the contiguous rows for one company, in table order.
    #[must_use]
    pub fn for_company(&self, tax_id: &TaxId) -> &[FinancialRecord] {
        &self.records[self.company_range(tax_id)]
    }

    fn company_range(&self, tax_id: &TaxId) -> Range<usize> {
        let start = self.records.partition_point(|r| r.tax_id < *tax_id);
        let len = self.records[start..].partition_point(|r| r.tax_id == *tax_id);
        start..start + len
    }

    /// Returns every record in table order.
    #[must_use]
    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> impl Iterator<Item = &FinancialRecord> {
        self.records.iter()
    }
}

/// Number of rows repeating an earlier `(tax_id, date, code)` key.
fn duplicate_count(records: &[FinancialRecord]) -> usize {
    let mut seen: HashSet<(&TaxId, NaiveDate, LineCode)> = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|r| !seen.insert((&r.tax_id, r.report_date, r.line_code)))
        .count()
}

fn parse_error(line: usize, column: &str, raw: &str, reason: impl Into<String>) -> ReportError {
    ReportError::Parse {
        row: line,
        column: column.to_string(),
        value: raw.to_string(),
        reason: reason.into(),
    }
}

/// Parses a reporting date, discarding any time component.
fn parse_date(raw: &str, line: usize) -> Result<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }
    Err(parse_error(line, "my_date", raw, "expected YYYY-MM-DD"))
}

/// Parses a line code. Integral float renderings such as `2000.0` are accepted.
fn parse_code(raw: &str, line: usize) -> Result<LineCode> {
    if let Ok(code) = raw.parse::<i32>() {
        return Ok(LineCode(code));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) => {
            Ok(LineCode(v as i32))
        }
        _ => Err(parse_error(line, "code", raw, "expected an integer line code")),
    }
}

/// Parses an amount. Blank cells and NaN literals are absent values.
fn parse_value(raw: &str, line: usize) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(e) => Err(parse_error(line, "value", raw, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "tax_id,my_date,code,value,c_doc_sub\n";

    fn table(rows: &str) -> Result<FinancialTable> {
        FinancialTable::from_reader(format!("{HEADER}{rows}").as_bytes())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_parses_and_sorts() {
        let t = table(
            "\
00236903,2022-12-31,2000,900.5,F1
00236903,2021-12-31,1300,500000.0,S1
 00000001 ,2021-12-31,1495,7,S2
",
        )
        .unwrap();

        assert_eq!(t.len(), 3);
        let first = &t.records()[0];
        assert_eq!(first.tax_id.as_str(), "00000001");
        assert_eq!(first.line_code, LineCode::TOTAL_EQUITY);

        let dates: Vec<NaiveDate> = t.records()[1..].iter().map(|r| r.report_date).collect();
        assert_eq!(dates, vec![date(2021, 12, 31), date(2022, 12, 31)]);
        assert_eq!(t.records()[2].value, Some(900.5));
        assert_eq!(t.records()[2].sub_classifier, "F1");
    }

    #[test]
    fn test_stable_sort_keeps_source_order_for_equal_keys() {
        let t = table(
            "\
1,2021-12-31,1300,1.0,a
1,2021-12-31,1300,2.0,b
",
        )
        .unwrap();
        assert_eq!(t.records()[0].value, Some(1.0));
        assert_eq!(t.records()[1].value, Some(2.0));
    }

    #[test]
    fn test_duplicate_count_includes_non_adjacent_rows() {
        let t = table(
            "\
1,2021-12-31,1300,1,
1,2021-12-31,1495,2,
1,2021-12-31,1300,3,
1,2022-12-31,1300,4,
2,2021-12-31,1300,5,
",
        )
        .unwrap();
        assert_eq!(duplicate_count(t.records()), 1);

        let lookup: Vec<Option<f64>> = t
            .for_company(&TaxId::new("1"))
            .iter()
            .filter(|r| r.line_code == LineCode::TOTAL_ASSETS)
            .map(|r| r.value)
            .collect();
        assert_eq!(lookup, vec![Some(1.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_no_duplicates_across_companies_or_dates() {
        let t = table(
            "\
1,2021-12-31,1300,1,
1,2022-12-31,1300,2,
2,2021-12-31,1300,3,
",
        )
        .unwrap();
        assert_eq!(duplicate_count(t.records()), 0);
    }

    #[test]
    fn test_datetime_dates_drop_time() {
        let t = table("1,2021-12-31 00:00:00,1300,1,\n").unwrap();
        assert_eq!(t.records()[0].report_date, date(2021, 12, 31));
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let err = table("1,2021-12-31,1300,1,\n1,31.12.2021,1300,1,\n").unwrap_err();
        match err {
            ReportError::Parse {
                row, column, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(column, "my_date");
                assert_eq!(value, "31.12.2021");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_code_parsing() {
        let t = table("1,2021-12-31,2000.0,1,\n").unwrap();
        assert_eq!(t.records()[0].line_code, LineCode::REVENUE);

        assert!(matches!(
            table("1,2021-12-31,20x0,1,\n").unwrap_err(),
            ReportError::Parse { .. }
        ));
        assert!(table("1,2021-12-31,2000.5,1,\n").is_err());
        assert!(table("1,2021-12-31,,1,\n").is_err());
    }

    #[test]
    fn test_blank_and_nan_values_are_absent() {
        let t = table("1,2021-12-31,1300,,\n2,2021-12-31,1300,NaN,\n").unwrap();
        assert_eq!(t.records()[0].value, None);
        assert_eq!(t.records()[1].value, None);
    }

    #[test]
    fn test_bad_value_is_fatal() {
        let err = table("1,2021-12-31,1300,abc,\n").unwrap_err();
        assert!(matches!(err, ReportError::Parse { ref column, .. } if column == "value"));
    }

    #[test]
    fn test_missing_columns() {
        let err = FinancialTable::from_reader("tax_id,my_date,code\n".as_bytes()).unwrap_err();
        match err {
            ReportError::Schema { missing, .. } => assert_eq!(missing, vec!["value", "c_doc_sub"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_for_company_slices_contiguous_rows() {
        let t = table(
            "\
2,2021-12-31,1300,1,
1,2020-12-31,1300,1,
3,2021-12-31,1300,1,
1,2021-12-31,1495,1,
",
        )
        .unwrap();
        let rows = t.for_company(&TaxId::new("1"));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.tax_id.as_str() == "1"));
        assert!(t.for_company(&TaxId::new("9")).is_empty());
        assert!(t.for_company(&TaxId::new("0")).is_empty());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}1,2021-12-31,1300,5,").unwrap();
        let t = FinancialTable::load(file.path()).unwrap();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = FinancialTable::load("/no/such/fin_values.csv").unwrap_err();
        assert!(matches!(err, ReportError::NotFound { .. }));
    }
}
