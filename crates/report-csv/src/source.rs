//! Shared plumbing for opening CSV sources and validating their headers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use report_core::{ReportError, Result};

/// Opens a CSV file with a header row.
///
/// # Errors
/// Returns [`ReportError::NotFound`] if the path does not exist and
/// [`ReportError::Io`] if it cannot be opened.
pub(crate) fn open_path(path: &Path) -> Result<Reader<File>> {
    if !path.exists() {
        return Err(ReportError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)
        .map_err(|e| ReportError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    Ok(reader_from(file))
}

/// Wraps any byte source in a CSV reader expecting a header row.
pub(crate) fn reader_from<R: Read>(rdr: R) -> Reader<R> {
    ReaderBuilder::new().has_headers(true).from_reader(rdr)
}

/// Name used in error messages for a path: its file name, or the whole path.
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Resolves the position of every required column in the header row.
///
/// Header matching is exact and case-sensitive. Extra columns are ignored.
///
/// # Errors
/// Returns [`ReportError::Schema`] listing every absent column.
pub(crate) fn column_positions<R: Read, const N: usize>(
    reader: &mut Reader<R>,
    required: [&str; N],
    source_name: &str,
) -> Result<[usize; N]> {
    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut positions = [0usize; N];
    let mut missing = Vec::new();

    for (slot, column) in positions.iter_mut().zip(required) {
        match headers.iter().position(|h| h == column) {
            Some(idx) => *slot = idx,
            None => missing.push(column.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(ReportError::Schema {
            source_name: source_name.to_string(),
            missing,
        })
    }
}

/// Returns a trimmed cell; a ragged row has already been rejected by the reader.
pub(crate) fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or_default().trim()
}

/// Converts a reader error into a [`ReportError`].
pub(crate) fn csv_error(e: csv::Error) -> ReportError {
    if e.is_io_error() {
        ReportError::Io(e.to_string())
    } else {
        ReportError::Csv(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_positions_in_any_order() {
        let mut rdr = reader_from("b,x,a\n1,2,3\n".as_bytes());
        let pos = column_positions(&mut rdr, ["a", "b"], "t.csv").unwrap();
        assert_eq!(pos, [2, 0]);
    }

    #[test]
    fn test_column_positions_reports_all_missing() {
        let mut rdr = reader_from("a\n1\n".as_bytes());
        let err = column_positions(&mut rdr, ["a", "b", "c"], "t.csv").unwrap_err();
        match err {
            ReportError::Schema {
                source_name,
                missing,
            } => {
                assert_eq!(source_name, "t.csv");
                assert_eq!(missing, vec!["b".to_string(), "c".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let mut rdr = reader_from("Tax_ID\n1\n".as_bytes());
        assert!(column_positions(&mut rdr, ["tax_id"], "t.csv").is_err());
    }

    #[test]
    fn test_open_missing_path() {
        let err = open_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ReportError::NotFound { .. }));
    }

    #[test]
    fn test_source_name_uses_file_name() {
        assert_eq!(source_name(Path::new("data/firms.csv")), "firms.csv");
    }
}
