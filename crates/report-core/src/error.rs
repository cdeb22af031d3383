//! Error types for report operations.
//!
//! This module defines [`ReportError`] which covers every failure that can occur
//! while loading the source tables. Query-time absence (unknown company, no data
//! for a date) is never an error; queries return `Option` or empty collections.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or exporting report data.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required input source does not exist.
    #[error("Source not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// Required columns are absent from a source's header row.
    #[error("Missing required columns in {source_name}: {}", missing.join(", "))]
    Schema {
        /// Name of the source (usually the file name).
        source_name: String,
        /// Every required column that was not found.
        missing: Vec<String>,
    },

    /// A cell could not be parsed as its declared type.
    #[error("Parse error at row {row}, column {column}: {value:?} ({reason})")]
    Parse {
        /// 1-based data row (the header row is not counted).
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell contents.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The delimited-text reader failed (malformed row, bad quoting, etc.).
    #[error("CSV error: {0}")]
    Csv(String),

    /// Any other I/O failure while reading a source.
    #[error("I/O error: {0}")]
    Io(String),

    /// Building a DataFrame view failed.
    #[error("Frame error: {0}")]
    Frame(String),

    /// An invalid parameter was provided by the caller.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = ReportError::Schema {
            source_name: "firms.csv".to_string(),
            missing: vec!["kved".to_string(), "katottg".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required columns in firms.csv: kved, katottg"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = ReportError::Parse {
            row: 3,
            column: "my_date".to_string(),
            value: "31/12/2021".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("my_date"));
        assert!(msg.contains("31/12/2021"));
    }
}
