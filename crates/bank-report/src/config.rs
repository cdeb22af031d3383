//! Dataset location configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default location of the company registry.
pub const DEFAULT_COMPANIES_PATH: &str = "data/firms.csv";
/// Default location of the financial line items.
pub const DEFAULT_FINANCIALS_PATH: &str = "data/fin_values.csv";
/// Environment variable overriding the company registry path.
pub const COMPANIES_ENV: &str = "BANK_REPORT_COMPANIES";
/// Environment variable overriding the financial line items path.
pub const FINANCIALS_ENV: &str = "BANK_REPORT_FINANCIALS";

/// Where the two source tables live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    /// Company registry CSV.
    pub companies: PathBuf,
    /// Financial line items CSV.
    pub financials: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::new(DEFAULT_COMPANIES_PATH, DEFAULT_FINANCIALS_PATH)
    }
}

impl DatasetPaths {
    /// Creates a configuration from two paths.
    #[must_use]
    pub fn new(companies: impl AsRef<Path>, financials: impl AsRef<Path>) -> Self {
        Self {
            companies: companies.as_ref().to_path_buf(),
            financials: financials.as_ref().to_path_buf(),
        }
    }

    /// Resolves both paths relative to `root` (absolute paths are kept).
    #[must_use]
    pub fn relative_to(&self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            companies: root.join(&self.companies),
            financials: root.join(&self.financials),
        }
    }
}
