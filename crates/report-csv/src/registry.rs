//! Company registry table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use report_core::{CompanyRecord, Result, TaxId};
use tracing::{debug, info, instrument, warn};

use crate::source::{cell, column_positions, csv_error, open_path, reader_from, source_name};

/// Columns the registry source must provide.
pub const REGISTRY_COLUMNS: [&str; 7] = [
    "tax_id",
    "name",
    "kved",
    "opf_code",
    "katottg",
    "region_code",
    "local_code",
];

/// In-memory company registry.
///
/// Records keep their source order. When a tax id occurs more than once the
/// first occurrence is the one returned by lookups; later duplicates are kept
/// in [`CompanyTable::records`] but never found by key.
#[derive(Debug, Clone, Default)]
pub struct CompanyTable {
    records: Vec<CompanyRecord>,
    index: HashMap<TaxId, usize>,
}

impl CompanyTable {
    /// Loads the registry from a CSV file.
    ///
    /// # Errors
    /// Fails if the file is missing, a required column is absent, or the CSV is
    /// malformed. No partial table is returned.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading company registry");
        let reader = open_path(path)?;
        Self::read(reader, &source_name(path))
    }

    /// Loads the registry from any byte source holding CSV text.
    ///
    /// # Errors
    /// Fails if a required column is absent or the CSV is malformed.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        Self::read(reader_from(rdr), "registry")
    }

    /// Builds a table from records already in memory.
    #[must_use]
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        let mut duplicates = 0usize;
        for (pos, record) in records.iter().enumerate() {
            if index.contains_key(&record.tax_id) {
                duplicates += 1;
            } else {
                index.insert(record.tax_id.clone(), pos);
            }
        }
        if duplicates > 0 {
            warn!(
                duplicates,
                "Duplicate tax ids in company registry, first occurrence wins"
            );
        }
        Self { records, index }
    }

    fn read<R: Read>(mut reader: Reader<R>, source_name: &str) -> Result<Self> {
        let [tax_id, name, kved, opf_code, katottg, region_code, local_code] =
            column_positions(&mut reader, REGISTRY_COLUMNS, source_name)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(csv_error)?;
            records.push(CompanyRecord {
                tax_id: TaxId::new(cell(&row, tax_id)),
                name: cell(&row, name).to_string(),
                industry_code: cell(&row, kved).to_string(),
                legal_form_code: cell(&row, opf_code).to_string(),
                territory_code: cell(&row, katottg).to_string(),
                region_code: cell(&row, region_code).to_string(),
                local_code: cell(&row, local_code).to_string(),
            });
        }

        let table = Self::from_records(records);
        info!(
            source = source_name,
            companies = table.len(),
            "Successfully loaded companies"
        );
        Ok(table)
    }

    /// Returns the first record with the given tax id.
    #[must_use]
    pub fn get(&self, tax_id: &TaxId) -> Option<&CompanyRecord> {
        let found = self.index.get(tax_id).map(|&pos| &self.records[pos]);
        if found.is_none() {
            debug!(tax_id = %tax_id, "Company not in registry");
        }
        found
    }

    /// Returns true if at least one record has the given tax id.
    #[must_use]
    pub fn contains(&self, tax_id: &TaxId) -> bool {
        self.index.contains_key(tax_id)
    }

    /// Returns every record in source order, duplicates included.
    #[must_use]
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    /// Returns the number of rows loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> impl Iterator<Item = &CompanyRecord> {
        self.records.iter()
    }
}
