//! Spliceosome gene table (HGNC export): approved, previous, and alias
//! symbols reverse-mapped to Ensembl gene IDs.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::{add_synonym, header_index, split_cell, tsv_reader};

#[derive(Debug, Default)]
pub struct SpliceosomeTable {
    by_synonym: HashMap<String, Vec<String>>,
    records: usize,
}

impl SpliceosomeTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut rdr = tsv_reader(path)?;
        let headers = rdr.headers()?.clone();

        let approved_col = header_index(&headers, "Approved symbol", path)?;
        let previous_col = header_index(&headers, "Previous symbols", path)?;
        let alias_col = header_index(&headers, "Alias symbols", path)?;
        let ensembl_col = header_index(&headers, "Ensembl gene ID", path)?;

        let mut table = SpliceosomeTable::default();

        for record in rdr.records() {
            let record = record?;
            let ensembl_id = record.get(ensembl_col).unwrap_or("").trim();
            if ensembl_id.is_empty() {
                continue;
            }
            table.records += 1;

            for col in [approved_col, previous_col, alias_col] {
                for name in split_cell(record.get(col).unwrap_or(""), ',') {
                    add_synonym(&mut table.by_synonym, name, ensembl_id);
                }
            }
        }

        info!(
            path = %path.display(),
            records = table.records,
            synonyms = table.by_synonym.len(),
            "Loaded spliceosome table"
        );
        Ok(table)
    }

    /// Ensembl IDs whose approved/previous/alias symbols include this name.
    pub fn resolve_synonym(&self, name: &str) -> &[String] {
        self.by_synonym.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}
