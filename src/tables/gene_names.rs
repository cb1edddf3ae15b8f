//! Ensembl gene-name export: stable ID, main name, and one synonym per row.
//!
//! A gene spans as many rows as it has synonyms, so both indexes
//! de-duplicate stable IDs on insert.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::{add_synonym, header_index, tsv_reader};

#[derive(Debug, Default)]
pub struct GeneNameTable {
    by_name: HashMap<String, Vec<String>>,
    by_synonym: HashMap<String, Vec<String>>,
}

impl GeneNameTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut rdr = tsv_reader(path)?;
        let headers = rdr.headers()?.clone();

        let id_col = header_index(&headers, "Gene_stable_ID", path)?;
        let name_col = header_index(&headers, "Gene_name", path)?;
        let synonym_col = header_index(&headers, "Gene_Synonym", path)?;

        let mut table = GeneNameTable::default();

        for record in rdr.records() {
            let record = record?;
            let id = record.get(id_col).unwrap_or("").trim();
            if id.is_empty() {
                continue;
            }
            add_synonym(&mut table.by_name, record.get(name_col).unwrap_or(""), id);
            add_synonym(
                &mut table.by_synonym,
                record.get(synonym_col).unwrap_or(""),
                id,
            );
        }

        info!(
            path = %path.display(),
            names = table.by_name.len(),
            synonyms = table.by_synonym.len(),
            "Loaded gene-name table"
        );
        Ok(table)
    }

    /// Stable IDs recorded under this main gene name.
    pub fn resolve_name(&self, name: &str) -> &[String] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stable IDs recorded under this synonym.
    pub fn resolve_synonym(&self, name: &str) -> &[String] {
        self.by_synonym.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    const FIXTURE: &str = "\
Gene_stable_ID\tGene_name\tGene_Synonym
ENSG00000274309\tSNORD3A\tU3
ENSG00000274309\tSNORD3A\tU3-2B
ENSG00000277194\tSNORD3B-1\tU3
ENSG00000163001\tCFAP36\tCCDC104
";

    #[test]
    fn test_main_name_lookup_deduplicates_rows() {
        let path = temp_path("snomerge_gene_names_main.tsv");
        fs::write(&path, FIXTURE).unwrap();

        let table = GeneNameTable::from_path(&path).unwrap();
        // Two synonym rows for SNORD3A collapse to one stable ID.
        assert_eq!(table.resolve_name("SNORD3A"), &["ENSG00000274309".to_string()]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_synonym_lookup_collects_all_ids() {
        let path = temp_path("snomerge_gene_names_syn.tsv");
        fs::write(&path, FIXTURE).unwrap();

        let table = GeneNameTable::from_path(&path).unwrap();
        assert_eq!(
            table.resolve_synonym("U3"),
            &["ENSG00000274309".to_string(), "ENSG00000277194".to_string()]
        );
        assert!(table.resolve_synonym("SNORD3A").is_empty());

        fs::remove_file(&path).unwrap();
    }
}
