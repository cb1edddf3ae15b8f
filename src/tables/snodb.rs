//! snoDB: per-snoRNA records with class-bucketed target lists and synonyms.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::{add_synonym, header_index, split_cell, tsv_reader};

/// Target columns consulted for a gene of interest, in priority order.
/// rRNA targets are deliberately excluded (18S/28S interactions are handled
/// through the name fixups instead).
pub const TARGET_COLUMNS: &[&str] = &[
    "snrna_targets",
    "lncrna_targets",
    "protein_coding_targets",
    "snorna_targets",
    "mirna_targets",
    "trna_targets",
    "ncrna_targets",
    "pseudogene_targets",
    "other_targets",
];

/// The snoDB export, indexed two ways: targets by snoRNA gene name, and a
/// reverse synonym map from any listed name to its Ensembl IDs.
#[derive(Debug, Default)]
pub struct SnoDbTable {
    targets: HashMap<String, Vec<String>>,
    by_synonym: HashMap<String, Vec<String>>,
}

impl SnoDbTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut rdr = tsv_reader(path)?;
        let headers = rdr.headers()?.clone();

        let ensembl_col = header_index(&headers, "ensembl_id", path)?;
        let name_col = header_index(&headers, "gene_name", path)?;
        let synonyms_col = header_index(&headers, "synonyms", path)?;
        let target_cols: Vec<usize> = TARGET_COLUMNS
            .iter()
            .map(|col| header_index(&headers, col, path))
            .collect::<Result<_>>()?;

        let mut table = SnoDbTable::default();

        for record in rdr.records() {
            let record = record?;
            let gene_name = record.get(name_col).unwrap_or("").trim();
            if gene_name.is_empty() {
                continue;
            }

            let mut targets = Vec::new();
            for &col in &target_cols {
                targets.extend(
                    split_cell(record.get(col).unwrap_or(""), ';').map(str::to_string),
                );
            }
            table.targets.insert(gene_name.to_string(), targets);

            let ensembl_id = record.get(ensembl_col).unwrap_or("").trim();
            for name in split_cell(gene_name, ';') {
                add_synonym(&mut table.by_synonym, name, ensembl_id);
            }
            for name in split_cell(record.get(synonyms_col).unwrap_or(""), ';') {
                add_synonym(&mut table.by_synonym, name, ensembl_id);
            }
        }

        info!(
            path = %path.display(),
            records = table.targets.len(),
            synonyms = table.by_synonym.len(),
            "Loaded snoDB table"
        );
        Ok(table)
    }

    /// Targets listed for a snoRNA gene name, in column order.
    pub fn targets_of(&self, gene: &str) -> Option<&[String]> {
        self.targets.get(gene).map(Vec::as_slice)
    }

    /// Ensembl IDs whose snoDB record lists this name.
    pub fn resolve_synonym(&self, name: &str) -> &[String] {
        self.by_synonym.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
