//! Canonical-interaction recovery.
//!
//! For each snoRNA of interest, pulls its target names out of snoDB,
//! cleans them up, and resolves each to Ensembl gene IDs through the
//! lookup tables in fixed priority order.

pub mod report;
pub mod resolve;

use anyhow::{Context, Result};
use chrono::Utc;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::output::write_json;
use crate::parser::open_table;
use crate::tables::gene_names::GeneNameTable;
use crate::tables::snodb::SnoDbTable;
use crate::tables::spliceosome::SpliceosomeTable;
use self::report::{ReportRow, RunSummary, write_report};
use self::resolve::{Resolver, dedup_preserving_order, fix_target_name};

/// Lookup-table and gene-list locations for one recovery run.
#[derive(Debug)]
pub struct RecoverInputs {
    pub snodb: PathBuf,
    pub spliceosome: PathBuf,
    pub gene_names: PathBuf,
    pub genes: PathBuf,
}

/// Reads the genes-of-interest list: one name per line, blanks skipped.
fn read_gene_list(path: &Path) -> Result<Vec<String>> {
    let reader = open_table(path)?;
    let mut genes = Vec::new();
    for line in reader.lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let name = line.trim();
        if !name.is_empty() {
            genes.push(name.to_string());
        }
    }
    Ok(genes)
}

/// Runs recovery end to end: load tables, resolve every gene of interest,
/// write the CSV report and (optionally) a JSON run summary.
#[tracing::instrument(skip(inputs))]
pub fn recover_canonical(
    inputs: &RecoverInputs,
    output: &Path,
    summary_path: Option<&Path>,
) -> Result<RunSummary> {
    let snodb = SnoDbTable::from_path(&inputs.snodb)?;
    let spliceosome = SpliceosomeTable::from_path(&inputs.spliceosome)?;
    let gene_names = GeneNameTable::from_path(&inputs.gene_names)?;
    let genes = read_gene_list(&inputs.genes)?;

    let resolver = Resolver {
        gene_names: &gene_names,
        spliceosome: &spliceosome,
        snodb: &snodb,
    };

    let mut rows = Vec::with_capacity(genes.len());
    let mut summary = RunSummary {
        generated_at: Utc::now(),
        genes: genes.len(),
        genes_missing_from_snodb: 0,
        targets: 0,
        resolved_targets: 0,
        unresolved_targets: 0,
    };

    for gene in &genes {
        let Some(raw_targets) = snodb.targets_of(gene) else {
            warn!(gene = %gene, "Gene of interest has no snoDB record");
            summary.genes_missing_from_snodb += 1;
            rows.push(ReportRow::new(gene, &[], &[], &serde_json::Map::new())?);
            continue;
        };

        let targets = dedup_preserving_order(
            raw_targets.iter().map(|t| fix_target_name(t)).collect(),
        );

        let mut all_ids = Vec::new();
        let mut target_to_ensg = serde_json::Map::new();

        for target in &targets {
            summary.targets += 1;
            let ids: Vec<String> = match resolver.resolve(target) {
                Some((source, ids)) => {
                    debug!(gene = %gene, target = %target, source = ?source, "Resolved target");
                    summary.resolved_targets += 1;
                    ids.to_vec()
                }
                None => {
                    // Unmatched lookups produce empty lists, not errors.
                    debug!(gene = %gene, target = %target, "No canonical ID for target");
                    summary.unresolved_targets += 1;
                    Vec::new()
                }
            };

            all_ids.extend(ids.iter().cloned());
            target_to_ensg.insert(target.clone(), serde_json::json!(ids));
        }

        let all_ids = dedup_preserving_order(all_ids);
        rows.push(ReportRow::new(gene, &targets, &all_ids, &target_to_ensg)?);
    }

    write_report(output, &rows)?;
    if let Some(path) = summary_path {
        write_json(path, &summary)?;
    }

    info!(
        genes = summary.genes,
        missing = summary.genes_missing_from_snodb,
        targets = summary.targets,
        unresolved = summary.unresolved_targets,
        output = %output.display(),
        "Recovery complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_read_gene_list_skips_blank_lines() {
        let path = env::temp_dir().join("snomerge_gene_list.txt");
        fs::write(&path, "SNORD118\n\n  SNORA73A  \n").unwrap();

        let genes = read_gene_list(&path).unwrap();
        assert_eq!(genes, vec!["SNORD118", "SNORA73A"]);

        fs::remove_file(&path).unwrap();
    }
}
