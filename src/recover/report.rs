//! Report rows and run summary for canonical-interaction recovery.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Separator used for list-valued CSV cells.
pub const LIST_SEPARATOR: &str = ";";

/// One gene of interest with its recovered canonical interactors.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub gene_of_interest: String,
    pub target_count: usize,
    /// `;`-joined fixed-up target names, first-occurrence order.
    pub targets: String,
    pub ensg_count: usize,
    /// `;`-joined distinct Ensembl IDs across all targets.
    pub ensg_targets: String,
    /// JSON object mapping each target to its resolved Ensembl IDs.
    pub target_to_ensg: String,
}

impl ReportRow {
    pub fn new(
        gene_of_interest: &str,
        targets: &[String],
        ensg_targets: &[String],
        target_to_ensg: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self> {
        Ok(ReportRow {
            gene_of_interest: gene_of_interest.to_string(),
            target_count: targets.len(),
            targets: targets.join(LIST_SEPARATOR),
            ensg_count: ensg_targets.len(),
            ensg_targets: ensg_targets.join(LIST_SEPARATOR),
            target_to_ensg: serde_json::to_string(target_to_ensg)?,
        })
    }
}

/// Counters for one recovery run, also written as a JSON summary.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub genes: usize,
    pub genes_missing_from_snodb: usize,
    pub targets: usize,
    pub resolved_targets: usize,
    pub unresolved_targets: usize,
}

/// Writes the recovery report as CSV, replacing any existing file.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing recovery report");

    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
