//! Duplicate-pair averaging and the merge pipelines built on it.
//!
//! Every pair of interactors is flattened to one canonical (unordered) key
//! so an interaction reported from both endpoints' expansions is counted
//! once, with the two relative frequencies averaged.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::gene::normalize_gene_name;
use crate::output::write_interactions;
use crate::parser::{InteractionRow, read_merged_file, read_raw_file};

/// Canonical key for an unordered gene pair: endpoints stored in sorted
/// order so (a, b) and (b, a) key identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    a: String,
    b: String,
}

impl PairKey {
    pub fn new(x: &str, y: &str) -> Self {
        if x <= y {
            PairKey {
                a: x.to_string(),
                b: y.to_string(),
            }
        } else {
            PairKey {
                a: y.to_string(),
                b: x.to_string(),
            }
        }
    }
}

/// Counters describing one merge run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MergeStats {
    pub files: usize,
    pub rows: usize,
    pub pairs: usize,
    pub averaged: usize,
}

/// Accumulates interactions keyed by unordered pair.
///
/// First occurrence of a pair stores its frel; a repeat replaces the stored
/// value with the mean of stored and new. Each pair is expected at most
/// twice (once per endpoint's expansion); a third occurrence re-applies the
/// same rule against the running value, matching the historical behavior.
#[derive(Debug, Default)]
pub struct InteractionMap {
    pairs: HashMap<PairKey, f64>,
    rows: usize,
    averaged: usize,
}

impl InteractionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, x: &str, y: &str, frel: f64) {
        use std::collections::hash_map::Entry;

        self.rows += 1;
        match self.pairs.entry(PairKey::new(x, y)) {
            Entry::Occupied(mut entry) => {
                let stored = entry.get_mut();
                *stored = (*stored + frel) / 2.0;
                self.averaged += 1;
            }
            Entry::Vacant(entry) => {
                entry.insert(frel);
            }
        }
    }

    pub fn get(&self, x: &str, y: &str) -> Option<f64> {
        self.pairs.get(&PairKey::new(x, y)).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn stats(&self, files: usize) -> MergeStats {
        MergeStats {
            files,
            rows: self.rows,
            pairs: self.pairs.len(),
            averaged: self.averaged,
        }
    }

    /// Drains the map into rows sorted by pair key, so output is stable
    /// across runs.
    pub fn into_sorted_rows(self) -> Vec<InteractionRow> {
        let mut entries: Vec<_> = self.pairs.into_iter().collect();
        entries.sort_by(|(ka, _), (kb, _)| ka.cmp(kb));
        entries
            .into_iter()
            .map(|(key, frel)| InteractionRow {
                x: key.a,
                y: key.b,
                frel,
            })
            .collect()
    }
}

/// Lists the plain files of a directory in name order.
fn files_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Per-network filter pass: each raw file becomes one
/// `<network>_<threshold>.csv` of normalized rows above the threshold.
#[tracing::instrument(skip(thresholds))]
pub fn merge_networks(input_dir: &Path, output_dir: &Path, thresholds: &[f64]) -> Result<MergeStats> {
    fs::create_dir_all(output_dir)?;

    let files = files_in_dir(input_dir)?;
    let mut stats = MergeStats::default();

    for threshold in thresholds {
        for path in &files {
            let parsed = read_raw_file(path)?;
            let total = parsed.rows.len();

            let kept: Vec<InteractionRow> = parsed
                .rows
                .into_iter()
                .filter(|row| row.frel > *threshold)
                .map(|row| InteractionRow {
                    x: normalize_gene_name(&row.x),
                    y: normalize_gene_name(&row.y),
                    frel: row.frel,
                })
                .collect();

            debug!(
                network = %parsed.network,
                threshold,
                total,
                kept = kept.len(),
                "Filtered network file"
            );

            let output = output_dir.join(format!("{}_{}.csv", parsed.network, threshold));
            write_interactions(&output, &kept)?;

            stats.files += 1;
            stats.rows += kept.len();
            stats.pairs += kept.len();
        }
    }

    info!(
        files = stats.files,
        rows_kept = stats.rows,
        "Network merge complete"
    );
    Ok(stats)
}

/// Merges every raw expansion file under the given directories into one
/// averaged table of normalized pairs.
#[tracing::instrument(skip(input_dirs))]
pub fn merge_expansions(input_dirs: &[PathBuf], output: &Path) -> Result<MergeStats> {
    let mut map = InteractionMap::new();
    let mut files = 0usize;

    for dir in input_dirs {
        info!(dir = %dir.display(), "Parsing expansion directory");
        for path in files_in_dir(dir)? {
            let parsed = read_raw_file(&path)?;
            if parsed.rows.is_empty() {
                warn!(file = %path.display(), "Expansion file has no rows");
            }
            for row in &parsed.rows {
                map.insert(
                    &normalize_gene_name(&row.x),
                    &normalize_gene_name(&row.y),
                    row.frel,
                );
            }
            files += 1;
        }
    }

    let stats = map.stats(files);
    write_interactions(output, &map.into_sorted_rows())?;

    info!(
        files = stats.files,
        rows = stats.rows,
        pairs = stats.pairs,
        averaged = stats.averaged,
        output = %output.display(),
        "Expansion merge complete"
    );
    Ok(stats)
}

/// Merges already-merged `x,y,frel` tables (e.g. the sno and ribo merges)
/// into one, averaging pairs that appear in more than one input.
#[tracing::instrument(skip(inputs))]
pub fn merge_hybrid(inputs: &[PathBuf], output: &Path) -> Result<MergeStats> {
    let mut map = InteractionMap::new();

    for path in inputs {
        info!(file = %path.display(), "Parsing merged table");
        // Inputs were normalized when first merged; identifiers pass through.
        for row in read_merged_file(path)? {
            map.insert(&row.x, &row.y, row.frel);
        }
    }

    let stats = map.stats(inputs.len());
    write_interactions(output, &map.into_sorted_rows())?;

    info!(
        files = stats.files,
        pairs = stats.pairs,
        averaged = stats.averaged,
        output = %output.display(),
        "Hybrid merge complete"
    );
    Ok(stats)
}
