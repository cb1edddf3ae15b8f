//! Lookup tables for canonical-identifier recovery.
//!
//! Each table is loaded once into process-local maps: snoDB and the
//! spliceosome (HGNC) export become reverse synonym maps (alternate name →
//! Ensembl gene IDs), and the Ensembl gene-name export keeps separate
//! main-name and synonym indexes.

pub mod gene_names;
pub mod snodb;
pub mod spliceosome;

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::parser::open_table;

/// Opens a TSV table, transparently handling `.gz` inputs.
pub(crate) fn tsv_reader(path: &Path) -> Result<csv::Reader<Box<dyn BufRead>>> {
    Ok(csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(open_table(path)?))
}

/// Finds a required column in a header record.
pub(crate) fn header_index(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize> {
    match headers.iter().position(|h| h.trim() == name) {
        Some(idx) => Ok(idx),
        None => bail!("{}: missing required column '{}'", path.display(), name),
    }
}

/// Registers one alternate name for a canonical ID in a reverse map,
/// skipping blanks and repeat registrations.
pub(crate) fn add_synonym(map: &mut HashMap<String, Vec<String>>, name: &str, id: &str) {
    let name = name.trim();
    if name.is_empty() || id.is_empty() {
        return;
    }
    let ids = map.entry(name.to_string()).or_default();
    if !ids.iter().any(|known| known == id) {
        ids.push(id.to_string());
    }
}

/// Splits a delimited synonym cell, dropping empty fragments.
pub(crate) fn split_cell(cell: &str, delimiter: char) -> impl Iterator<Item = &str> {
    cell.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}
